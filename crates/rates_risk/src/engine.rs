//! Delta and gamma computation through the calibration Jacobian.

use rates_core::curves::DiscountCurve;
use rates_core::math::linalg::solve_transposed_system;
use rates_instruments::swap::{pricing, InterestRateSwap};
use rates_solver::{CalibrationInstrument, CurveSolver};
use tracing::debug;

use crate::error::RiskError;
use crate::report::{DeltaReport, GammaReport};

/// Market-rate bump used for gamma scenarios: one basis point.
const GAMMA_BUMP: f64 = 1e-4;

/// First-order sensitivity of a swap's NPV to each calibration
/// instrument's market quote, scaled to a one basis point move.
///
/// The computation chains two pieces:
/// 1. `∂NPV/∂x_j` by finite-difference bumps of each free node
///    discount factor on a *cloned* curve (the solver's converged
///    state is never touched);
/// 2. `∂x/∂rate_k` from the solver's retained calibration Jacobian:
///    with `J = ∂(par)/∂x` at the solution, solving `Jᵀ w = ∂NPV/∂x`
///    projects the gradient into market-rate space.
///
/// # Errors
///
/// - `RiskError::SolverNotCalibrated` when the solver never converged
/// - `RiskError::SingularJacobian` when the retained Jacobian cannot
///   be inverted
/// - `RiskError::Pricing` when repricing the target swap fails
pub fn delta(
    swap: &InterestRateSwap<f64>,
    solver: &CurveSolver,
) -> Result<DeltaReport, RiskError> {
    let jacobian = solver
        .calibration_jacobian()
        .ok_or(RiskError::SolverNotCalibrated)?;
    let curve = solver.curve();

    let gradient = npv_gradient(swap, curve, solver.config().bump)?;
    let weights =
        solve_transposed_system(jacobian, &gradient).ok_or(RiskError::SingularJacobian)?;

    let values: Vec<f64> = weights.iter().map(|w| w * 1e-4).collect();
    Ok(DeltaReport::new(instrument_labels(solver), values))
}

/// Second-order cross-sensitivities of a swap's NPV to pairs of
/// market quotes, per joint one basis point move.
///
/// Every scenario bumps one or two quotes, recalibrates a fresh solver
/// on a fresh curve, and reprices the swap; central differences then
/// give the curvature. O(k²) scenarios for k calibration instruments.
///
/// # Errors
///
/// As [`delta`], plus `RiskError::Recalibration` when a bumped
/// scenario fails to converge.
pub fn gamma(
    swap: &InterestRateSwap<f64>,
    solver: &CurveSolver,
) -> Result<GammaReport, RiskError> {
    if solver.result().is_none() {
        return Err(RiskError::SolverNotCalibrated);
    }

    let n = solver.instruments().len();
    let base_curve = solver.curve();
    let base_npv = pricing::swap_npv(swap, base_curve, base_curve)?;

    let mut matrix = vec![vec![0.0; n]; n];
    let mut scenarios = 0usize;

    for i in 0..n {
        let up = npv_with_bumped_quotes(swap, solver, &[(i, GAMMA_BUMP)])?;
        let down = npv_with_bumped_quotes(swap, solver, &[(i, -GAMMA_BUMP)])?;
        matrix[i][i] = up - 2.0 * base_npv + down;
        scenarios += 2;

        for j in (i + 1)..n {
            let pp = npv_with_bumped_quotes(swap, solver, &[(i, GAMMA_BUMP), (j, GAMMA_BUMP)])?;
            let pm = npv_with_bumped_quotes(swap, solver, &[(i, GAMMA_BUMP), (j, -GAMMA_BUMP)])?;
            let mp = npv_with_bumped_quotes(swap, solver, &[(i, -GAMMA_BUMP), (j, GAMMA_BUMP)])?;
            let mm = npv_with_bumped_quotes(swap, solver, &[(i, -GAMMA_BUMP), (j, -GAMMA_BUMP)])?;
            let cross = (pp - pm - mp + mm) / 4.0;
            matrix[i][j] = cross;
            matrix[j][i] = cross;
            scenarios += 4;
        }
    }

    debug!(scenarios, instruments = n, "gamma scenarios complete");
    Ok(GammaReport::new(instrument_labels(solver), matrix))
}

/// `∂NPV/∂x_j` by bumping each free node DF on a cloned curve.
fn npv_gradient(
    swap: &InterestRateSwap<f64>,
    curve: &DiscountCurve<f64>,
    bump: f64,
) -> Result<Vec<f64>, RiskError> {
    let base_npv = pricing::swap_npv(swap, curve, curve)?;
    let free_nodes = curve.num_nodes() - 1;

    let mut gradient = Vec::with_capacity(free_nodes);
    for j in 0..free_nodes {
        let mut probe = curve.clone();
        let df = curve.node_values()[j + 1];
        let delta_df = df * bump;
        probe.set_node_value(j + 1, df + delta_df)?;
        let npv = pricing::swap_npv(swap, &probe, &probe)?;
        gradient.push((npv - base_npv) / delta_df);
    }
    Ok(gradient)
}

/// Reprice the swap on a fresh calibration with shifted market quotes.
///
/// Builds a new uncalibrated curve over the solver's pillar dates and
/// a copy of its instrument set with the requested quote bumps, then
/// calibrates from scratch. The original solver is untouched.
fn npv_with_bumped_quotes(
    swap: &InterestRateSwap<f64>,
    solver: &CurveSolver,
    bumps: &[(usize, f64)],
) -> Result<f64, RiskError> {
    let base = solver.curve();
    let curve = DiscountCurve::new(
        base.as_of(),
        base.pillar_dates().to_vec(),
        base.day_count(),
        base.interpolation(),
    )?;

    let mut instruments: Vec<CalibrationInstrument> = solver.instruments().to_vec();
    for &(index, shift) in bumps {
        let target = instruments[index].target_rate() + shift;
        instruments[index] = instruments[index].with_target_rate(target);
    }

    let mut scenario = CurveSolver::new(curve, instruments, *solver.config());
    scenario.calibrate()?;
    Ok(pricing::swap_npv(swap, scenario.curve(), scenario.curve())?)
}

/// Labels of the solver's calibration instruments, in order.
fn instrument_labels(solver: &CurveSolver) -> Vec<String> {
    solver
        .instruments()
        .iter()
        .map(|inst| inst.label().to_string())
        .collect()
}
