//! Global Newton calibration engine.

use rates_core::curves::DiscountCurve;
use rates_core::math::linalg::{inf_norm, solve_linear_system};
use rates_core::types::error::CurveError;
use rates_instruments::swap::{pricing, PricingError};
use tracing::{debug, info, warn};

use crate::config::CalibrationConfig;
use crate::error::CalibrationError;
use crate::instrument::CalibrationInstrument;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Outcome of a successful calibration.
///
/// Produced only when the residual norm reached the configured
/// tolerance; a failed run surfaces as
/// [`CalibrationError::ConvergenceFailure`] instead.
#[derive(Debug, Clone)]
pub struct CalibrationResult {
    iterations: usize,
    residual_norm: f64,
    residuals: Vec<f64>,
    converged: bool,
}

impl CalibrationResult {
    /// Number of Newton iterations performed.
    #[inline]
    pub fn iterations(&self) -> usize {
        self.iterations
    }

    /// Infinity norm of the final residual vector, in rate units.
    #[inline]
    pub fn residual_norm(&self) -> f64 {
        self.residual_norm
    }

    /// Final residual per instrument, in rate units.
    #[inline]
    pub fn residuals(&self) -> &[f64] {
        &self.residuals
    }

    /// Whether the run converged.
    #[inline]
    pub fn converged(&self) -> bool {
        self.converged
    }
}

/// Calibrates a discount curve so that a set of par swaps reprices to
/// quoted market rates.
///
/// The solver owns the curve and the calibration set. `calibrate`
/// iterates a damped Newton method over every free node discount
/// factor simultaneously: residuals are par-rate differences, the
/// Jacobian comes from relative finite-difference bumps of the node
/// values, the Newton step is a dense linear solve, and a backtracking
/// line search halves the step while the residual norm fails to
/// decrease.
///
/// On success the owned curve holds the converged node values and is
/// marked calibrated, and the Jacobian evaluated at the solution is
/// retained for the risk layer. On failure the owned curve keeps its
/// uncalibrated state.
///
/// One instrument per free node is required (a square system); the
/// instrument set is repriced against the curve being calibrated for
/// both discounting and forecasting.
#[derive(Debug, Clone)]
pub struct CurveSolver {
    curve: DiscountCurve<f64>,
    instruments: Vec<CalibrationInstrument>,
    config: CalibrationConfig,
    result: Option<CalibrationResult>,
    jacobian: Option<Vec<Vec<f64>>>,
}

impl CurveSolver {
    /// Create a solver for a curve and its calibration set.
    pub fn new(
        curve: DiscountCurve<f64>,
        instruments: Vec<CalibrationInstrument>,
        config: CalibrationConfig,
    ) -> Self {
        Self {
            curve,
            instruments,
            config,
            result: None,
            jacobian: None,
        }
    }

    /// Returns the curve: calibrated after a successful `calibrate`,
    /// uncalibrated otherwise.
    #[inline]
    pub fn curve(&self) -> &DiscountCurve<f64> {
        &self.curve
    }

    /// Returns the calibration instruments.
    #[inline]
    pub fn instruments(&self) -> &[CalibrationInstrument] {
        &self.instruments
    }

    /// Returns the configuration.
    #[inline]
    pub fn config(&self) -> &CalibrationConfig {
        &self.config
    }

    /// Returns the last successful calibration result, if any.
    #[inline]
    pub fn result(&self) -> Option<&CalibrationResult> {
        self.result.as_ref()
    }

    /// Jacobian `∂(par rate)/∂(node DF)` evaluated at the converged
    /// solution, row per instrument, column per free node.
    ///
    /// Present only after a successful `calibrate`; reused by the risk
    /// layer to map instrument gradients into market-rate space.
    #[inline]
    pub fn calibration_jacobian(&self) -> Option<&[Vec<f64>]> {
        self.jacobian.as_deref()
    }

    /// Whether the owned curve has been calibrated.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.curve.is_calibrated()
    }

    /// Run the Newton iteration until the residual infinity norm drops
    /// below the configured tolerance.
    ///
    /// # Errors
    ///
    /// - `CalibrationError::Underdetermined` unless there is exactly
    ///   one instrument per free curve node
    /// - `CalibrationError::SingularJacobian` when the linear solve
    ///   breaks down
    /// - `CalibrationError::ConvergenceFailure` when the iteration cap
    ///   is hit or the line search stalls; carries the final residuals
    /// - `CalibrationError::Pricing` for structural pricing problems
    pub fn calibrate(&mut self) -> Result<CalibrationResult, CalibrationError> {
        let free_nodes = self.curve.num_nodes() - 1;
        if self.instruments.len() != free_nodes {
            return Err(CalibrationError::Underdetermined {
                instruments: self.instruments.len(),
                free_nodes,
            });
        }

        // Working copy prices as calibrated during iteration; it is
        // never exposed, and the owned curve stays untouched until
        // convergence.
        let mut working = self.curve.clone();
        working.mark_calibrated();

        let mut f = Self::residuals(&working, &self.instruments)?;
        let mut norm = inf_norm(&f);
        let mut iterations = 0;

        while norm >= self.config.tolerance {
            if iterations >= self.config.max_iterations || !norm.is_finite() {
                warn!(iterations, residual_norm = norm, "calibration failed to converge");
                return Err(CalibrationError::ConvergenceFailure {
                    iterations,
                    residual_norm: norm,
                    residuals: f,
                });
            }

            let jacobian = self.jacobian(&working, &f, iterations)?;
            let rhs: Vec<f64> = f.iter().map(|r| -r).collect();
            let step = solve_linear_system(&jacobian, &rhs).ok_or(
                CalibrationError::SingularJacobian {
                    iteration: iterations,
                },
            )?;

            let mut lambda = 1.0;
            let mut advanced = false;
            for _ in 0..=self.config.max_backtracks {
                if let Some((candidate, f_new, norm_new)) =
                    self.try_step(&working, &step, lambda)?
                {
                    if norm_new < norm {
                        working = candidate;
                        f = f_new;
                        norm = norm_new;
                        advanced = true;
                        break;
                    }
                }
                lambda *= 0.5;
            }

            iterations += 1;
            debug!(iteration = iterations, residual_norm = norm, lambda, "newton step");

            if !advanced {
                warn!(iterations, residual_norm = norm, "calibration stalled in line search");
                return Err(CalibrationError::ConvergenceFailure {
                    iterations,
                    residual_norm: norm,
                    residuals: f,
                });
            }
        }

        // Retain the Jacobian at the converged node values for the
        // risk layer.
        let jacobian = self.jacobian(&working, &f, iterations)?;

        info!(iterations, residual_norm = norm, "calibration converged");

        self.curve = working;
        self.jacobian = Some(jacobian);
        let result = CalibrationResult {
            iterations,
            residual_norm: norm,
            residuals: f,
            converged: true,
        };
        self.result = Some(result.clone());
        Ok(result)
    }

    /// Par-rate residual per instrument against the given curve state.
    fn residuals(
        curve: &DiscountCurve<f64>,
        instruments: &[CalibrationInstrument],
    ) -> Result<Vec<f64>, PricingError> {
        instruments
            .iter()
            .map(|inst| {
                pricing::par_rate(inst.swap(), curve, curve).map(|par| par - inst.target_rate())
            })
            .collect()
    }

    /// Finite-difference Jacobian: bump each free node DF by a
    /// relative amount and reprice every instrument.
    ///
    /// Columns are independent and run through rayon when the
    /// `parallel` feature is enabled; each column works on its own
    /// curve copy and results merge by column index.
    fn jacobian(
        &self,
        working: &DiscountCurve<f64>,
        f_base: &[f64],
        iteration: usize,
    ) -> Result<Vec<Vec<f64>>, CalibrationError> {
        let n = f_base.len();
        let bump = self.config.bump;

        let column = |j: usize| -> Result<Vec<f64>, PricingError> {
            let mut bumped = working.clone();
            let df = working.node_values()[j + 1];
            let delta = df * bump;
            if bumped.set_node_value(j + 1, df + delta).is_err() {
                return Ok(vec![0.0; n]);
            }
            let f_bumped = Self::residuals(&bumped, &self.instruments)?;
            Ok(f_bumped
                .iter()
                .zip(f_base)
                .map(|(fb, f0)| (fb - f0) / delta)
                .collect())
        };

        #[cfg(feature = "parallel")]
        let columns: Result<Vec<Vec<f64>>, PricingError> =
            (0..n).into_par_iter().map(column).collect();
        #[cfg(not(feature = "parallel"))]
        let columns: Result<Vec<Vec<f64>>, PricingError> = (0..n).map(column).collect();

        let columns = columns.map_err(|e| {
            if Self::is_transient(&e) {
                CalibrationError::ConvergenceFailure {
                    iterations: iteration,
                    residual_norm: f64::NAN,
                    residuals: f_base.to_vec(),
                }
            } else {
                e.into()
            }
        })?;

        let mut jacobian = vec![vec![0.0; n]; n];
        for (j, column) in columns.iter().enumerate() {
            for (i, value) in column.iter().enumerate() {
                jacobian[i][j] = *value;
            }
        }
        Ok(jacobian)
    }

    /// Apply a damped Newton step to a fresh candidate curve and
    /// evaluate its residuals.
    ///
    /// Returns `None` when the step is rejected: a node DF would leave
    /// the positive domain, or repricing produced a non-finite value.
    /// Structural pricing errors propagate.
    #[allow(clippy::type_complexity)]
    fn try_step(
        &self,
        working: &DiscountCurve<f64>,
        step: &[f64],
        lambda: f64,
    ) -> Result<Option<(DiscountCurve<f64>, Vec<f64>, f64)>, CalibrationError> {
        let mut candidate = working.clone();
        for (j, dx) in step.iter().enumerate() {
            let new_df = working.node_values()[j + 1] + lambda * dx;
            if new_df <= 0.0
                || !new_df.is_finite()
                || candidate.set_node_value(j + 1, new_df).is_err()
            {
                return Ok(None);
            }
        }

        match Self::residuals(&candidate, &self.instruments) {
            Ok(f_new) => {
                let norm = inf_norm(&f_new);
                if norm.is_finite() {
                    Ok(Some((candidate, f_new, norm)))
                } else {
                    Ok(None)
                }
            }
            Err(e) if Self::is_transient(&e) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    /// Non-finite pricing outcomes are iteration noise, not structural
    /// failures.
    fn is_transient(error: &PricingError) -> bool {
        matches!(
            error,
            PricingError::NonFinite { .. } | PricingError::Curve(CurveError::NonFinite { .. })
        )
    }
}
