//! Integration tests for the risk engine.
//!
//! These tests calibrate a small par-swap ladder, then verify delta
//! and gamma behaviour against analytic anchors: the delta sum check
//! against PV01, locality of sensitivities, and read-only probing.

use approx::assert_relative_eq;
use rates_core::calendar::{Calendar, CalendarId};
use rates_core::curves::{DiscountCurve, Interpolation};
use rates_core::types::tenor::{Tenor, TenorUnit};
use rates_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
use rates_instruments::swap::{pricing, InterestRateSwap, SwapConventions, SwapDirection};
use rates_risk::{delta, gamma};
use rates_solver::{CalibrationConfig, CalibrationInstrument, CurveSolver};

const QUOTES: &[f64] = &[0.0480, 0.0462, 0.0435];

fn as_of() -> Date {
    Date::from_ymd(2025, 1, 7).unwrap()
}

/// Annual ladder: 1Y, 2Y, 3Y.
fn pillar_dates() -> Vec<Date> {
    let calendar = Calendar::get(CalendarId::NewYork);
    (1..=3)
        .map(|y| {
            calendar
                .advance(
                    as_of(),
                    Tenor::new(y, TenorUnit::Years).unwrap(),
                    BusinessDayConvention::ModifiedFollowing,
                )
                .unwrap()
        })
        .collect()
}

fn par_swap(notional: f64, fixed_rate: f64, end: Date) -> InterestRateSwap<f64> {
    InterestRateSwap::from_conventions(
        notional,
        fixed_rate,
        0.0,
        as_of(),
        end,
        SwapDirection::PayFixed,
        &SwapConventions::usd_irs(),
    )
    .unwrap()
}

fn calibrated_solver() -> CurveSolver {
    let pillars = pillar_dates();
    let curve = DiscountCurve::new(
        as_of(),
        pillars.clone(),
        DayCountConvention::Act365Fixed,
        Interpolation::LogLinear,
    )
    .unwrap();

    let instruments = pillars
        .iter()
        .zip(["1Y", "2Y", "3Y"])
        .zip(QUOTES)
        .map(|((&end, label), &rate)| {
            CalibrationInstrument::new(label, par_swap(1.0, rate, end), rate)
        })
        .collect();

    let mut solver = CurveSolver::new(curve, instruments, CalibrationConfig::default());
    solver.calibrate().expect("ladder calibration converges");
    solver
}

// ============================================================================
// Delta Tests
// ============================================================================

#[test]
fn test_delta_labels_follow_calibration_set() {
    let solver = calibrated_solver();
    let swap = par_swap(1_000_000.0, QUOTES[1], pillar_dates()[1]);

    let report = delta(&swap, &solver).unwrap();
    assert_eq!(report.labels(), ["1Y", "2Y", "3Y"]);
    assert_eq!(report.values().len(), 3);
}

#[test]
fn test_delta_sum_approximates_pv01() {
    let solver = calibrated_solver();
    // At-par payer: NPV response to a parallel quote rise equals the
    // (negated) fixed-rate PV01
    let swap = par_swap(1_000_000.0, QUOTES[1], pillar_dates()[1]);

    let report = delta(&swap, &solver).unwrap();
    let pv01 = pricing::pv01(&swap, solver.curve()).unwrap();

    assert_relative_eq!(report.total(), -pv01, max_relative = 1e-3);
    // Payer gains when market rates rise
    assert!(report.total() > 0.0);
    assert!(pv01 < 0.0);
}

#[test]
fn test_delta_is_local_to_spanning_quotes() {
    let solver = calibrated_solver();
    // A 1Y swap sees only nodes up to 1Y; quotes beyond cannot move it
    let swap = par_swap(1_000_000.0, QUOTES[0], pillar_dates()[0]);

    let report = delta(&swap, &solver).unwrap();
    let own = report.get("1Y").unwrap();
    assert!(own.abs() > 1.0, "1Y delta should be material, got {}", own);
    assert!(report.get("2Y").unwrap().abs() < 1e-4);
    assert!(report.get("3Y").unwrap().abs() < 1e-4);
}

#[test]
fn test_delta_scales_with_notional() {
    let solver = calibrated_solver();
    let small = par_swap(1_000_000.0, 0.05, pillar_dates()[2]);
    let big = par_swap(10_000_000.0, 0.05, pillar_dates()[2]);

    let report_small = delta(&small, &solver).unwrap();
    let report_big = delta(&big, &solver).unwrap();

    for (s, b) in report_small.values().iter().zip(report_big.values()) {
        assert_relative_eq!(10.0 * s, *b, max_relative = 1e-6, epsilon = 1e-8);
    }
}

#[test]
fn test_delta_leaves_solver_untouched() {
    let solver = calibrated_solver();
    let before = solver.curve().node_values().to_vec();

    let swap = par_swap(1_000_000.0, QUOTES[2], pillar_dates()[2]);
    delta(&swap, &solver).unwrap();

    assert_eq!(solver.curve().node_values(), before.as_slice());
    assert!(solver.curve().is_calibrated());
}

#[test]
fn test_delta_requires_calibrated_solver() {
    let pillars = pillar_dates();
    let curve = DiscountCurve::new(
        as_of(),
        pillars.clone(),
        DayCountConvention::Act365Fixed,
        Interpolation::LogLinear,
    )
    .unwrap();
    let instruments = pillars
        .iter()
        .zip(["1Y", "2Y", "3Y"])
        .zip(QUOTES)
        .map(|((&end, label), &rate)| {
            CalibrationInstrument::new(label, par_swap(1.0, rate, end), rate)
        })
        .collect();
    let solver = CurveSolver::new(curve, instruments, CalibrationConfig::default());

    let swap = par_swap(1_000_000.0, QUOTES[1], pillars[1]);
    let err = delta(&swap, &solver).unwrap_err();
    assert!(err.is_not_calibrated());

    let err = gamma(&swap, &solver).unwrap_err();
    assert!(err.is_not_calibrated());
}

// ============================================================================
// Gamma Tests
// ============================================================================

#[test]
fn test_gamma_matrix_shape_and_symmetry() {
    let solver = calibrated_solver();
    let swap = par_swap(1_000_000.0, QUOTES[1], pillar_dates()[1]);

    let report = gamma(&swap, &solver).unwrap();
    assert_eq!(report.len(), 3);
    assert_eq!(report.labels(), ["1Y", "2Y", "3Y"]);

    for i in 0..report.len() {
        for j in 0..report.len() {
            assert_eq!(report.value(i, j), report.value(j, i));
            assert!(report.value(i, j).is_finite());
        }
    }
}

#[test]
fn test_gamma_is_second_order_small() {
    let solver = calibrated_solver();
    let swap = par_swap(1_000_000.0, QUOTES[1], pillar_dates()[1]);

    let delta_report = delta(&swap, &solver).unwrap();
    let gamma_report = gamma(&swap, &solver).unwrap();

    // Per (1bp)², curvature is orders of magnitude below the 1bp delta
    let max_delta = delta_report
        .values()
        .iter()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));
    let max_gamma = gamma_report
        .matrix()
        .iter()
        .flatten()
        .fold(0.0f64, |acc, v| acc.max(v.abs()));

    assert!(max_delta > 1.0);
    assert!(
        max_gamma < max_delta / 100.0,
        "gamma {} should be far below delta {}",
        max_gamma,
        max_delta
    );
}

#[test]
fn test_gamma_leaves_solver_untouched() {
    let solver = calibrated_solver();
    let before = solver.curve().node_values().to_vec();

    let swap = par_swap(1_000_000.0, QUOTES[0], pillar_dates()[0]);
    gamma(&swap, &solver).unwrap();

    assert_eq!(solver.curve().node_values(), before.as_slice());
}

// ============================================================================
// Consistency: Chain Rule vs Direct Recalibration
// ============================================================================

#[test]
fn test_delta_matches_bump_and_recalibrate() {
    let solver = calibrated_solver();
    let swap = par_swap(1_000_000.0, 0.05, pillar_dates()[2]);
    let report = delta(&swap, &solver).unwrap();

    // Directly recalibrate with the 2Y quote bumped one basis point
    // and compare the NPV move against the chain-rule delta
    let pillars = pillar_dates();
    let fresh_curve = DiscountCurve::new(
        as_of(),
        pillars.clone(),
        DayCountConvention::Act365Fixed,
        Interpolation::LogLinear,
    )
    .unwrap();
    let bumped_instruments = pillars
        .iter()
        .zip(["1Y", "2Y", "3Y"])
        .zip(QUOTES)
        .map(|((&end, label), &rate)| {
            let target = if label == "2Y" { rate + 1e-4 } else { rate };
            CalibrationInstrument::new(label, par_swap(1.0, rate, end), target)
        })
        .collect();
    let mut bumped_solver =
        CurveSolver::new(fresh_curve, bumped_instruments, CalibrationConfig::default());
    bumped_solver.calibrate().unwrap();

    let base_npv = pricing::swap_npv(&swap, solver.curve(), solver.curve()).unwrap();
    let bumped_npv =
        pricing::swap_npv(&swap, bumped_solver.curve(), bumped_solver.curve()).unwrap();

    let direct = bumped_npv - base_npv;
    let chain_rule = report.get("2Y").unwrap();
    assert_relative_eq!(chain_rule, direct, max_relative = 5e-3, epsilon = 1e-4);
}
