//! # rates_risk: Market-Rate Sensitivities for rates-rs
//!
//! ## Risk Layer Role
//!
//! rates_risk sits on top of the solver and answers the question a
//! calibrated curve exists for: how does an instrument's value move
//! when the market quotes behind the curve move?
//!
//! - [`delta`]: first-order sensitivity per calibration instrument,
//!   computed by bumping node discount factors on a cloned curve and
//!   pushing the gradient through the solver's retained calibration
//!   Jacobian. No re-differentiation, no recalibration.
//! - [`gamma`]: second-order cross-sensitivities, computed by bumping
//!   pairs of market quotes and recalibrating a fresh solver per
//!   scenario.
//!
//! Both are read-only with respect to the solver: every probe works on
//! its own copy, so the converged curve is never perturbed.
//!
//! ## Usage Example
//!
//! ```
//! use rates_core::curves::{DiscountCurve, Interpolation};
//! use rates_core::types::time::{Date, DayCountConvention};
//! use rates_instruments::swap::{InterestRateSwap, SwapConventions, SwapDirection};
//! use rates_solver::{CalibrationConfig, CalibrationInstrument, CurveSolver};
//!
//! let as_of = Date::from_ymd(2025, 1, 7).unwrap();
//! let pillars = vec![
//!     Date::from_ymd(2026, 1, 7).unwrap(),
//!     Date::from_ymd(2027, 1, 7).unwrap(),
//! ];
//! let curve = DiscountCurve::new(
//!     as_of,
//!     pillars.clone(),
//!     DayCountConvention::Act365Fixed,
//!     Interpolation::LogLinear,
//! ).unwrap();
//!
//! let conventions = SwapConventions::usd_irs();
//! let instruments: Vec<CalibrationInstrument> = pillars
//!     .iter()
//!     .zip([("1Y", 0.031), ("2Y", 0.033)])
//!     .map(|(&end, (label, rate))| {
//!         let swap = InterestRateSwap::from_conventions(
//!             1.0, rate, 0.0, as_of, end, SwapDirection::PayFixed, &conventions,
//!         ).unwrap();
//!         CalibrationInstrument::new(label, swap, rate)
//!     })
//!     .collect();
//!
//! let mut solver = CurveSolver::new(curve, instruments, CalibrationConfig::default());
//! solver.calibrate().unwrap();
//!
//! let swap = InterestRateSwap::from_conventions(
//!     1_000_000.0, 0.033, 0.0, as_of, pillars[1],
//!     SwapDirection::PayFixed, &conventions,
//! ).unwrap();
//!
//! let report = rates_risk::delta(&swap, &solver).unwrap();
//! assert_eq!(report.labels(), ["1Y", "2Y"]);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod engine;
mod error;
mod report;

pub use engine::{delta, gamma};
pub use error::RiskError;
pub use report::{DeltaReport, GammaReport};
