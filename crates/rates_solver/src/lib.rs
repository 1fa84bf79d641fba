//! # rates_solver: Global Curve Calibration for rates-rs
//!
//! ## Calibration Layer Role
//!
//! rates_solver sits between the instrument layer and the risk layer,
//! solving the inverse problem of curve construction: find the node
//! discount factors under which a set of market instruments reprices
//! to its quoted rates.
//!
//! The engine is a damped Newton iteration over all free curve nodes
//! simultaneously:
//! 1. Residuals: par rate minus target for every instrument
//! 2. Jacobian by finite differences, one column per free node
//! 3. Dense linear solve for the Newton step
//! 4. Backtracking line search on the residual norm
//!
//! On convergence the solver retains the Jacobian for reuse by the
//! risk layer, so delta queries do not re-differentiate the curve.
//!
//! The solver works in `f64`; generic pricing stays in the lower
//! layers.
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
//!     .zip(["1Y", "2Y"])
//!     .zip([0.031, 0.033])
//!     .map(|((&end, label), rate)| {
//!         let swap = InterestRateSwap::from_conventions(
//!             1.0, rate, 0.0, as_of, end, SwapDirection::PayFixed, &conventions,
//!         ).unwrap();
//!         CalibrationInstrument::new(label, swap, rate)
//!     })
//!     .collect();
//!
//! let mut solver = CurveSolver::new(curve, instruments, CalibrationConfig::default());
//! let result = solver.calibrate().unwrap();
//! assert!(result.converged());
//! assert!(solver.curve().is_calibrated());
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

mod config;
mod error;
mod instrument;
mod solver;

pub use config::CalibrationConfig;
pub use error::CalibrationError;
pub use instrument::CalibrationInstrument;
pub use solver::{CalibrationResult, CurveSolver};
