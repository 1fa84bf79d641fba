//! # rates_instruments: Schedules and Vanilla Swaps for rates-rs
//!
//! ## Instrument Layer Role
//!
//! rates_instruments sits on top of `rates_core` and provides:
//! - Accrual schedules with calendar-aware date rolling (`schedules`)
//! - The vanilla fixed-for-float interest rate swap (`swap`)
//! - Typed convention presets for standard markets
//!   (`swap::conventions`)
//! - Pricing functions: leg present values, NPV, par rate, analytic
//!   PV01 and cashflow rows (`swap::pricing`)
//!
//! Instruments are immutable once built and hold no curve references;
//! discount and forecast curves are passed explicitly to the pricing
//! functions.
//!
//! ## Usage Example
//!
//! ```rust
//! use rates_core::types::time::Date;
//! use rates_instruments::swap::{InterestRateSwap, SwapConventions, SwapDirection};
//!
//! let conventions = SwapConventions::usd_irs();
//! let swap: InterestRateSwap<f64> = InterestRateSwap::from_conventions(
//!     100_000_000.0,
//!     0.035,
//!     0.0,
//!     Date::from_ymd(2025, 1, 7).unwrap(),
//!     Date::from_ymd(2027, 1, 7).unwrap(),
//!     SwapDirection::PayFixed,
//!     &conventions,
//! ).unwrap();
//!
//! assert_eq!(swap.fixed_leg().schedule().len(), 2);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for schedules, legs and conventions

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod schedules;
pub mod swap;

pub use schedules::{Frequency, Period, Schedule, ScheduleBuilder, ScheduleError};
pub use swap::{
    FixedLeg, FloatingLeg, InstrumentError, InterestRateSwap, PricingError, RateIndex,
    SwapConventions, SwapDirection,
};
