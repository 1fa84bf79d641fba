//! # rates_core: Foundation for the rates-rs Curve Library
//!
//! ## Foundation Layer Role
//!
//! rates_core is the bottom layer of the workspace, providing:
//! - Time types: `Date`, `DayCountConvention`, `BusinessDayConvention`
//!   (`types::time`)
//! - Tenor parsing and arithmetic: `Tenor` (`types::tenor`)
//! - Currency identifiers: `Currency` (`types::currency`)
//! - Holiday calendars and business-day adjustment (`calendar`)
//! - The calibratable `DiscountCurve` (`curves`)
//! - Dense linear-algebra helpers for calibration (`math::linalg`)
//! - Error types: `DateError`, `TenorError`, `CalendarError`,
//!   `CurveError` (`types::error`)
//!
//! ## Zero Dependency Principle
//!
//! The foundation layer depends on no other rates_* crate, with minimal
//! external dependencies:
//! - num-traits: Traits for generic numerical computation
//! - chrono: Date arithmetic
//! - thiserror: Structured error types
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use rates_core::calendar::{Calendar, CalendarId};
//! use rates_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
//!
//! // Tenor advancement with business-day rolling
//! let cal = Calendar::get(CalendarId::NewYork);
//! let spot = Date::from_ymd(2025, 1, 3).unwrap();
//! let in_3m = cal
//!     .advance(spot, "3M".parse().unwrap(), BusinessDayConvention::ModifiedFollowing)
//!     .unwrap();
//! assert!(in_3m > spot);
//!
//! // Year fractions
//! let yf = DayCountConvention::Act360.year_fraction(spot, in_3m);
//! assert!(yf > 0.2 && yf < 0.3);
//! ```
//!
//! ## Feature Flags
//!
//! - `serde`: Enable serialisation for `Date`, `Tenor`, `Currency`,
//!   `DayCountConvention` and `CalendarId`

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod calendar;
pub mod curves;
pub mod math;
pub mod types;

pub use calendar::{Calendar, CalendarId};
pub use curves::{DiscountCurve, Interpolation};
pub use types::{
    BusinessDayConvention, CalendarError, Currency, CurveError, Date, DateError,
    DayCountConvention, Tenor, TenorError, TenorUnit,
};
