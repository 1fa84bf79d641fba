//! Accrual schedule generation for scheduled instruments.
//!
//! This module provides:
//! - `Frequency`: payment frequency enumeration
//! - `Period`: a single accrual period with its payment date
//! - `Schedule` / `ScheduleBuilder`: calendar-aware schedule generation
//! - `ScheduleError`: structured errors raised at build time
//!
//! All date and calendar problems surface when a schedule is built,
//! never later during pricing.

mod error;
mod frequency;
mod period;
mod schedule;

pub use error::ScheduleError;
pub use frequency::Frequency;
pub use period::Period;
pub use schedule::{Schedule, ScheduleBuilder};
