//! Schedule generation error types.

use rates_core::types::error::TenorError;
use rates_core::types::time::Date;
use thiserror::Error;

/// Errors that can occur during schedule generation.
///
/// Raised by `ScheduleBuilder::build`; a successfully built schedule
/// can always be priced without further date errors.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// Start date must be before end date.
    #[error("Start date {start} must be before end date {end}")]
    InvalidDateRange {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Missing required field in builder.
    #[error("Missing required field: {field}")]
    MissingField {
        /// The name of the missing field.
        field: &'static str,
    },

    /// Schedule would generate no periods.
    #[error("Schedule would generate no periods between {start} and {end}")]
    NoPeriods {
        /// The start date.
        start: Date,
        /// The end date.
        end: Date,
    },

    /// Tenor arithmetic failed while rolling out the date grid.
    #[error("Date roll failed: {0}")]
    DateRoll(#[from] TenorError),
}

impl ScheduleError {
    /// Check if this is a missing field error.
    pub fn is_missing_field(&self) -> bool {
        matches!(self, Self::MissingField { .. })
    }

    /// Check if this is an invalid date range error.
    pub fn is_invalid_date_range(&self) -> bool {
        matches!(self, Self::InvalidDateRange { .. })
    }
}
