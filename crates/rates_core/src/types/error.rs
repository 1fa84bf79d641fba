//! Error types for structured error handling.
//!
//! This module provides:
//! - `DateError`: Errors from date construction and parsing
//! - `TenorError`: Errors from tenor string parsing and arithmetic
//! - `CalendarError`: Errors from calendar lookup
//! - `CurveError`: Errors from discount curve construction and queries

use std::fmt;
use thiserror::Error;

/// Date-related errors.
///
/// # Variants
/// - `InvalidDate`: Invalid date components (e.g., February 30th)
/// - `ParseError`: Failed to parse date string
///
/// # Examples
/// ```
/// use rates_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    ParseError(String),
}

impl fmt::Display for DateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateError::InvalidDate { year, month, day } => {
                write!(f, "Invalid date: {}-{}-{}", year, month, day)
            }
            DateError::ParseError(msg) => write!(f, "Date parse error: {}", msg),
        }
    }
}

impl std::error::Error for DateError {}

/// Tenor-related errors.
///
/// # Variants
/// - `InvalidTenor`: Malformed tenor string (e.g., "3X", "", "M3")
/// - `DateOverflow`: Tenor arithmetic left the supported date range
///
/// # Examples
/// ```
/// use rates_core::types::TenorError;
///
/// let err = TenorError::invalid("3X");
/// assert!(format!("{}", err).contains("3X"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TenorError {
    /// Malformed tenor string.
    #[error("Invalid tenor: {input}")]
    InvalidTenor {
        /// The offending input string
        input: String,
    },

    /// Tenor arithmetic overflowed the supported date range.
    #[error("Date overflow applying tenor: {reason}")]
    DateOverflow {
        /// Description of the overflow
        reason: String,
    },
}

impl TenorError {
    /// Create an invalid tenor error.
    pub fn invalid(input: impl Into<String>) -> Self {
        Self::InvalidTenor {
            input: input.into(),
        }
    }

    /// Check if this is an invalid tenor error.
    pub fn is_invalid_tenor(&self) -> bool {
        matches!(self, Self::InvalidTenor { .. })
    }
}

/// Calendar-related errors.
///
/// # Variants
/// - `UnknownCalendar`: Calendar name not present in the registry
///
/// # Examples
/// ```
/// use rates_core::types::CalendarError;
///
/// let err = CalendarError::unknown("mars");
/// assert!(format!("{}", err).contains("mars"));
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CalendarError {
    /// Calendar identifier not registered.
    #[error("Unknown calendar: {name}")]
    UnknownCalendar {
        /// The unrecognised calendar name
        name: String,
    },
}

impl CalendarError {
    /// Create an unknown calendar error.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self::UnknownCalendar { name: name.into() }
    }
}

/// Discount curve errors.
///
/// Provides structured error handling for curve construction, node
/// mutation and discount factor queries.
///
/// # Variants
///
/// - `EmptyCurve`: No pillar dates supplied
/// - `NodesNotIncreasing`: Node dates not strictly increasing
/// - `DateBeforeAsOf`: Discount factor queried before the as-of date
/// - `NotCalibrated`: Discount factor queried on an uncalibrated curve
/// - `NegativeTime`: Year-fraction query before the as-of time
/// - `DatesOutOfOrder`: Forward/zero rate queried over an inverted date pair
/// - `AsOfNodeImmutable`: Attempt to overwrite the as-of node value
/// - `NodeIndexOutOfRange`: Node index beyond the arena
/// - `InvalidNodeValue`: Non-positive or non-finite discount factor
/// - `NonFinite`: Interpolation produced NaN or infinity
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Curve constructed with no pillar dates.
    #[error("Cannot create curve with no nodes")]
    EmptyCurve,

    /// Node dates must be strictly increasing after the as-of date.
    #[error("Node dates must be strictly increasing (at index {index})")]
    NodesNotIncreasing {
        /// Index of the offending node
        index: usize,
    },

    /// Discount factor queried for a date before the as-of date.
    #[error("Date {date} is before the curve as-of date {as_of}")]
    DateBeforeAsOf {
        /// The queried date (ISO 8601)
        date: String,
        /// The curve as-of date (ISO 8601)
        as_of: String,
    },

    /// Discount factor queried on a curve that has not been calibrated.
    #[error("Curve has not been calibrated; raw node values are available via node_values()")]
    NotCalibrated,

    /// Discount factor queried at a negative year fraction.
    #[error("Time {t} is before the curve as-of time")]
    NegativeTime {
        /// Query time in year fractions
        t: f64,
    },

    /// A date pair was supplied in the wrong order.
    #[error("Dates out of order: {start} is not before {end}")]
    DatesOutOfOrder {
        /// The start date (ISO 8601)
        start: String,
        /// The end date (ISO 8601)
        end: String,
    },

    /// The as-of node holds a fixed discount factor of 1.0.
    #[error("Node 0 is the as-of date and its discount factor is fixed at 1.0")]
    AsOfNodeImmutable,

    /// Node index beyond the node arena.
    #[error("Node index {index} out of range (curve has {count} nodes)")]
    NodeIndexOutOfRange {
        /// The requested index
        index: usize,
        /// Number of nodes in the curve
        count: usize,
    },

    /// Node discount factors must be positive and finite.
    #[error("Invalid discount factor {value} at node {index}")]
    InvalidNodeValue {
        /// Node index
        index: usize,
        /// The rejected value
        value: f64,
    },

    /// Interpolation produced a non-finite value.
    #[error("Non-finite discount factor produced at t = {t}")]
    NonFinite {
        /// Query time in year fractions
        t: f64,
    },
}

impl CurveError {
    /// Check if this is a date-ordering error.
    pub fn is_date_before_as_of(&self) -> bool {
        matches!(self, Self::DateBeforeAsOf { .. })
    }

    /// Check if this is a not-calibrated error.
    pub fn is_not_calibrated(&self) -> bool {
        matches!(self, Self::NotCalibrated)
    }
}
