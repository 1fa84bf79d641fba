//! Instrument and pricing error types.

use rates_core::types::error::CurveError;
use rates_core::types::time::Date;
use thiserror::Error;

use crate::schedules::ScheduleError;

/// Errors from instrument construction.
///
/// Raised when a swap specification is malformed; a successfully
/// constructed instrument is always priceable against a calibrated
/// curve.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum InstrumentError {
    /// Notional must be non-zero and finite.
    #[error("Invalid notional: {value}")]
    InvalidNotional {
        /// The rejected notional
        value: f64,
    },

    /// Effective date must be before the termination date.
    #[error("Effective date {effective} must be before termination date {termination}")]
    InvalidDateRange {
        /// The effective date
        effective: Date,
        /// The termination date
        termination: Date,
    },

    /// Schedule generation failed.
    #[error("Schedule error: {0}")]
    Schedule(#[from] ScheduleError),
}

impl InstrumentError {
    /// Check if this is an invalid notional error.
    pub fn is_invalid_notional(&self) -> bool {
        matches!(self, Self::InvalidNotional { .. })
    }
}

/// Errors from pricing functions.
///
/// Curve failures (uncalibrated curve, date before as-of, non-finite
/// interpolation) propagate unchanged; there is no silent fallback to a
/// unit discount factor.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum PricingError {
    /// A curve query failed.
    #[error("Curve error: {0}")]
    Curve(#[from] CurveError),

    /// Par rate is undefined because the fixed-leg annuity vanishes.
    #[error("Fixed-leg annuity is zero; par rate is undefined")]
    ZeroAnnuity,

    /// A pricing quantity came out non-finite.
    #[error("Non-finite value computed for {what}")]
    NonFinite {
        /// Which quantity failed
        what: &'static str,
    },
}

impl PricingError {
    /// Check if the underlying cause is an uncalibrated curve.
    pub fn is_not_calibrated(&self) -> bool {
        matches!(self, Self::Curve(e) if e.is_not_calibrated())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_instrument_error_display() {
        let err = InstrumentError::InvalidNotional { value: 0.0 };
        assert!(format!("{}", err).contains("notional"));
        assert!(err.is_invalid_notional());
    }

    #[test]
    fn test_schedule_error_converts() {
        let err: InstrumentError = ScheduleError::MissingField { field: "start" }.into();
        assert!(matches!(err, InstrumentError::Schedule(_)));
    }

    #[test]
    fn test_pricing_error_not_calibrated() {
        let err: PricingError = CurveError::NotCalibrated.into();
        assert!(err.is_not_calibrated());
        assert!(!PricingError::ZeroAnnuity.is_not_calibrated());
    }
}
