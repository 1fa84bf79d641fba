//! Risk engine error types.

use rates_core::types::error::CurveError;
use rates_instruments::swap::PricingError;
use rates_solver::CalibrationError;
use thiserror::Error;

/// Errors that can occur during risk computation.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum RiskError {
    /// The solver has not produced a converged calibration.
    #[error("Solver has not been calibrated; run calibrate() before querying risk")]
    SolverNotCalibrated,

    /// The retained calibration Jacobian could not be inverted.
    #[error("Calibration Jacobian is singular; market-rate sensitivities are undefined")]
    SingularJacobian,

    /// Repricing the target instrument failed.
    #[error("Pricing error during risk computation: {0}")]
    Pricing(#[from] PricingError),

    /// A curve probe failed.
    #[error("Curve error during risk computation: {0}")]
    Curve(#[from] CurveError),

    /// A bumped-scenario recalibration failed.
    #[error("Recalibration failed in a bumped scenario: {0}")]
    Recalibration(#[from] CalibrationError),
}

impl RiskError {
    /// Check if this is a not-calibrated error.
    pub fn is_not_calibrated(&self) -> bool {
        matches!(self, Self::SolverNotCalibrated)
    }

    /// Check if this is a singular Jacobian error.
    pub fn is_singular_jacobian(&self) -> bool {
        matches!(self, Self::SingularJacobian)
    }
}
