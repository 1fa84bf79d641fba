//! Calibration error types.

use rates_instruments::swap::PricingError;
use thiserror::Error;

/// Errors that can occur during curve calibration.
///
/// A failed calibration never leaves a partially converged curve
/// exposed as calibrated: the solver's owned curve keeps its
/// uncalibrated state and the error carries the diagnostics.
///
/// # Examples
///
/// ```
/// use rates_solver::CalibrationError;
///
/// let err = CalibrationError::ConvergenceFailure {
///     iterations: 50,
///     residual_norm: 2.5e-4,
///     residuals: vec![2.5e-4, -1.0e-5],
/// };
/// assert!(err.is_convergence_failure());
/// assert!(format!("{}", err).contains("50"));
/// ```
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalibrationError {
    /// The Newton iteration did not reach the tolerance.
    ///
    /// Carries the last residual vector so callers can see how far
    /// each instrument was from its target.
    #[error(
        "Calibration failed to converge after {iterations} iterations: residual norm = {residual_norm}"
    )]
    ConvergenceFailure {
        /// Iterations performed before giving up
        iterations: usize,
        /// Infinity norm of the final residual vector
        residual_norm: f64,
        /// Final residual per instrument, in rate units
        residuals: Vec<f64>,
    },

    /// The finite-difference Jacobian is singular.
    ///
    /// A well-posed calibration needs instruments with distinct
    /// maturities, one per free curve node; duplicated instruments or
    /// instruments insensitive to every node produce a rank-deficient
    /// system.
    #[error("Singular Jacobian at iteration {iteration}: calibration set is rank-deficient")]
    SingularJacobian {
        /// Iteration at which the linear solve broke down
        iteration: usize,
    },

    /// Instrument count does not match the number of free curve nodes.
    #[error("Calibration needs one instrument per free node: {instruments} instruments for {free_nodes} free nodes")]
    Underdetermined {
        /// Number of calibration instruments supplied
        instruments: usize,
        /// Number of free (non-as-of) curve nodes
        free_nodes: usize,
    },

    /// Repricing an instrument failed.
    ///
    /// Raised for structural pricing problems (for example a curve
    /// whose pillars do not span an instrument); transient non-finite
    /// values during iteration surface as `ConvergenceFailure`.
    #[error("Pricing error during calibration: {0}")]
    Pricing(#[from] PricingError),
}

impl CalibrationError {
    /// Check if this is a convergence failure.
    pub fn is_convergence_failure(&self) -> bool {
        matches!(self, Self::ConvergenceFailure { .. })
    }

    /// Check if this is a singular Jacobian error.
    pub fn is_singular_jacobian(&self) -> bool {
        matches!(self, Self::SingularJacobian { .. })
    }

    /// Check if this is an underdetermined system error.
    pub fn is_underdetermined(&self) -> bool {
        matches!(self, Self::Underdetermined { .. })
    }

    /// The final residual vector of a convergence failure, if any.
    pub fn residuals(&self) -> Option<&[f64]> {
        match self {
            Self::ConvergenceFailure { residuals, .. } => Some(residuals),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convergence_failure_carries_residuals() {
        let err = CalibrationError::ConvergenceFailure {
            iterations: 50,
            residual_norm: 1e-3,
            residuals: vec![1e-3, -2e-4],
        };
        assert!(err.is_convergence_failure());
        assert_eq!(err.residuals().unwrap().len(), 2);
    }

    #[test]
    fn test_singular_jacobian_display() {
        let err = CalibrationError::SingularJacobian { iteration: 3 };
        assert!(err.is_singular_jacobian());
        assert!(!err.is_convergence_failure());
        assert!(err.residuals().is_none());
        assert!(format!("{}", err).contains("rank-deficient"));
    }

    #[test]
    fn test_underdetermined_display() {
        let err = CalibrationError::Underdetermined {
            instruments: 3,
            free_nodes: 5,
        };
        assert!(err.is_underdetermined());
        let text = format!("{}", err);
        assert!(text.contains('3') && text.contains('5'));
    }

    #[test]
    fn test_pricing_error_converts() {
        let err: CalibrationError = PricingError::ZeroAnnuity.into();
        assert!(matches!(err, CalibrationError::Pricing(_)));
    }
}
