//! Calibration configuration.

/// Configuration for the Newton calibration loop.
///
/// The defaults are conservative: a tight residual tolerance, a
/// moderate iteration cap, a small relative finite-difference bump and
/// a backtracking line search that halves the step while the residual
/// norm fails to improve.
///
/// # Examples
///
/// ```
/// use rates_solver::CalibrationConfig;
///
/// let config = CalibrationConfig::default();
/// assert_eq!(config.max_iterations, 50);
///
/// let tight = CalibrationConfig::high_precision();
/// assert!(tight.tolerance < config.tolerance);
///
/// let custom = CalibrationConfig::default().with_tolerance(1e-8);
/// assert_eq!(custom.tolerance, 1e-8);
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationConfig {
    /// Convergence tolerance on the residual infinity norm, in rate
    /// units. Default: 1e-10.
    pub tolerance: f64,

    /// Maximum number of Newton iterations. Default: 50.
    pub max_iterations: usize,

    /// Relative bump applied to node discount factors when building
    /// the finite-difference Jacobian. Default: 1e-4.
    pub bump: f64,

    /// Maximum number of step halvings per iteration before the
    /// iteration is declared stalled. Default: 8.
    pub max_backtracks: usize,
}

impl Default for CalibrationConfig {
    fn default() -> Self {
        Self {
            tolerance: 1e-10,
            max_iterations: 50,
            bump: 1e-4,
            max_backtracks: 8,
        }
    }
}

impl CalibrationConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighter tolerance (1e-12) and a higher iteration cap (200).
    pub fn high_precision() -> Self {
        Self {
            tolerance: 1e-12,
            max_iterations: 200,
            ..Self::default()
        }
    }

    /// Relaxed tolerance (1e-8) and a lower iteration cap (25), for
    /// interactive use.
    pub fn fast() -> Self {
        Self {
            tolerance: 1e-8,
            max_iterations: 25,
            ..Self::default()
        }
    }

    /// Set the convergence tolerance.
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Set the maximum number of iterations.
    pub fn with_max_iterations(mut self, max_iterations: usize) -> Self {
        self.max_iterations = max_iterations;
        self
    }

    /// Set the relative finite-difference bump.
    pub fn with_bump(mut self, bump: f64) -> Self {
        self.bump = bump;
        self
    }

    /// Set the maximum number of backtracking halvings.
    pub fn with_max_backtracks(mut self, max_backtracks: usize) -> Self {
        self.max_backtracks = max_backtracks;
        self
    }
}
