//! Calibration instruments.

use rates_instruments::swap::InterestRateSwap;

/// One instrument in a calibration set: a labelled par swap and its
/// quoted market rate.
///
/// The label identifies the instrument in risk reports (typically its
/// tenor, "2Y"); the target rate is the market par rate the calibrated
/// curve must reproduce.
///
/// # Examples
///
/// ```
/// use rates_core::types::time::Date;
/// use rates_instruments::swap::{InterestRateSwap, SwapConventions, SwapDirection};
/// use rates_solver::CalibrationInstrument;
///
/// let swap = InterestRateSwap::from_conventions(
///     1.0,
///     0.032,
///     0.0,
///     Date::from_ymd(2025, 1, 7).unwrap(),
///     Date::from_ymd(2027, 1, 7).unwrap(),
///     SwapDirection::PayFixed,
///     &SwapConventions::usd_irs(),
/// ).unwrap();
///
/// let instrument = CalibrationInstrument::new("2Y", swap, 0.032);
/// assert_eq!(instrument.label(), "2Y");
/// ```
#[derive(Debug, Clone)]
pub struct CalibrationInstrument {
    /// Display label, usually the tenor.
    label: String,
    /// The par swap repriced on every iteration.
    swap: InterestRateSwap<f64>,
    /// Quoted market rate the curve must reproduce.
    target_rate: f64,
}

impl CalibrationInstrument {
    /// Create a calibration instrument.
    pub fn new(label: impl Into<String>, swap: InterestRateSwap<f64>, target_rate: f64) -> Self {
        Self {
            label: label.into(),
            swap,
            target_rate,
        }
    }

    /// Returns the instrument label.
    #[inline]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the swap.
    #[inline]
    pub fn swap(&self) -> &InterestRateSwap<f64> {
        &self.swap
    }

    /// Returns the target market rate.
    #[inline]
    pub fn target_rate(&self) -> f64 {
        self.target_rate
    }

    /// Copy of this instrument with a shifted target rate.
    ///
    /// Used by the risk layer when bumping market quotes for gamma
    /// scenarios.
    pub fn with_target_rate(&self, target_rate: f64) -> Self {
        Self {
            label: self.label.clone(),
            swap: self.swap.clone(),
            target_rate,
        }
    }
}
