//! Risk report containers.
//!
//! Plain structured data: labels and values for the caller to
//! tabulate or plot. No presentation logic lives here.

/// First-order sensitivities per calibration instrument.
///
/// Each value is the change in the target instrument's NPV for a one
/// basis point rise in the corresponding market quote.
#[derive(Debug, Clone, PartialEq)]
pub struct DeltaReport {
    labels: Vec<String>,
    values: Vec<f64>,
}

impl DeltaReport {
    /// Create a report from parallel label and value vectors.
    pub(crate) fn new(labels: Vec<String>, values: Vec<f64>) -> Self {
        debug_assert_eq!(labels.len(), values.len());
        Self { labels, values }
    }

    /// Returns the calibration instrument labels.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the sensitivities, aligned with `labels`.
    #[inline]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Sensitivity for a given instrument label, if present.
    pub fn get(&self, label: &str) -> Option<f64> {
        self.labels
            .iter()
            .position(|l| l == label)
            .map(|i| self.values[i])
    }

    /// Sum of all sensitivities: the NPV response to a parallel one
    /// basis point rise in every market quote.
    pub fn total(&self) -> f64 {
        self.values.iter().sum()
    }

    /// Iterate over (label, value) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.labels
            .iter()
            .map(String::as_str)
            .zip(self.values.iter().copied())
    }
}

/// Second-order cross-sensitivities per pair of calibration
/// instruments.
///
/// Entry (i, j) is the change in NPV per joint one basis point move of
/// quotes i and j, in units of NPV per (1bp)². The matrix is symmetric
/// by construction.
#[derive(Debug, Clone, PartialEq)]
pub struct GammaReport {
    labels: Vec<String>,
    matrix: Vec<Vec<f64>>,
}

impl GammaReport {
    /// Create a report from labels and a square matrix.
    pub(crate) fn new(labels: Vec<String>, matrix: Vec<Vec<f64>>) -> Self {
        debug_assert_eq!(labels.len(), matrix.len());
        Self { labels, matrix }
    }

    /// Returns the calibration instrument labels.
    #[inline]
    pub fn labels(&self) -> &[String] {
        &self.labels
    }

    /// Returns the full gamma matrix, row-major.
    #[inline]
    pub fn matrix(&self) -> &[Vec<f64>] {
        &self.matrix
    }

    /// Cross-gamma between instruments i and j.
    #[inline]
    pub fn value(&self, i: usize, j: usize) -> f64 {
        self.matrix[i][j]
    }

    /// Number of calibration instruments covered.
    #[inline]
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Whether the report is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }

    /// The diagonal: own-gamma per instrument.
    pub fn diagonal(&self) -> Vec<f64> {
        (0..self.matrix.len()).map(|i| self.matrix[i][i]).collect()
    }
}
