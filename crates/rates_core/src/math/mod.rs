//! Numerical helpers shared by the calibration and risk layers.

pub mod linalg;
