//! Discount curves.
//!
//! This module provides:
//! - `Interpolation`: interpolation method tags for discount curves
//! - `DiscountCurve<T>`: a calibratable discount-factor curve over an
//!   arena of indexed node slots
//!
//! Curves are constructed with unit discount factors at every node and
//! must be calibrated (by a solver mutating node values through
//! `set_node_value`) before discount factors can be queried.

mod discount;

pub use discount::{DiscountCurve, Interpolation};
