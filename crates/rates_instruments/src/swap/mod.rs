//! Vanilla fixed-for-float interest rate swaps.
//!
//! This module provides:
//! - `RateIndex`, `SwapDirection`: floating benchmark and payer/receiver
//!   tags
//! - `FixedLeg`, `FloatingLeg`, `InterestRateSwap`: the instrument
//!   itself, immutable once built
//! - `SwapConventions`: typed market convention presets (`conventions`)
//! - Pricing functions over explicit curve references (`pricing`)
//!
//! Floating-leg rates are never stored on the instrument; they are
//! re-projected from the forecast curve at every valuation.

pub mod conventions;
mod error;
mod instrument;
pub mod pricing;

pub use conventions::SwapConventions;
pub use error::{InstrumentError, PricingError};
pub use instrument::{FixedLeg, FloatingLeg, InterestRateSwap, RateIndex, SwapDirection};
pub use pricing::{
    cashflow_rows, par_rate, price_fixed_leg, price_floating_leg, pv01, swap_npv, CashflowRow,
    LegKind,
};
