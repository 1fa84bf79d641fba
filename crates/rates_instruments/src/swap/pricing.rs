//! Swap pricing functions.
//!
//! All functions take explicit curve references: a discount curve for
//! present-valuing cashflows and a forecast curve for projecting
//! floating rates. Single-curve setups pass the same curve twice.
//!
//! Curve errors propagate unchanged; an uncalibrated curve fails every
//! pricing call rather than pricing off unit discount factors.
//!
//! # Example
//!
//! ```
//! use rates_core::curves::{DiscountCurve, Interpolation};
//! use rates_core::types::time::{Date, DayCountConvention};
//! use rates_instruments::swap::{
//!     pricing, InterestRateSwap, SwapConventions, SwapDirection,
//! };
//!
//! let as_of = Date::from_ymd(2025, 1, 7).unwrap();
//! let mut curve: DiscountCurve<f64> = DiscountCurve::new(
//!     as_of,
//!     vec![
//!         Date::from_ymd(2026, 1, 7).unwrap(),
//!         Date::from_ymd(2027, 1, 7).unwrap(),
//!     ],
//!     DayCountConvention::Act365Fixed,
//!     Interpolation::LogLinear,
//! ).unwrap();
//! curve.set_node_value(1, 0.965).unwrap();
//! curve.set_node_value(2, 0.93).unwrap();
//! curve.mark_calibrated();
//!
//! let swap = InterestRateSwap::from_conventions(
//!     1_000_000.0,
//!     0.035,
//!     0.0,
//!     as_of,
//!     Date::from_ymd(2027, 1, 7).unwrap(),
//!     SwapDirection::PayFixed,
//!     &SwapConventions::usd_irs(),
//! ).unwrap();
//!
//! let npv = pricing::swap_npv(&swap, &curve, &curve).unwrap();
//! let par = pricing::par_rate(&swap, &curve, &curve).unwrap();
//! assert!(npv.is_finite() && par > 0.0);
//! ```

use num_traits::Float;
use rates_core::curves::DiscountCurve;
use rates_core::types::time::Date;

use super::error::PricingError;
use super::instrument::InterestRateSwap;

/// Which leg a cashflow row belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum LegKind {
    /// The fixed leg.
    Fixed,
    /// The floating leg.
    Floating,
}

impl LegKind {
    /// Returns a display label for the leg.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            LegKind::Fixed => "FIXED",
            LegKind::Floating => "FLOAT",
        }
    }
}

/// One cashflow of a priced swap, as plain structured data.
///
/// Amounts and present values are signed from the swap holder's
/// perspective (direction multipliers applied), so rows sum to the
/// swap NPV. Presentation is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CashflowRow<T: Float> {
    /// Which leg generated this cashflow.
    pub leg: LegKind,
    /// Accrual period start.
    pub accrual_start: Date,
    /// Accrual period end.
    pub accrual_end: Date,
    /// Payment date.
    pub payment_date: Date,
    /// Accrual year fraction under the leg's day count.
    pub year_fraction: f64,
    /// Fixed rate, or projected forward plus spread.
    pub rate: T,
    /// Signed undiscounted cashflow amount.
    pub amount: T,
    /// Discount factor at the payment date.
    pub discount_factor: T,
    /// Signed present value of this cashflow.
    pub present_value: T,
}

/// Present value of the fixed leg, unsigned by direction.
///
/// `PV = Σ Notional × FixedRate × YearFraction_i × DF(payment_i)` over
/// the periods that have not yet ended at the curve's as-of date.
pub fn price_fixed_leg<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let leg = swap.fixed_leg();
    let notional = swap.notional();
    let rate = leg.fixed_rate();

    let mut pv = T::zero();
    for period in leg.schedule().iter() {
        if period.end() <= discount.as_of() {
            continue;
        }
        let yf = T::from(period.year_fraction()).unwrap_or_else(T::zero);
        let df = discount.discount_factor(period.payment())?;
        pv = pv + notional * rate * yf * df;
    }

    require_finite(pv, "fixed leg PV")
}

/// Present value of the floating leg, unsigned by direction.
///
/// Each period's rate is the simple forward implied by the forecast
/// curve over the accrual period, plus the leg spread. Periods already
/// running at the as-of date are projected from the as-of date to their
/// accrual end.
pub fn price_floating_leg<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
    forecast: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let leg = swap.floating_leg();
    let notional = swap.notional();
    let spread = leg.spread();

    let mut pv = T::zero();
    for period in leg.schedule().iter() {
        if period.end() <= discount.as_of() {
            continue;
        }
        let projection_start = period.start().max(forecast.as_of());
        let forward = forecast.forward_rate(projection_start, period.end())?;

        let yf = T::from(period.year_fraction()).unwrap_or_else(T::zero);
        let df = discount.discount_factor(period.payment())?;
        pv = pv + notional * (forward + spread) * yf * df;
    }

    require_finite(pv, "floating leg PV")
}

/// Net present value of the swap.
///
/// Signed by direction: a payer swap is long the floating leg and
/// short the fixed leg.
pub fn swap_npv<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
    forecast: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let fixed_pv = price_fixed_leg(swap, discount)?;
    let floating_pv = price_floating_leg(swap, discount, forecast)?;

    let direction = swap.direction();
    let npv = direction.floating_multiplier::<T>() * floating_pv
        + direction.fixed_multiplier::<T>() * fixed_pv;
    require_finite(npv, "swap NPV")
}

/// Par rate: the fixed rate at which the swap's NPV is zero.
///
/// `ParRate = PV(floating leg) / (Notional × Σ YearFraction_i × DF_i)`
/// over the fixed leg. Independent of the swap's own fixed rate and of
/// the sign of the notional.
pub fn par_rate<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
    forecast: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let floating_pv = price_floating_leg(swap, discount, forecast)?;
    let annuity = fixed_annuity(swap, discount)?;

    if annuity == T::zero() {
        return Err(PricingError::ZeroAnnuity);
    }
    require_finite(floating_pv / (swap.notional() * annuity), "par rate")
}

/// Analytic PV01: the first derivative of NPV with respect to a one
/// basis point parallel shift in the fixed rate.
///
/// `PV01 = fixed_multiplier × Notional × Σ YearFraction_i × DF_i × 1e-4`
/// over the fixed leg; negative for a payer swap.
pub fn pv01<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let annuity = fixed_annuity(swap, discount)?;
    let bp = T::from(1e-4).unwrap_or_else(T::zero);
    require_finite(
        swap.direction().fixed_multiplier::<T>() * swap.notional() * annuity * bp,
        "PV01",
    )
}

/// All remaining cashflows of the swap as plain structured rows.
///
/// Fixed leg rows first, then floating; both signed by direction so
/// the rows' present values sum to the swap NPV.
pub fn cashflow_rows<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
    forecast: &DiscountCurve<T>,
) -> Result<Vec<CashflowRow<T>>, PricingError> {
    let mut rows = Vec::new();
    let notional = swap.notional();
    let direction = swap.direction();

    let fixed_sign = direction.fixed_multiplier::<T>();
    for period in swap.fixed_leg().schedule().iter() {
        if period.end() <= discount.as_of() {
            continue;
        }
        let rate = swap.fixed_leg().fixed_rate();
        let yf = period.year_fraction();
        let yf_t = T::from(yf).unwrap_or_else(T::zero);
        let df = discount.discount_factor(period.payment())?;
        let amount = fixed_sign * notional * rate * yf_t;
        rows.push(CashflowRow {
            leg: LegKind::Fixed,
            accrual_start: period.start(),
            accrual_end: period.end(),
            payment_date: period.payment(),
            year_fraction: yf,
            rate,
            amount,
            discount_factor: df,
            present_value: amount * df,
        });
    }

    let float_sign = direction.floating_multiplier::<T>();
    for period in swap.floating_leg().schedule().iter() {
        if period.end() <= discount.as_of() {
            continue;
        }
        let projection_start = period.start().max(forecast.as_of());
        let forward = forecast.forward_rate(projection_start, period.end())?;
        let rate = forward + swap.floating_leg().spread();
        let yf = period.year_fraction();
        let yf_t = T::from(yf).unwrap_or_else(T::zero);
        let df = discount.discount_factor(period.payment())?;
        let amount = float_sign * notional * rate * yf_t;
        rows.push(CashflowRow {
            leg: LegKind::Floating,
            accrual_start: period.start(),
            accrual_end: period.end(),
            payment_date: period.payment(),
            year_fraction: yf,
            rate,
            amount,
            discount_factor: df,
            present_value: amount * df,
        });
    }

    Ok(rows)
}

/// Fixed-leg annuity `Σ YearFraction_i × DF_i`, without notional.
fn fixed_annuity<T: Float>(
    swap: &InterestRateSwap<T>,
    discount: &DiscountCurve<T>,
) -> Result<T, PricingError> {
    let mut annuity = T::zero();
    for period in swap.fixed_leg().schedule().iter() {
        if period.end() <= discount.as_of() {
            continue;
        }
        let yf = T::from(period.year_fraction()).unwrap_or_else(T::zero);
        let df = discount.discount_factor(period.payment())?;
        annuity = annuity + yf * df;
    }
    Ok(annuity)
}

/// Reject non-finite pricing results instead of propagating them.
fn require_finite<T: Float>(value: T, what: &'static str) -> Result<T, PricingError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(PricingError::NonFinite { what })
    }
}
