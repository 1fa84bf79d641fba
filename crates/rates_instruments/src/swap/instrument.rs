//! Interest Rate Swap (IRS) definition.
//!
//! A vanilla IRS consists of:
//! - Fixed leg: pays/receives a predetermined fixed rate
//! - Floating leg: pays/receives an overnight benchmark plus spread
//!
//! Instruments are immutable once built and hold no curve references;
//! discount and forecast curves are passed explicitly to the pricing
//! functions in [`crate::swap::pricing`].

use num_traits::Float;
use rates_core::types::time::{Date, DayCountConvention};
use rates_core::types::Currency;
use std::fmt;
use std::str::FromStr;

use super::conventions::SwapConventions;
use super::error::InstrumentError;
use crate::schedules::{Schedule, ScheduleBuilder};

/// Overnight interest rate benchmark index.
///
/// # Examples
///
/// ```
/// use rates_instruments::swap::RateIndex;
///
/// let index = RateIndex::Sofr;
/// assert_eq!(index.name(), "SOFR");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum RateIndex {
    /// Secured Overnight Financing Rate (USD).
    Sofr,
    /// Sterling Overnight Index Average (GBP).
    Sonia,
    /// Euro Short-Term Rate (EUR).
    Estr,
}

impl RateIndex {
    /// Returns the standard name for this index.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            RateIndex::Sofr => "SOFR",
            RateIndex::Sonia => "SONIA",
            RateIndex::Estr => "ESTR",
        }
    }

    /// Returns the settlement currency for this index.
    #[inline]
    pub fn currency(&self) -> Currency {
        match self {
            RateIndex::Sofr => Currency::USD,
            RateIndex::Sonia => Currency::GBP,
            RateIndex::Estr => Currency::EUR,
        }
    }

    /// Returns the market-standard day count for this index.
    #[inline]
    pub fn default_day_count(&self) -> DayCountConvention {
        match self {
            RateIndex::Sofr => DayCountConvention::Act360,
            RateIndex::Sonia => DayCountConvention::Act365Fixed,
            RateIndex::Estr => DayCountConvention::Act360,
        }
    }
}

impl fmt::Display for RateIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for RateIndex {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_uppercase().as_str() {
            "SOFR" => Ok(RateIndex::Sofr),
            "SONIA" => Ok(RateIndex::Sonia),
            "ESTR" | "€STR" => Ok(RateIndex::Estr),
            _ => Err(format!("Unknown rate index: {}", s)),
        }
    }
}

/// Swap direction (payer or receiver of the fixed rate).
///
/// - **PayFixed** (payer swap): pay fixed, receive floating
/// - **ReceiveFixed** (receiver swap): receive fixed, pay floating
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SwapDirection {
    /// Pay fixed rate, receive floating rate.
    PayFixed,
    /// Receive fixed rate, pay floating rate.
    ReceiveFixed,
}

impl SwapDirection {
    /// Returns the sign applied to fixed-leg cashflows.
    #[inline]
    pub fn fixed_multiplier<T: Float>(&self) -> T {
        match self {
            SwapDirection::PayFixed => -T::one(),
            SwapDirection::ReceiveFixed => T::one(),
        }
    }

    /// Returns the sign applied to floating-leg cashflows.
    #[inline]
    pub fn floating_multiplier<T: Float>(&self) -> T {
        match self {
            SwapDirection::PayFixed => T::one(),
            SwapDirection::ReceiveFixed => -T::one(),
        }
    }
}

impl fmt::Display for SwapDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SwapDirection::PayFixed => write!(f, "Pay Fixed"),
            SwapDirection::ReceiveFixed => write!(f, "Receive Fixed"),
        }
    }
}

/// Fixed leg of an interest rate swap.
///
/// For each period i the undiscounted cashflow is
/// `Notional × FixedRate × YearFraction_i`.
#[derive(Debug, Clone)]
pub struct FixedLeg<T: Float> {
    /// Payment schedule.
    schedule: Schedule,
    /// Fixed rate (annual, e.g. 0.03 for 3%).
    fixed_rate: T,
    /// Day count convention for accrual.
    day_count: DayCountConvention,
}

impl<T: Float> FixedLeg<T> {
    /// Create a new fixed leg.
    pub fn new(schedule: Schedule, fixed_rate: T, day_count: DayCountConvention) -> Self {
        Self {
            schedule,
            fixed_rate,
            day_count,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the fixed rate.
    #[inline]
    pub fn fixed_rate(&self) -> T {
        self.fixed_rate
    }

    /// Returns the day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

/// Floating leg of an interest rate swap.
///
/// For each period i the undiscounted cashflow is
/// `Notional × (ForwardRate_i + Spread) × YearFraction_i`, with the
/// forward re-projected from the forecast curve at valuation time.
#[derive(Debug, Clone)]
pub struct FloatingLeg<T: Float> {
    /// Payment schedule.
    schedule: Schedule,
    /// Spread over the index (annual, e.g. 0.001 for 10bp).
    spread: T,
    /// Reference rate index.
    index: RateIndex,
    /// Day count convention for accrual.
    day_count: DayCountConvention,
}

impl<T: Float> FloatingLeg<T> {
    /// Create a new floating leg.
    pub fn new(
        schedule: Schedule,
        spread: T,
        index: RateIndex,
        day_count: DayCountConvention,
    ) -> Self {
        Self {
            schedule,
            spread,
            index,
            day_count,
        }
    }

    /// Returns the payment schedule.
    #[inline]
    pub fn schedule(&self) -> &Schedule {
        &self.schedule
    }

    /// Returns the spread over the index rate.
    #[inline]
    pub fn spread(&self) -> T {
        self.spread
    }

    /// Returns the reference rate index.
    #[inline]
    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Returns the day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }
}

/// Plain vanilla Interest Rate Swap.
///
/// An agreement to exchange fixed and floating rate payments on a
/// notional principal over a specified term. The swap owns its two
/// legs; it references no curves.
///
/// # Examples
///
/// ```
/// use rates_core::types::time::Date;
/// use rates_instruments::swap::{InterestRateSwap, SwapConventions, SwapDirection};
///
/// let swap: InterestRateSwap<f64> = InterestRateSwap::from_conventions(
///     10_000_000.0,
///     0.032,
///     0.0,
///     Date::from_ymd(2025, 1, 7).unwrap(),
///     Date::from_ymd(2030, 1, 7).unwrap(),
///     SwapDirection::PayFixed,
///     &SwapConventions::usd_irs(),
/// ).unwrap();
///
/// assert!(swap.is_payer());
/// assert_eq!(swap.termination_date(), swap.fixed_leg().schedule().end_date());
/// ```
#[derive(Debug, Clone)]
pub struct InterestRateSwap<T: Float> {
    /// Notional principal amount. Negative notionals flip both legs.
    notional: T,
    /// Fixed rate leg.
    fixed_leg: FixedLeg<T>,
    /// Floating rate leg.
    floating_leg: FloatingLeg<T>,
    /// Settlement currency.
    currency: Currency,
    /// Payer or receiver of fixed.
    direction: SwapDirection,
}

impl<T: Float> InterestRateSwap<T> {
    /// Create a swap from prebuilt legs.
    pub fn new(
        notional: T,
        fixed_leg: FixedLeg<T>,
        floating_leg: FloatingLeg<T>,
        currency: Currency,
        direction: SwapDirection,
    ) -> Self {
        Self {
            notional,
            fixed_leg,
            floating_leg,
            currency,
            direction,
        }
    }

    /// Build a swap from effective/termination dates and a typed
    /// convention record.
    ///
    /// Both legs are scheduled with the conventions' calendar and
    /// business day convention; the floating leg uses the conventions'
    /// index and its day count.
    ///
    /// # Errors
    ///
    /// - `InstrumentError::InvalidNotional` for a zero or non-finite
    ///   notional
    /// - `InstrumentError::InvalidDateRange` when effective is not
    ///   before termination
    /// - `InstrumentError::Schedule` when schedule generation fails
    #[allow(clippy::too_many_arguments)]
    pub fn from_conventions(
        notional: T,
        fixed_rate: T,
        spread: T,
        effective: Date,
        termination: Date,
        direction: SwapDirection,
        conventions: &SwapConventions,
    ) -> Result<Self, InstrumentError> {
        if notional == T::zero() || !notional.is_finite() {
            return Err(InstrumentError::InvalidNotional {
                value: notional.to_f64().unwrap_or(f64::NAN),
            });
        }
        if effective >= termination {
            return Err(InstrumentError::InvalidDateRange {
                effective,
                termination,
            });
        }

        let fixed_schedule = ScheduleBuilder::new()
            .start(effective)
            .end(termination)
            .frequency(conventions.fixed_frequency())
            .day_count(conventions.fixed_day_count())
            .calendar(conventions.calendar())
            .convention(conventions.convention())
            .build()?;

        let float_schedule = ScheduleBuilder::new()
            .start(effective)
            .end(termination)
            .frequency(conventions.float_frequency())
            .day_count(conventions.float_day_count())
            .calendar(conventions.calendar())
            .convention(conventions.convention())
            .build()?;

        let fixed_leg = FixedLeg::new(fixed_schedule, fixed_rate, conventions.fixed_day_count());
        let floating_leg = FloatingLeg::new(
            float_schedule,
            spread,
            conventions.index(),
            conventions.float_day_count(),
        );

        Ok(Self::new(
            notional,
            fixed_leg,
            floating_leg,
            conventions.currency(),
            direction,
        ))
    }

    /// Returns the notional principal amount.
    #[inline]
    pub fn notional(&self) -> T {
        self.notional
    }

    /// Returns the fixed leg.
    #[inline]
    pub fn fixed_leg(&self) -> &FixedLeg<T> {
        &self.fixed_leg
    }

    /// Returns the floating leg.
    #[inline]
    pub fn floating_leg(&self) -> &FloatingLeg<T> {
        &self.floating_leg
    }

    /// Returns the settlement currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the swap direction.
    #[inline]
    pub fn direction(&self) -> SwapDirection {
        self.direction
    }

    /// Returns the fixed rate.
    #[inline]
    pub fn fixed_rate(&self) -> T {
        self.fixed_leg.fixed_rate()
    }

    /// Returns the floating leg spread.
    #[inline]
    pub fn spread(&self) -> T {
        self.floating_leg.spread()
    }

    /// Returns the floating benchmark index.
    #[inline]
    pub fn index(&self) -> RateIndex {
        self.floating_leg.index()
    }

    /// Returns the accrual start of the earliest leg.
    pub fn effective_date(&self) -> Date {
        self.fixed_leg
            .schedule()
            .start_date()
            .min(self.floating_leg.schedule().start_date())
    }

    /// Returns the accrual end of the latest leg.
    pub fn termination_date(&self) -> Date {
        self.fixed_leg
            .schedule()
            .end_date()
            .max(self.floating_leg.schedule().end_date())
    }

    /// Whether this is a payer swap (pay fixed, receive floating).
    #[inline]
    pub fn is_payer(&self) -> bool {
        self.direction == SwapDirection::PayFixed
    }

    /// Whether this is a receiver swap (receive fixed, pay floating).
    #[inline]
    pub fn is_receiver(&self) -> bool {
        self.direction == SwapDirection::ReceiveFixed
    }
}
