//! Typed swap convention presets.
//!
//! A `SwapConventions` record bundles the market defaults needed to
//! schedule a vanilla swap: currency, day counts, frequencies, calendar
//! and business day convention. Presets are resolved to a typed record
//! up front; no string lookup happens inside pricing logic.

use rates_core::calendar::CalendarId;
use rates_core::types::time::{BusinessDayConvention, DayCountConvention};
use rates_core::types::Currency;
use std::fmt;
use std::str::FromStr;

use super::instrument::RateIndex;
use crate::schedules::Frequency;

/// Market conventions for a vanilla fixed-for-float swap.
///
/// # Examples
///
/// ```
/// use rates_instruments::swap::SwapConventions;
/// use rates_core::types::Currency;
///
/// let conventions = SwapConventions::usd_irs();
/// assert_eq!(conventions.currency(), Currency::USD);
///
/// // Presets resolve by name outside pricing logic
/// let parsed: SwapConventions = "usd_irs".parse().unwrap();
/// assert_eq!(parsed, conventions);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SwapConventions {
    currency: Currency,
    index: RateIndex,
    fixed_frequency: Frequency,
    float_frequency: Frequency,
    fixed_day_count: DayCountConvention,
    float_day_count: DayCountConvention,
    calendar: CalendarId,
    convention: BusinessDayConvention,
}

impl SwapConventions {
    /// Fully explicit constructor.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        currency: Currency,
        index: RateIndex,
        fixed_frequency: Frequency,
        float_frequency: Frequency,
        fixed_day_count: DayCountConvention,
        float_day_count: DayCountConvention,
        calendar: CalendarId,
        convention: BusinessDayConvention,
    ) -> Self {
        Self {
            currency,
            index,
            fixed_frequency,
            float_frequency,
            fixed_day_count,
            float_day_count,
            calendar,
            convention,
        }
    }

    /// USD fixed-vs-SOFR conventions: annual legs, ACT/360, New York
    /// calendar, modified following.
    pub fn usd_irs() -> Self {
        Self::new(
            Currency::USD,
            RateIndex::Sofr,
            Frequency::Annual,
            Frequency::Annual,
            DayCountConvention::Act360,
            DayCountConvention::Act360,
            CalendarId::NewYork,
            BusinessDayConvention::ModifiedFollowing,
        )
    }

    /// GBP fixed-vs-SONIA conventions: annual legs, ACT/365F, London
    /// calendar, modified following.
    pub fn gbp_irs() -> Self {
        Self::new(
            Currency::GBP,
            RateIndex::Sonia,
            Frequency::Annual,
            Frequency::Annual,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act365Fixed,
            CalendarId::London,
            BusinessDayConvention::ModifiedFollowing,
        )
    }

    /// EUR fixed-vs-ESTR conventions: annual legs, ACT/360, TARGET
    /// calendar, modified following.
    pub fn eur_irs() -> Self {
        Self::new(
            Currency::EUR,
            RateIndex::Estr,
            Frequency::Annual,
            Frequency::Annual,
            DayCountConvention::Act360,
            DayCountConvention::Act360,
            CalendarId::Target,
            BusinessDayConvention::ModifiedFollowing,
        )
    }

    /// Returns the settlement currency.
    #[inline]
    pub fn currency(&self) -> Currency {
        self.currency
    }

    /// Returns the floating benchmark index.
    #[inline]
    pub fn index(&self) -> RateIndex {
        self.index
    }

    /// Returns the fixed leg payment frequency.
    #[inline]
    pub fn fixed_frequency(&self) -> Frequency {
        self.fixed_frequency
    }

    /// Returns the floating leg payment frequency.
    #[inline]
    pub fn float_frequency(&self) -> Frequency {
        self.float_frequency
    }

    /// Returns the fixed leg day count.
    #[inline]
    pub fn fixed_day_count(&self) -> DayCountConvention {
        self.fixed_day_count
    }

    /// Returns the floating leg day count.
    #[inline]
    pub fn float_day_count(&self) -> DayCountConvention {
        self.float_day_count
    }

    /// Returns the holiday calendar.
    #[inline]
    pub fn calendar(&self) -> CalendarId {
        self.calendar
    }

    /// Returns the business day convention.
    #[inline]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }
}

impl fmt::Display for SwapConventions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} vs {}", self.currency, self.index)
    }
}

impl FromStr for SwapConventions {
    type Err = String;

    /// Resolves a preset name to a convention record.
    ///
    /// Accepts "usd_irs", "gbp_irs" and "eur_irs" (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace('-', "_").as_str() {
            "usd_irs" => Ok(Self::usd_irs()),
            "gbp_irs" => Ok(Self::gbp_irs()),
            "eur_irs" => Ok(Self::eur_irs()),
            _ => Err(format!("Unknown swap convention preset: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_usd_preset() {
        let c = SwapConventions::usd_irs();
        assert_eq!(c.currency(), Currency::USD);
        assert_eq!(c.index(), RateIndex::Sofr);
        assert_eq!(c.fixed_frequency(), Frequency::Annual);
        assert_eq!(c.fixed_day_count(), DayCountConvention::Act360);
        assert_eq!(c.calendar(), CalendarId::NewYork);
        assert_eq!(c.convention(), BusinessDayConvention::ModifiedFollowing);
    }

    #[test]
    fn test_presets_match_index_currency() {
        for c in [
            SwapConventions::usd_irs(),
            SwapConventions::gbp_irs(),
            SwapConventions::eur_irs(),
        ] {
            assert_eq!(c.currency(), c.index().currency());
            assert_eq!(c.float_day_count(), c.index().default_day_count());
        }
    }

    #[test]
    fn test_from_str() {
        assert_eq!(
            "USD_IRS".parse::<SwapConventions>().unwrap(),
            SwapConventions::usd_irs()
        );
        assert_eq!(
            "gbp-irs".parse::<SwapConventions>().unwrap(),
            SwapConventions::gbp_irs()
        );
        assert!("chf_irs".parse::<SwapConventions>().is_err());
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", SwapConventions::usd_irs()), "USD vs SOFR");
    }
}
