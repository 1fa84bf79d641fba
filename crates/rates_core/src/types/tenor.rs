//! Tenor parsing and arithmetic.
//!
//! A tenor is a relative period specification ("1W", "3M", "2Y") used to
//! derive dates from a base date. Parsing is strict: anything that is not
//! a positive count followed by a single unit letter is rejected.

use chrono::{Days, Months};
use std::fmt;
use std::str::FromStr;

use super::error::TenorError;
use super::time::Date;

/// Unit of a tenor period.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Calendar weeks (7 days)
    Weeks,
    /// Calendar months, with month-end clamping
    Months,
    /// Calendar years (12 months)
    Years,
}

impl TenorUnit {
    /// Returns the single-letter code for this unit.
    #[inline]
    pub fn code(&self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A relative time period such as "3M" or "2Y".
///
/// Pure value type: applying a tenor to a date performs raw calendar
/// arithmetic with month-end clamping. Business-day rolling is the
/// calendar's job, not the tenor's.
///
/// # Examples
///
/// ```
/// use rates_core::types::tenor::{Tenor, TenorUnit};
/// use rates_core::types::time::Date;
///
/// let tenor: Tenor = "3M".parse().unwrap();
/// assert_eq!(tenor.count(), 3);
/// assert_eq!(tenor.unit(), TenorUnit::Months);
///
/// let base = Date::from_ymd(2025, 1, 31).unwrap();
/// // Month-end clamping: Jan 31 + 1M = Feb 28 in a non-leap year
/// let one_month: Tenor = "1M".parse().unwrap();
/// assert_eq!(one_month.add_to(base).unwrap(), Date::from_ymd(2025, 2, 28).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tenor {
    count: u32,
    unit: TenorUnit,
}

impl Tenor {
    /// Create a tenor from a count and unit.
    ///
    /// Returns `TenorError::InvalidTenor` for a zero count.
    pub fn new(count: u32, unit: TenorUnit) -> Result<Self, TenorError> {
        if count == 0 {
            return Err(TenorError::invalid(format!("0{}", unit.code())));
        }
        Ok(Self { count, unit })
    }

    /// Returns the period count.
    #[inline]
    pub fn count(&self) -> u32 {
        self.count
    }

    /// Returns the period unit.
    #[inline]
    pub fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Returns an approximate length in years, used only for ordering
    /// tenors in diagnostics.
    pub fn approx_years(&self) -> f64 {
        match self.unit {
            TenorUnit::Days => self.count as f64 / 365.0,
            TenorUnit::Weeks => self.count as f64 * 7.0 / 365.0,
            TenorUnit::Months => self.count as f64 / 12.0,
            TenorUnit::Years => self.count as f64,
        }
    }

    /// Apply this tenor to a base date.
    ///
    /// Month and year tenors clamp to the end of the target month
    /// (Jan 31 + 1M = Feb 28/29). Fails only if the result leaves the
    /// supported date range.
    pub fn add_to(&self, date: Date) -> Result<Date, TenorError> {
        let inner = date.into_inner();
        let result = match self.unit {
            TenorUnit::Days => inner.checked_add_days(Days::new(self.count as u64)),
            TenorUnit::Weeks => inner.checked_add_days(Days::new(self.count as u64 * 7)),
            TenorUnit::Months => inner.checked_add_months(Months::new(self.count)),
            TenorUnit::Years => inner.checked_add_months(Months::new(self.count * 12)),
        };

        result.map(Date::from).ok_or_else(|| TenorError::DateOverflow {
            reason: format!("{} + {} overflowed", date, self),
        })
    }

    /// Whether this tenor is expressed in whole months or years.
    ///
    /// Month-based tenors participate in end-of-month anchoring during
    /// calendar-aware date advancement.
    #[inline]
    pub fn is_month_based(&self) -> bool {
        matches!(self.unit, TenorUnit::Months | TenorUnit::Years)
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.code())
    }
}

impl FromStr for Tenor {
    type Err = TenorError;

    /// Parses tenor strings such as "1W", "3M", "2Y", "30D".
    ///
    /// Case-insensitive. Rejects empty strings, missing counts, zero
    /// counts, unknown units and trailing garbage.
    fn from_str(s: &str) -> Result<Self, TenorError> {
        let trimmed = s.trim();
        if trimmed.len() < 2 {
            return Err(TenorError::invalid(s));
        }

        let (digits, unit_str) = trimmed.split_at(trimmed.len() - 1);
        let count: u32 = digits.parse().map_err(|_| TenorError::invalid(s))?;

        let unit = match unit_str.to_uppercase().as_str() {
            "D" => TenorUnit::Days,
            "W" => TenorUnit::Weeks,
            "M" => TenorUnit::Months,
            "Y" => TenorUnit::Years,
            _ => return Err(TenorError::invalid(s)),
        };

        Tenor::new(count, unit).map_err(|_| TenorError::invalid(s))
    }
}
