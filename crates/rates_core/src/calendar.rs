//! Holiday calendars and business-day date adjustment.
//!
//! This module provides:
//! - `CalendarId`: identifiers for the registered holiday calendars
//! - `Calendar`: business-day queries, date rolling per
//!   `BusinessDayConvention`, and calendar-aware tenor advancement with
//!   end-of-month anchoring
//!
//! Holiday rule sets are simplified fixed-date sets per financial
//! centre; weekends are always non-business days.

use chrono::{Datelike, Weekday};
use std::fmt;
use std::str::FromStr;

use crate::types::error::{CalendarError, TenorError};
use crate::types::tenor::Tenor;
use crate::types::time::{BusinessDayConvention, Date};

/// Calendar identifier.
///
/// # Examples
///
/// ```
/// use rates_core::calendar::CalendarId;
///
/// let id: CalendarId = "nyc".parse().unwrap();
/// assert_eq!(id, CalendarId::NewYork);
/// assert!("mars".parse::<CalendarId>().is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum CalendarId {
    /// TARGET (eurozone settlement)
    Target,
    /// New York
    NewYork,
    /// London
    London,
    /// Tokyo
    Tokyo,
    /// Weekends only, no holidays
    WeekendOnly,
}

impl CalendarId {
    /// Returns the canonical name for this calendar.
    pub fn name(&self) -> &'static str {
        match self {
            CalendarId::Target => "TARGET",
            CalendarId::NewYork => "NYC",
            CalendarId::London => "LDN",
            CalendarId::Tokyo => "TKY",
            CalendarId::WeekendOnly => "WEEKEND",
        }
    }
}

impl fmt::Display for CalendarId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalendarId {
    type Err = CalendarError;

    /// Resolves a calendar name (case-insensitive) to an identifier.
    ///
    /// Unregistered names yield `CalendarError::UnknownCalendar`.
    fn from_str(s: &str) -> Result<Self, CalendarError> {
        match s.to_uppercase().as_str() {
            "TARGET" | "TGT" => Ok(CalendarId::Target),
            "NYC" | "NEWYORK" | "NEW_YORK" | "USNY" => Ok(CalendarId::NewYork),
            "LDN" | "LONDON" => Ok(CalendarId::London),
            "TKY" | "TOKYO" => Ok(CalendarId::Tokyo),
            "WEEKEND" | "WEEKENDONLY" | "NONE" => Ok(CalendarId::WeekendOnly),
            _ => Err(CalendarError::unknown(s)),
        }
    }
}

/// Holiday calendar for business-day calculations.
///
/// # Examples
///
/// ```
/// use rates_core::calendar::{Calendar, CalendarId};
/// use rates_core::types::time::{BusinessDayConvention, Date};
///
/// let cal = Calendar::get(CalendarId::WeekendOnly);
///
/// // 2025-01-04 is a Saturday
/// let saturday = Date::from_ymd(2025, 1, 4).unwrap();
/// assert!(!cal.is_business_day(saturday));
///
/// let rolled = cal.adjust(saturday, BusinessDayConvention::Following);
/// assert_eq!(rolled, Date::from_ymd(2025, 1, 6).unwrap());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calendar {
    id: CalendarId,
}

impl Calendar {
    /// Get a calendar by identifier.
    pub fn get(id: CalendarId) -> Self {
        Self { id }
    }

    /// Resolve a calendar by registered name.
    ///
    /// # Errors
    ///
    /// `CalendarError::UnknownCalendar` for names absent from the
    /// registry.
    pub fn from_name(name: &str) -> Result<Self, CalendarError> {
        name.parse::<CalendarId>().map(Self::get)
    }

    /// Returns this calendar's identifier.
    pub fn id(&self) -> CalendarId {
        self.id
    }

    /// Check if a date is a business day.
    pub fn is_business_day(&self, date: Date) -> bool {
        let inner = date.into_inner();
        if inner.weekday() == Weekday::Sat || inner.weekday() == Weekday::Sun {
            return false;
        }
        !self.is_holiday(date)
    }

    /// Check if a date is a holiday (excluding weekends).
    pub fn is_holiday(&self, date: Date) -> bool {
        let month = date.month();
        let day = date.day();

        match self.id {
            CalendarId::WeekendOnly => false,
            CalendarId::Target => matches!(
                (month, day),
                (1, 1) |   // New Year's Day
                (5, 1) |   // Labour Day
                (12, 25) | // Christmas Day
                (12, 26) // Boxing Day
            ),
            CalendarId::NewYork => matches!(
                (month, day),
                (1, 1) |   // New Year's Day
                (7, 4) |   // Independence Day
                (12, 25) // Christmas Day
            ),
            CalendarId::London => matches!(
                (month, day),
                (1, 1) |   // New Year's Day
                (12, 25) | // Christmas Day
                (12, 26) // Boxing Day
            ),
            CalendarId::Tokyo => matches!(
                (month, day),
                (1, 1) |   // New Year's Day
                (1, 2) |   // Bank Holiday
                (1, 3) // Bank Holiday
            ),
        }
    }

    /// Get the next business day on or after the given date.
    pub fn next_business_day(&self, mut date: Date) -> Date {
        while !self.is_business_day(date) {
            date = Date::from(date.into_inner().succ_opt().unwrap_or(date.into_inner()));
        }
        date
    }

    /// Get the previous business day on or before the given date.
    pub fn prev_business_day(&self, mut date: Date) -> Date {
        while !self.is_business_day(date) {
            date = Date::from(date.into_inner().pred_opt().unwrap_or(date.into_inner()));
        }
        date
    }

    /// Add a number of business days to a date.
    pub fn add_business_days(&self, mut date: Date, days: i32) -> Date {
        let forward = days >= 0;
        let mut remaining = days.abs();

        while remaining > 0 {
            let inner = date.into_inner();
            date = Date::from(if forward {
                inner.succ_opt().unwrap_or(inner)
            } else {
                inner.pred_opt().unwrap_or(inner)
            });
            if self.is_business_day(date) {
                remaining -= 1;
            }
        }

        date
    }

    /// Roll a date to a business day per the given convention.
    ///
    /// The modified conventions fall back to the opposite direction when
    /// the roll would leave the original date's month.
    ///
    /// ```
    /// use rates_core::calendar::{Calendar, CalendarId};
    /// use rates_core::types::time::{BusinessDayConvention, Date};
    ///
    /// let cal = Calendar::get(CalendarId::WeekendOnly);
    ///
    /// // 2025-05-31 is a Saturday; following would land in June,
    /// // so modified following rolls back to Friday May 30.
    /// let month_end = Date::from_ymd(2025, 5, 31).unwrap();
    /// let rolled = cal.adjust(month_end, BusinessDayConvention::ModifiedFollowing);
    /// assert_eq!(rolled, Date::from_ymd(2025, 5, 30).unwrap());
    /// ```
    pub fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        if self.is_business_day(date) {
            return date;
        }

        match convention {
            BusinessDayConvention::Unadjusted => date,
            BusinessDayConvention::Following => self.next_business_day(date),
            BusinessDayConvention::Preceding => self.prev_business_day(date),
            BusinessDayConvention::ModifiedFollowing => {
                let rolled = self.next_business_day(date);
                if rolled.month() != date.month() || rolled.year() != date.year() {
                    self.prev_business_day(date)
                } else {
                    rolled
                }
            }
            BusinessDayConvention::ModifiedPreceding => {
                let rolled = self.prev_business_day(date);
                if rolled.month() != date.month() || rolled.year() != date.year() {
                    self.next_business_day(date)
                } else {
                    rolled
                }
            }
        }
    }

    /// Advance a date by a tenor, then roll to a business day.
    ///
    /// Month-based tenors anchor to the end of month: applied to the
    /// last business day of a month, they land on the last business day
    /// of the target month.
    ///
    /// ```
    /// use rates_core::calendar::{Calendar, CalendarId};
    /// use rates_core::types::time::{BusinessDayConvention, Date};
    ///
    /// let cal = Calendar::get(CalendarId::WeekendOnly);
    ///
    /// // 2025-02-28 (Friday) is the last business day of February;
    /// // one month later anchors to 2025-03-31, the last business day
    /// // of March.
    /// let feb_end = Date::from_ymd(2025, 2, 28).unwrap();
    /// let advanced = cal
    ///     .advance(feb_end, "1M".parse().unwrap(), BusinessDayConvention::ModifiedFollowing)
    ///     .unwrap();
    /// assert_eq!(advanced, Date::from_ymd(2025, 3, 31).unwrap());
    /// ```
    pub fn advance(
        &self,
        date: Date,
        tenor: Tenor,
        convention: BusinessDayConvention,
    ) -> Result<Date, TenorError> {
        let raw = tenor.add_to(date)?;

        if tenor.is_month_based() && self.is_end_of_month(date) {
            return Ok(self.prev_business_day(raw.end_of_month()));
        }

        Ok(self.adjust(raw, convention))
    }

    /// Whether a date is the last business day of its month.
    pub fn is_end_of_month(&self, date: Date) -> bool {
        self.is_business_day(date) && self.prev_business_day(date.end_of_month()) == date
    }
}
