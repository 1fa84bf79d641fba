//! Period definition for scheduled instruments.

use rates_core::types::time::{Date, DayCountConvention};
use std::fmt;

/// A single accrual period in a schedule.
///
/// Represents one payment period with:
/// - Accrual start and end dates
/// - Payment date (rolled to a business day by the builder)
/// - Day count convention for year fraction calculation
///
/// # Examples
///
/// ```
/// use rates_instruments::schedules::Period;
/// use rates_core::types::time::{Date, DayCountConvention};
///
/// let period = Period::new(
///     Date::from_ymd(2025, 1, 15).unwrap(),
///     Date::from_ymd(2025, 7, 15).unwrap(),
///     Date::from_ymd(2025, 7, 15).unwrap(),
///     DayCountConvention::Act360,
/// );
///
/// assert!((period.year_fraction() - 181.0 / 360.0).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Period {
    /// Start date of the accrual period.
    start: Date,
    /// End date of the accrual period.
    end: Date,
    /// Payment date (may differ from end date after business day adjustment).
    payment: Date,
    /// Day count convention for year fraction calculation.
    day_count: DayCountConvention,
}

impl Period {
    /// Creates a new period with the specified dates and day count
    /// convention.
    #[inline]
    pub fn new(start: Date, end: Date, payment: Date, day_count: DayCountConvention) -> Self {
        Self {
            start,
            end,
            payment,
            day_count,
        }
    }

    /// Creates a period whose payment date equals the accrual end date.
    #[inline]
    pub fn with_payment_on_end(start: Date, end: Date, day_count: DayCountConvention) -> Self {
        Self {
            start,
            end,
            payment: end,
            day_count,
        }
    }

    /// Returns the start date of the accrual period.
    #[inline]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the end date of the accrual period.
    #[inline]
    pub fn end(&self) -> Date {
        self.end
    }

    /// Returns the payment date.
    #[inline]
    pub fn payment(&self) -> Date {
        self.payment
    }

    /// Returns the day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the accrual year fraction under the period's day count.
    #[inline]
    pub fn year_fraction(&self) -> f64 {
        self.day_count.year_fraction(self.start, self.end)
    }

    /// Returns the number of calendar days in the accrual period.
    #[inline]
    pub fn days(&self) -> i64 {
        self.end - self.start
    }

    /// Whether the given date lies in `[start, end)`.
    #[inline]
    pub fn contains(&self, date: Date) -> bool {
        self.start <= date && date < self.end
    }
}

impl fmt::Display for Period {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} -> {} (pay {}, {})",
            self.start,
            self.end,
            self.payment,
            self.day_count.name()
        )
    }
}
