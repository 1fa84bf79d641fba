//! Schedule and ScheduleBuilder implementation.

use rates_core::calendar::{Calendar, CalendarId};
use rates_core::types::tenor::{Tenor, TenorUnit};
use rates_core::types::time::{BusinessDayConvention, Date, DayCountConvention};

use super::error::ScheduleError;
use super::frequency::Frequency;
use super::period::Period;

/// A collection of accrual periods for scheduled instruments.
///
/// Contains the complete rolled-out schedule for instruments such as
/// interest rate swaps. Once built, the schedule is immutable and all
/// of its dates are valid business days under the builder's calendar
/// and convention.
///
/// # Examples
///
/// ```
/// use rates_instruments::schedules::{Frequency, ScheduleBuilder};
/// use rates_core::calendar::CalendarId;
/// use rates_core::types::time::{Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2025, 1, 15).unwrap())
///     .end(Date::from_ymd(2027, 1, 15).unwrap())
///     .frequency(Frequency::SemiAnnual)
///     .day_count(DayCountConvention::Act360)
///     .calendar(CalendarId::NewYork)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Schedule {
    /// All periods in the schedule.
    periods: Vec<Period>,
}

impl Schedule {
    /// Creates a schedule from a non-empty list of periods.
    pub(crate) fn new(periods: Vec<Period>) -> Self {
        debug_assert!(!periods.is_empty());
        Self { periods }
    }

    /// Returns the periods in the schedule.
    #[inline]
    pub fn periods(&self) -> &[Period] {
        &self.periods
    }

    /// Returns the number of periods.
    #[inline]
    pub fn len(&self) -> usize {
        self.periods.len()
    }

    /// Returns whether the schedule is empty.
    ///
    /// Always false for a built schedule; present for API completeness.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.periods.is_empty()
    }

    /// Returns the accrual start date of the schedule.
    #[inline]
    pub fn start_date(&self) -> Date {
        self.periods[0].start()
    }

    /// Returns the accrual end date of the schedule.
    #[inline]
    pub fn end_date(&self) -> Date {
        self.periods[self.periods.len() - 1].end()
    }

    /// Returns the last payment date.
    #[inline]
    pub fn last_payment_date(&self) -> Date {
        self.periods[self.periods.len() - 1].payment()
    }

    /// Returns the payment dates in order.
    pub fn payment_dates(&self) -> Vec<Date> {
        self.periods.iter().map(|p| p.payment()).collect()
    }

    /// Returns an iterator over the periods.
    pub fn iter(&self) -> impl Iterator<Item = &Period> {
        self.periods.iter()
    }

    /// Total accrual year fraction across all periods.
    pub fn total_year_fraction(&self) -> f64 {
        self.periods.iter().map(|p| p.year_fraction()).sum()
    }
}

/// Builder for calendar-aware schedules.
///
/// Rolls an unadjusted date grid out from the start date at the payment
/// frequency, clips it to the end date, and adjusts every accrual
/// boundary and payment date to a business day. All date problems
/// surface here at build time.
///
/// # Examples
///
/// ```
/// use rates_instruments::schedules::{Frequency, ScheduleBuilder};
/// use rates_core::calendar::CalendarId;
/// use rates_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
///
/// let schedule = ScheduleBuilder::new()
///     .start(Date::from_ymd(2025, 1, 15).unwrap())
///     .end(Date::from_ymd(2026, 1, 15).unwrap())
///     .frequency(Frequency::Quarterly)
///     .day_count(DayCountConvention::Act360)
///     .calendar(CalendarId::NewYork)
///     .convention(BusinessDayConvention::ModifiedFollowing)
///     .build()
///     .unwrap();
///
/// assert_eq!(schedule.len(), 4);
/// ```
#[derive(Debug, Clone)]
pub struct ScheduleBuilder {
    start_date: Option<Date>,
    end_date: Option<Date>,
    frequency: Option<Frequency>,
    day_count: DayCountConvention,
    calendar: CalendarId,
    convention: BusinessDayConvention,
}

impl Default for ScheduleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ScheduleBuilder {
    /// Creates a new schedule builder.
    ///
    /// Defaults: ACT/365F day count, weekend-only calendar, modified
    /// following adjustment.
    pub fn new() -> Self {
        Self {
            start_date: None,
            end_date: None,
            frequency: None,
            day_count: DayCountConvention::Act365Fixed,
            calendar: CalendarId::WeekendOnly,
            convention: BusinessDayConvention::ModifiedFollowing,
        }
    }

    /// Sets the accrual start date.
    pub fn start(mut self, date: Date) -> Self {
        self.start_date = Some(date);
        self
    }

    /// Sets the accrual end (termination) date.
    pub fn end(mut self, date: Date) -> Self {
        self.end_date = Some(date);
        self
    }

    /// Sets the payment frequency.
    pub fn frequency(mut self, freq: Frequency) -> Self {
        self.frequency = Some(freq);
        self
    }

    /// Sets the day count convention.
    pub fn day_count(mut self, dc: DayCountConvention) -> Self {
        self.day_count = dc;
        self
    }

    /// Sets the holiday calendar.
    pub fn calendar(mut self, calendar: CalendarId) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention for date rolling.
    pub fn convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Builds the schedule.
    ///
    /// # Errors
    ///
    /// - `ScheduleError::MissingField` when start, end or frequency is
    ///   unset
    /// - `ScheduleError::InvalidDateRange` when start is not before end
    /// - `ScheduleError::DateRoll` when tenor arithmetic leaves the
    ///   supported date range
    pub fn build(self) -> Result<Schedule, ScheduleError> {
        let start = self
            .start_date
            .ok_or(ScheduleError::MissingField { field: "start" })?;
        let end = self
            .end_date
            .ok_or(ScheduleError::MissingField { field: "end" })?;
        let frequency = self
            .frequency
            .ok_or(ScheduleError::MissingField { field: "frequency" })?;

        if start >= end {
            return Err(ScheduleError::InvalidDateRange { start, end });
        }

        let calendar = Calendar::get(self.calendar);
        let grid = self.unadjusted_grid(start, end, frequency)?;

        let mut periods = Vec::with_capacity(grid.len() - 1);
        let mut accrual_start = calendar.adjust(start, self.convention);

        for &raw_end in &grid[1..] {
            let accrual_end = calendar.adjust(raw_end, self.convention);
            // Zero-length periods can appear when adjacent grid dates
            // roll onto the same business day; drop them.
            if accrual_end <= accrual_start {
                continue;
            }
            periods.push(Period::new(
                accrual_start,
                accrual_end,
                accrual_end,
                self.day_count,
            ));
            accrual_start = accrual_end;
        }

        if periods.is_empty() {
            return Err(ScheduleError::NoPeriods { start, end });
        }

        Ok(Schedule::new(periods))
    }

    /// Unadjusted date grid: start, start + k*frequency, ..., end.
    ///
    /// Each grid date is generated from the start date (not from the
    /// previous grid date) so that month-end clamping does not drift.
    fn unadjusted_grid(
        &self,
        start: Date,
        end: Date,
        frequency: Frequency,
    ) -> Result<Vec<Date>, ScheduleError> {
        let mut grid = vec![start];
        let mut k: u32 = 1;

        loop {
            let tenor = Tenor::new(k * frequency.months(), TenorUnit::Months)?;
            let date = tenor.add_to(start)?;
            if date >= end {
                grid.push(end);
                break;
            }
            grid.push(date);
            k += 1;
        }

        Ok(grid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn builder(start: Date, end: Date, frequency: Frequency) -> ScheduleBuilder {
        ScheduleBuilder::new()
            .start(start)
            .end(end)
            .frequency(frequency)
    }

    // ========================================
    // Builder Tests
    // ========================================

    #[test]
    fn test_builder_quarterly() {
        let schedule = builder(d(2025, 1, 15), d(2026, 1, 15), Frequency::Quarterly)
            .build()
            .unwrap();

        assert_eq!(schedule.len(), 4);
        assert_eq!(schedule.start_date(), d(2025, 1, 15));
        assert_eq!(schedule.end_date(), d(2026, 1, 15));
    }

    #[test]
    fn test_builder_semi_annual() {
        let schedule = builder(d(2025, 1, 15), d(2027, 1, 15), Frequency::SemiAnnual)
            .day_count(DayCountConvention::Act360)
            .build()
            .unwrap();

        assert_eq!(schedule.len(), 4);
        for period in schedule.iter() {
            assert_eq!(period.day_count(), DayCountConvention::Act360);
        }
    }

    #[test]
    fn test_builder_missing_fields() {
        let result = ScheduleBuilder::new()
            .end(d(2026, 1, 15))
            .frequency(Frequency::Annual)
            .build();
        assert!(matches!(
            result,
            Err(ScheduleError::MissingField { field: "start" })
        ));

        let result = ScheduleBuilder::new()
            .start(d(2025, 1, 15))
            .frequency(Frequency::Annual)
            .build();
        assert!(matches!(
            result,
            Err(ScheduleError::MissingField { field: "end" })
        ));

        let result = ScheduleBuilder::new()
            .start(d(2025, 1, 15))
            .end(d(2026, 1, 15))
            .build();
        assert!(matches!(
            result,
            Err(ScheduleError::MissingField { field: "frequency" })
        ));
    }

    #[test]
    fn test_builder_invalid_date_range() {
        let result = builder(d(2026, 1, 15), d(2025, 1, 15), Frequency::Annual).build();
        assert!(result.unwrap_err().is_invalid_date_range());

        let result = builder(d(2025, 1, 15), d(2025, 1, 15), Frequency::Annual).build();
        assert!(result.unwrap_err().is_invalid_date_range());
    }

    #[test]
    fn test_builder_partial_final_period() {
        // 5 months at quarterly frequency: one full quarter + a stub.
        // 2025-06-15 is a Sunday, so the stub end rolls to Monday.
        let schedule = builder(d(2025, 1, 15), d(2025, 6, 15), Frequency::Quarterly)
            .build()
            .unwrap();

        assert_eq!(schedule.len(), 2);
        assert_eq!(schedule.end_date(), d(2025, 6, 16));
    }

    // ========================================
    // Business Day Adjustment Tests
    // ========================================

    #[test]
    fn test_payment_dates_are_business_days() {
        let schedule = builder(d(2025, 1, 15), d(2027, 1, 15), Frequency::Monthly)
            .calendar(CalendarId::NewYork)
            .build()
            .unwrap();

        let calendar = Calendar::get(CalendarId::NewYork);
        for period in schedule.iter() {
            assert!(calendar.is_business_day(period.payment()));
            assert!(calendar.is_business_day(period.start()));
            assert!(calendar.is_business_day(period.end()));
        }
    }

    #[test]
    fn test_weekend_roll_modified_following() {
        // 2025-02-15 is a Saturday; modified following rolls to Monday 17th
        let schedule = builder(d(2025, 1, 15), d(2025, 2, 15), Frequency::Monthly)
            .build()
            .unwrap();

        assert_eq!(schedule.end_date(), d(2025, 2, 17));
    }

    #[test]
    fn test_adjacent_periods_share_boundary() {
        let schedule = builder(d(2025, 1, 31), d(2027, 1, 31), Frequency::Quarterly)
            .calendar(CalendarId::London)
            .build()
            .unwrap();

        for pair in schedule.periods().windows(2) {
            assert_eq!(pair[0].end(), pair[1].start());
        }
    }

    #[test]
    fn test_month_end_grid_does_not_drift() {
        // Rolling from Jan 31 monthly: Feb end clamps to 28, but the
        // grid is generated from the start date so March lands on the
        // 31st again rather than drifting to the 28th.
        let schedule = builder(d(2025, 1, 31), d(2025, 7, 31), Frequency::Monthly)
            .convention(BusinessDayConvention::Unadjusted)
            .build()
            .unwrap();

        assert_eq!(schedule.periods()[0].end(), d(2025, 2, 28));
        assert_eq!(schedule.periods()[1].end(), d(2025, 3, 31));
        assert_eq!(schedule.periods()[4].end(), d(2025, 6, 30));
        assert_eq!(schedule.end_date(), d(2025, 7, 31));
    }

    // ========================================
    // Schedule Accessor Tests
    // ========================================

    #[test]
    fn test_total_year_fraction() {
        let schedule = builder(d(2025, 1, 15), d(2027, 1, 15), Frequency::SemiAnnual)
            .convention(BusinessDayConvention::Unadjusted)
            .build()
            .unwrap();

        // Two years of ACT/365F accrual, 730 actual days
        assert_relative_eq!(schedule.total_year_fraction(), 730.0 / 365.0, epsilon = 1e-12);
    }

    // ========================================
    // Property Tests
    // ========================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_periods_are_contiguous_and_ordered(
                start_offset in 1u32..365,
                months in 6u32..60,
                freq_idx in 0usize..4,
            ) {
                let frequency = [
                    Frequency::Annual,
                    Frequency::SemiAnnual,
                    Frequency::Quarterly,
                    Frequency::Monthly,
                ][freq_idx];

                let base = Date::from_ymd(2025, 1, 6).unwrap();
                let start = Tenor::new(start_offset, TenorUnit::Days)
                    .unwrap()
                    .add_to(base)
                    .unwrap();
                let end = Tenor::new(months, TenorUnit::Months)
                    .unwrap()
                    .add_to(start)
                    .unwrap();

                let schedule = builder(start, end, frequency)
                    .calendar(CalendarId::NewYork)
                    .build()
                    .unwrap();

                let calendar = Calendar::get(CalendarId::NewYork);
                for period in schedule.iter() {
                    prop_assert!(period.start() < period.end());
                    prop_assert!(calendar.is_business_day(period.payment()));
                }
                for pair in schedule.periods().windows(2) {
                    prop_assert_eq!(pair[0].end(), pair[1].start());
                }
            }
        }
    }

    #[test]
    fn test_payment_dates_ordered() {
        let schedule = builder(d(2025, 1, 15), d(2028, 1, 15), Frequency::Quarterly)
            .calendar(CalendarId::Target)
            .build()
            .unwrap();

        let payments = schedule.payment_dates();
        assert_eq!(payments.len(), schedule.len());
        for pair in payments.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(schedule.last_payment_date(), *payments.last().unwrap());
    }
}
