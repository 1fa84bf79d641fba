//! Calibratable discount-factor curve.

use num_traits::Float;

use crate::types::error::CurveError;
use crate::types::time::{Date, DayCountConvention};

/// Interpolation method for discount curves.
///
/// Determines how discount factors are interpolated between node
/// pillars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Interpolation {
    /// Log-linear interpolation on discount factors (default).
    ///
    /// Interpolates ln(DF) linearly between pillars, which is
    /// equivalent to assuming a constant forward rate on each segment
    /// and keeps interpolated discount factors strictly positive.
    #[default]
    LogLinear,

    /// Linear interpolation on continuously compounded zero rates.
    ///
    /// Derives zero rates at the pillars, interpolates them linearly,
    /// then recovers the discount factor as exp(-r*t).
    LinearZeroRate,
}

impl Interpolation {
    /// Returns the standard name for this method.
    #[inline]
    pub fn name(&self) -> &'static str {
        match self {
            Interpolation::LogLinear => "log-linear",
            Interpolation::LinearZeroRate => "linear-zero-rate",
        }
    }
}

/// A discount-factor curve over indexed node slots.
///
/// The curve owns an arena of nodes: strictly increasing dates starting
/// at the as-of date, their year-fraction pillars under the curve's day
/// count convention, and one discount factor per node. Node 0 is the
/// as-of date and its discount factor is pinned at 1.0.
///
/// A freshly constructed curve holds unit discount factors everywhere
/// and is *uncalibrated*: `discount_factor` fails fast with
/// `CurveError::NotCalibrated` until a solver has adjusted the node
/// values through `set_node_value` and called `mark_calibrated`. The
/// raw node values stay readable through `node_values` regardless of
/// calibration state.
///
/// Beyond the last node the curve extrapolates flat on the final
/// segment's instantaneous forward rate.
///
/// # Examples
///
/// ```
/// use rates_core::curves::{DiscountCurve, Interpolation};
/// use rates_core::types::time::{Date, DayCountConvention};
///
/// let as_of = Date::from_ymd(2025, 1, 3).unwrap();
/// let pillars = vec![
///     Date::from_ymd(2026, 1, 3).unwrap(),
///     Date::from_ymd(2027, 1, 3).unwrap(),
/// ];
///
/// let mut curve: DiscountCurve<f64> = DiscountCurve::new(
///     as_of,
///     pillars,
///     DayCountConvention::Act365Fixed,
///     Interpolation::LogLinear,
/// ).unwrap();
///
/// curve.set_node_value(1, 0.97).unwrap();
/// curve.set_node_value(2, 0.94).unwrap();
/// curve.mark_calibrated();
///
/// let df = curve.discount_factor(Date::from_ymd(2026, 7, 3).unwrap()).unwrap();
/// assert!(df < 0.97 && df > 0.94);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve<T: Float> {
    /// Node dates; index 0 is the as-of date.
    dates: Vec<Date>,
    /// Year fractions from the as-of date to each node.
    times: Vec<T>,
    /// Discount factor at each node.
    values: Vec<T>,
    /// Day count convention used for all time conversions.
    day_count: DayCountConvention,
    /// Interpolation method between pillars.
    interpolation: Interpolation,
    /// Whether a solver has converged on the node values.
    calibrated: bool,
}

impl<T: Float> DiscountCurve<T> {
    /// Construct a curve from an as-of date and pillar dates.
    ///
    /// All discount factors start at 1.0 and the curve is uncalibrated.
    ///
    /// # Errors
    ///
    /// - `CurveError::EmptyCurve` when no pillar dates are supplied
    /// - `CurveError::NodesNotIncreasing` when the pillar dates are not
    ///   strictly increasing after the as-of date
    pub fn new(
        as_of: Date,
        pillar_dates: Vec<Date>,
        day_count: DayCountConvention,
        interpolation: Interpolation,
    ) -> Result<Self, CurveError> {
        if pillar_dates.is_empty() {
            return Err(CurveError::EmptyCurve);
        }

        let mut dates = Vec::with_capacity(pillar_dates.len() + 1);
        dates.push(as_of);
        dates.extend(pillar_dates);

        for (index, pair) in dates.windows(2).enumerate() {
            if pair[1] <= pair[0] {
                return Err(CurveError::NodesNotIncreasing { index: index + 1 });
            }
        }

        let times = dates
            .iter()
            .map(|&d| T::from(day_count.year_fraction(as_of, d)).unwrap_or_else(T::zero))
            .collect();
        let values = vec![T::one(); dates.len()];

        Ok(Self {
            dates,
            times,
            values,
            day_count,
            interpolation,
            calibrated: false,
        })
    }

    /// Returns the as-of (valuation) date.
    #[inline]
    pub fn as_of(&self) -> Date {
        self.dates[0]
    }

    /// Returns the curve's day count convention.
    #[inline]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the interpolation method.
    #[inline]
    pub fn interpolation(&self) -> Interpolation {
        self.interpolation
    }

    /// Returns the number of nodes, including the as-of node.
    #[inline]
    pub fn num_nodes(&self) -> usize {
        self.dates.len()
    }

    /// Returns all node dates, starting with the as-of date.
    #[inline]
    pub fn node_dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns the pillar dates after the as-of node.
    #[inline]
    pub fn pillar_dates(&self) -> &[Date] {
        &self.dates[1..]
    }

    /// Returns the year fraction from the as-of date to each node.
    #[inline]
    pub fn node_times(&self) -> &[T] {
        &self.times
    }

    /// Returns the raw node discount factors.
    ///
    /// Readable on calibrated and uncalibrated curves alike; this is
    /// the explicit opt-in for inspecting a partial state.
    #[inline]
    pub fn node_values(&self) -> &[T] {
        &self.values
    }

    /// Whether a solver has marked this curve calibrated.
    #[inline]
    pub fn is_calibrated(&self) -> bool {
        self.calibrated
    }

    /// Marks the curve as calibrated.
    ///
    /// Called by the solver once its iteration has converged; pricing
    /// queries fail until then.
    pub fn mark_calibrated(&mut self) {
        self.calibrated = true;
    }

    /// Overwrite the discount factor at a single node slot.
    ///
    /// The solver's only mutation path during iteration.
    ///
    /// # Errors
    ///
    /// - `CurveError::AsOfNodeImmutable` for index 0
    /// - `CurveError::NodeIndexOutOfRange` beyond the arena
    /// - `CurveError::InvalidNodeValue` for non-positive or non-finite
    ///   discount factors
    pub fn set_node_value(&mut self, index: usize, df: T) -> Result<(), CurveError> {
        if index == 0 {
            return Err(CurveError::AsOfNodeImmutable);
        }
        if index >= self.values.len() {
            return Err(CurveError::NodeIndexOutOfRange {
                index,
                count: self.values.len(),
            });
        }
        if df <= T::zero() || !df.is_finite() {
            return Err(CurveError::InvalidNodeValue {
                index,
                value: df.to_f64().unwrap_or(f64::NAN),
            });
        }

        self.values[index] = df;
        Ok(())
    }

    /// Year fraction from the as-of date to `date` under the curve's
    /// day count.
    #[inline]
    pub fn time_from_as_of(&self, date: Date) -> T {
        T::from(self.day_count.year_fraction(self.as_of(), date)).unwrap_or_else(T::zero)
    }

    /// Discount factor for a date.
    ///
    /// # Errors
    ///
    /// - `CurveError::DateBeforeAsOf` for dates before the as-of date
    /// - `CurveError::NotCalibrated` until a solver has converged
    /// - `CurveError::NonFinite` if interpolation produces NaN or
    ///   infinity
    pub fn discount_factor(&self, date: Date) -> Result<T, CurveError> {
        if date < self.as_of() {
            return Err(CurveError::DateBeforeAsOf {
                date: date.to_string(),
                as_of: self.as_of().to_string(),
            });
        }
        self.discount_factor_at(self.time_from_as_of(date))
    }

    /// Discount factor at a year fraction from the as-of date.
    ///
    /// Subject to the same calibration gate as `discount_factor`;
    /// negative times are rejected with `CurveError::NegativeTime`.
    pub fn discount_factor_at(&self, t: T) -> Result<T, CurveError> {
        if t < T::zero() {
            return Err(CurveError::NegativeTime {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        if !self.calibrated {
            return Err(CurveError::NotCalibrated);
        }
        if t == T::zero() {
            return Ok(T::one());
        }

        let df = match self.interpolation {
            Interpolation::LogLinear => self.interpolate_log_linear(t),
            Interpolation::LinearZeroRate => self.interpolate_linear_zero(t),
        };

        if !df.is_finite() || df <= T::zero() {
            return Err(CurveError::NonFinite {
                t: t.to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(df)
    }

    /// Simple-compounded forward rate between two dates.
    ///
    /// `(DF(start)/DF(end) - 1) / yf(start, end)` under the curve's day
    /// count convention.
    ///
    /// # Errors
    ///
    /// `CurveError::DatesOutOfOrder` when `start >= end`, plus the
    /// `discount_factor` error conditions.
    pub fn forward_rate(&self, start: Date, end: Date) -> Result<T, CurveError> {
        if start >= end {
            return Err(CurveError::DatesOutOfOrder {
                start: start.to_string(),
                end: end.to_string(),
            });
        }

        let df_start = self.discount_factor(start)?;
        let df_end = self.discount_factor(end)?;
        let yf = T::from(self.day_count.year_fraction(start, end)).unwrap_or_else(T::zero);

        let forward = (df_start / df_end - T::one()) / yf;
        if !forward.is_finite() {
            return Err(CurveError::NonFinite {
                t: self.time_from_as_of(end).to_f64().unwrap_or(f64::NAN),
            });
        }
        Ok(forward)
    }

    /// Continuously compounded zero rate from the as-of date to `date`.
    ///
    /// # Errors
    ///
    /// `CurveError::DateBeforeAsOf` before the as-of date,
    /// `CurveError::DatesOutOfOrder` on the as-of date itself (zero
    /// elapsed time), plus the `discount_factor` error conditions.
    pub fn zero_rate(&self, date: Date) -> Result<T, CurveError> {
        if date == self.as_of() {
            return Err(CurveError::DatesOutOfOrder {
                start: self.as_of().to_string(),
                end: date.to_string(),
            });
        }

        let df = self.discount_factor(date)?;
        let t = self.time_from_as_of(date);
        Ok(-df.ln() / t)
    }

    /// Log-linear interpolation on discount factors.
    ///
    /// Beyond the last node: flat extrapolation on the last segment's
    /// instantaneous forward rate.
    fn interpolate_log_linear(&self, t: T) -> T {
        let n = self.times.len();
        let last = self.times[n - 1];

        if t >= last {
            // Instantaneous forward of the final segment, held flat.
            let t0 = self.times[n - 2];
            let fwd = (self.values[n - 2].ln() - self.values[n - 1].ln()) / (last - t0);
            return self.values[n - 1] * (-fwd * (t - last)).exp();
        }

        let hi = self.upper_node_index(t);
        let (t0, t1) = (self.times[hi - 1], self.times[hi]);
        let (df0, df1) = (self.values[hi - 1], self.values[hi]);

        let w = (t - t0) / (t1 - t0);
        (df0.ln() * (T::one() - w) + df1.ln() * w).exp()
    }

    /// Linear interpolation on continuously compounded zero rates.
    ///
    /// The as-of node carries no zero rate; times up to the first
    /// pillar use the first pillar's rate flat, and times beyond the
    /// last pillar use the last pillar's rate flat.
    fn interpolate_linear_zero(&self, t: T) -> T {
        let n = self.times.len();

        let zero_at = |i: usize| -self.values[i].ln() / self.times[i];

        let rate = if t <= self.times[1] {
            zero_at(1)
        } else if t >= self.times[n - 1] {
            zero_at(n - 1)
        } else {
            let hi = self.upper_node_index(t);
            let (t0, t1) = (self.times[hi - 1], self.times[hi]);
            let (r0, r1) = (zero_at(hi - 1), zero_at(hi));
            let w = (t - t0) / (t1 - t0);
            r0 * (T::one() - w) + r1 * w
        };

        (-rate * t).exp()
    }

    /// Index of the first node with time strictly greater than `t`.
    ///
    /// Callers guarantee `times[0] <= t < times[n-1]`, so the result is
    /// in `1..n`.
    fn upper_node_index(&self, t: T) -> usize {
        let mut lo = 0;
        let mut hi = self.times.len() - 1;
        while lo + 1 < hi {
            let mid = (lo + hi) / 2;
            if self.times[mid] <= t {
                lo = mid;
            } else {
                hi = mid;
            }
        }
        hi
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn test_curve() -> DiscountCurve<f64> {
        DiscountCurve::new(
            d(2025, 1, 3),
            vec![d(2026, 1, 3), d(2027, 1, 3), d(2028, 1, 3)],
            DayCountConvention::Act365Fixed,
            Interpolation::LogLinear,
        )
        .unwrap()
    }

    fn calibrated_curve() -> DiscountCurve<f64> {
        let mut curve = test_curve();
        curve.set_node_value(1, 0.97).unwrap();
        curve.set_node_value(2, 0.94).unwrap();
        curve.set_node_value(3, 0.90).unwrap();
        curve.mark_calibrated();
        curve
    }

    // ========================================
    // Construction Tests
    // ========================================

    #[test]
    fn test_new_valid() {
        let curve = test_curve();
        assert_eq!(curve.num_nodes(), 4);
        assert_eq!(curve.as_of(), d(2025, 1, 3));
        assert_eq!(curve.pillar_dates().len(), 3);
        assert!(!curve.is_calibrated());
        assert!(curve.node_values().iter().all(|&v| v == 1.0));
    }

    #[test]
    fn test_new_empty() {
        let result: Result<DiscountCurve<f64>, _> = DiscountCurve::new(
            d(2025, 1, 3),
            vec![],
            DayCountConvention::Act365Fixed,
            Interpolation::LogLinear,
        );
        assert_eq!(result.unwrap_err(), CurveError::EmptyCurve);
    }

    #[test]
    fn test_new_not_increasing() {
        let result: Result<DiscountCurve<f64>, _> = DiscountCurve::new(
            d(2025, 1, 3),
            vec![d(2026, 1, 3), d(2026, 1, 3)],
            DayCountConvention::Act365Fixed,
            Interpolation::LogLinear,
        );
        assert!(matches!(
            result.unwrap_err(),
            CurveError::NodesNotIncreasing { index: 2 }
        ));

        // Pillar on the as-of date is also rejected
        let result: Result<DiscountCurve<f64>, _> = DiscountCurve::new(
            d(2025, 1, 3),
            vec![d(2025, 1, 3)],
            DayCountConvention::Act365Fixed,
            Interpolation::LogLinear,
        );
        assert!(matches!(
            result.unwrap_err(),
            CurveError::NodesNotIncreasing { index: 1 }
        ));
    }

    #[test]
    fn test_node_times_match_day_count() {
        let curve = test_curve();
        assert_eq!(curve.node_times()[0], 0.0);
        assert_relative_eq!(curve.node_times()[1], 365.0 / 365.0, epsilon = 1e-12);
    }

    // ========================================
    // Node Mutation Tests
    // ========================================

    #[test]
    fn test_set_node_value() {
        let mut curve = test_curve();
        curve.set_node_value(1, 0.98).unwrap();
        assert_eq!(curve.node_values()[1], 0.98);
    }

    #[test]
    fn test_set_node_value_as_of_immutable() {
        let mut curve = test_curve();
        assert_eq!(
            curve.set_node_value(0, 0.99).unwrap_err(),
            CurveError::AsOfNodeImmutable
        );
    }

    #[test]
    fn test_set_node_value_out_of_range() {
        let mut curve = test_curve();
        assert!(matches!(
            curve.set_node_value(4, 0.9).unwrap_err(),
            CurveError::NodeIndexOutOfRange { index: 4, count: 4 }
        ));
    }

    #[test]
    fn test_set_node_value_rejects_bad_values() {
        let mut curve = test_curve();
        assert!(curve.set_node_value(1, 0.0).is_err());
        assert!(curve.set_node_value(1, -0.5).is_err());
        assert!(curve.set_node_value(1, f64::NAN).is_err());
        assert!(curve.set_node_value(1, f64::INFINITY).is_err());
    }

    // ========================================
    // Calibration Gate Tests
    // ========================================

    #[test]
    fn test_uncalibrated_query_fails_fast() {
        let curve = test_curve();
        let err = curve.discount_factor(d(2026, 1, 3)).unwrap_err();
        assert!(err.is_not_calibrated());

        // Raw node values remain readable
        assert_eq!(curve.node_values().len(), 4);
    }

    #[test]
    fn test_date_before_as_of() {
        let curve = calibrated_curve();
        let err = curve.discount_factor(d(2024, 12, 31)).unwrap_err();
        assert!(err.is_date_before_as_of());
    }

    #[test]
    fn test_negative_time_rejected() {
        let curve = calibrated_curve();
        assert!(matches!(
            curve.discount_factor_at(-0.5).unwrap_err(),
            CurveError::NegativeTime { .. }
        ));
    }

    // ========================================
    // Interpolation Tests
    // ========================================

    #[test]
    fn test_df_at_as_of_is_exactly_one() {
        let curve = calibrated_curve();
        assert_eq!(curve.discount_factor(d(2025, 1, 3)).unwrap(), 1.0);
        assert_eq!(curve.discount_factor_at(0.0).unwrap(), 1.0);
    }

    #[test]
    fn test_df_roundtrips_node_values() {
        let curve = calibrated_curve();
        for (date, value) in curve.node_dates().iter().zip(curve.node_values()) {
            let df = curve.discount_factor(*date).unwrap();
            assert_relative_eq!(df, *value, epsilon = 1e-14);
        }
    }

    #[test]
    fn test_log_linear_between_nodes() {
        let curve = calibrated_curve();
        // Halfway in time between the 1y and 2y pillars
        let t = (curve.node_times()[1] + curve.node_times()[2]) / 2.0;
        let df = curve.discount_factor_at(t).unwrap();
        let expected = (0.5 * 0.97_f64.ln() + 0.5 * 0.94_f64.ln()).exp();
        assert_relative_eq!(df, expected, epsilon = 1e-12);
    }

    #[test]
    fn test_log_linear_constant_forward_within_segment() {
        let curve = calibrated_curve();
        // Equal-length (90 day) windows inside the 2y-3y segment see
        // the same simple forward
        let f1 = curve.forward_rate(d(2027, 2, 3), d(2027, 5, 4)).unwrap();
        let f2 = curve.forward_rate(d(2027, 8, 3), d(2027, 11, 1)).unwrap();
        assert_relative_eq!(f1, f2, epsilon = 1e-10);
    }

    #[test]
    fn test_monotone_under_positive_forwards() {
        let mut curve: DiscountCurve<f64> = DiscountCurve::new(
            d(2025, 1, 3),
            vec![d(2026, 1, 3), d(2027, 1, 3), d(2028, 1, 3)],
            DayCountConvention::Act365Fixed,
            Interpolation::LogLinear,
        )
        .unwrap();
        // Constant 3% continuous forward
        for (i, &t) in curve.node_times().to_vec().iter().enumerate().skip(1) {
            curve.set_node_value(i, (-0.03 * t).exp()).unwrap();
        }
        curve.mark_calibrated();

        let mut prev = 1.0;
        for step in 1..=40 {
            let t = step as f64 * 0.1;
            let df = curve.discount_factor_at(t).unwrap();
            assert!(df <= prev, "DF must not increase: t={}, df={}", t, df);
            prev = df;
        }
    }

    #[test]
    fn test_flat_forward_extrapolation() {
        let curve = calibrated_curve();
        let t_last = curve.node_times()[3];
        let t0 = curve.node_times()[2];
        let fwd = (0.94_f64.ln() - 0.90_f64.ln()) / (t_last - t0);

        let df = curve.discount_factor_at(t_last + 1.0).unwrap();
        assert_relative_eq!(df, 0.90 * (-fwd).exp(), epsilon = 1e-12);
    }

    #[test]
    fn test_linear_zero_rate_interpolation() {
        let mut curve = DiscountCurve::new(
            d(2025, 1, 3),
            vec![d(2026, 1, 3), d(2027, 1, 3)],
            DayCountConvention::Act365Fixed,
            Interpolation::LinearZeroRate,
        )
        .unwrap();
        curve.set_node_value(1, 0.97).unwrap();
        curve.set_node_value(2, 0.93).unwrap();
        curve.mark_calibrated();

        // Node values round-trip under zero-rate interpolation too
        assert_relative_eq!(
            curve.discount_factor(d(2026, 1, 3)).unwrap(),
            0.97,
            epsilon = 1e-12
        );

        // Below the first pillar the first zero rate applies flat
        let r1 = -(0.97_f64.ln()) / curve.node_times()[1];
        let df = curve.discount_factor_at(0.5).unwrap();
        assert_relative_eq!(df, (-r1 * 0.5).exp(), epsilon = 1e-12);
    }

    // ========================================
    // Rate Query Tests
    // ========================================

    #[test]
    fn test_forward_rate_from_df_ratio() {
        let curve = calibrated_curve();
        let start = d(2026, 1, 3);
        let end = d(2027, 1, 3);
        let yf = DayCountConvention::Act365Fixed.year_fraction(start, end);

        let forward = curve.forward_rate(start, end).unwrap();
        assert_relative_eq!(forward, (0.97 / 0.94 - 1.0) / yf, epsilon = 1e-12);
    }

    #[test]
    fn test_forward_rate_inverted_dates() {
        let curve = calibrated_curve();
        assert!(matches!(
            curve.forward_rate(d(2027, 1, 3), d(2026, 1, 3)).unwrap_err(),
            CurveError::DatesOutOfOrder { .. }
        ));
    }

    #[test]
    fn test_zero_rate() {
        let curve = calibrated_curve();
        let date = d(2026, 1, 3);
        let t = curve.time_from_as_of(date);
        let rate = curve.zero_rate(date).unwrap();
        assert_relative_eq!(rate, -(0.97_f64.ln()) / t, epsilon = 1e-12);

        assert!(curve.zero_rate(curve.as_of()).is_err());
    }

    // ========================================
    // Property Tests
    // ========================================

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn test_interpolated_df_stays_positive(
                df1 in 0.5f64..1.0,
                df_ratio in 0.5f64..1.0,
                w in 0.0f64..4.0,
            ) {
                let mut curve = DiscountCurve::new(
                    Date::from_ymd(2025, 1, 3).unwrap(),
                    vec![
                        Date::from_ymd(2027, 1, 3).unwrap(),
                        Date::from_ymd(2029, 1, 3).unwrap(),
                    ],
                    DayCountConvention::Act365Fixed,
                    Interpolation::LogLinear,
                ).unwrap();
                curve.set_node_value(1, df1).unwrap();
                curve.set_node_value(2, df1 * df_ratio).unwrap();
                curve.mark_calibrated();

                let df = curve.discount_factor_at(w).unwrap();
                prop_assert!(df > 0.0);
                prop_assert!(df.is_finite());
            }
        }
    }
}
