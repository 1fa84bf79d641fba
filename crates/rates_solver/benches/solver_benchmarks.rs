//! Benchmarks for rates_solver.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rates_core::calendar::{Calendar, CalendarId};
use rates_core::curves::{DiscountCurve, Interpolation};
use rates_core::types::tenor::{Tenor, TenorUnit};
use rates_core::types::time::{BusinessDayConvention, Date, DayCountConvention};
use rates_instruments::swap::{InterestRateSwap, SwapConventions, SwapDirection};
use rates_solver::{CalibrationConfig, CalibrationInstrument, CurveSolver};

/// Annual par-swap ladder of the given depth in years.
fn ladder(years: u32) -> (DiscountCurve<f64>, Vec<CalibrationInstrument>) {
    let as_of = Date::from_ymd(2025, 1, 7).unwrap();
    let calendar = Calendar::get(CalendarId::NewYork);
    let conventions = SwapConventions::usd_irs();

    let mut pillars = Vec::with_capacity(years as usize);
    let mut instruments = Vec::with_capacity(years as usize);

    for y in 1..=years {
        let tenor = Tenor::new(y, TenorUnit::Years).unwrap();
        let end = calendar
            .advance(as_of, tenor, BusinessDayConvention::ModifiedFollowing)
            .unwrap();
        let rate = 0.03 + 0.001 * y as f64;
        let swap = InterestRateSwap::from_conventions(
            1.0,
            rate,
            0.0,
            as_of,
            end,
            SwapDirection::PayFixed,
            &conventions,
        )
        .unwrap();
        pillars.push(end);
        instruments.push(CalibrationInstrument::new(format!("{}Y", y), swap, rate));
    }

    let curve = DiscountCurve::new(
        as_of,
        pillars,
        DayCountConvention::Act365Fixed,
        Interpolation::LogLinear,
    )
    .unwrap();
    (curve, instruments)
}

fn benchmark_calibration(c: &mut Criterion) {
    let mut group = c.benchmark_group("calibrate_ladder");

    for years in [2u32, 5, 10] {
        let (curve, instruments) = ladder(years);

        group.bench_with_input(
            BenchmarkId::from_parameter(years),
            &(curve, instruments),
            |b, (curve, instruments)| {
                b.iter(|| {
                    let mut solver = CurveSolver::new(
                        black_box(curve.clone()),
                        black_box(instruments.clone()),
                        CalibrationConfig::default(),
                    );
                    solver.calibrate().unwrap()
                })
            },
        );
    }

    group.finish();
}

fn benchmark_curve_query(c: &mut Criterion) {
    let (curve, instruments) = ladder(10);
    let mut solver = CurveSolver::new(curve, instruments, CalibrationConfig::default());
    solver.calibrate().unwrap();
    let curve = solver.curve();

    c.bench_function("discount_factor_interpolated", |b| {
        b.iter(|| curve.discount_factor_at(black_box(4.4)).unwrap())
    });
}

criterion_group!(benches, benchmark_calibration, benchmark_curve_query);
criterion_main!(benches);
