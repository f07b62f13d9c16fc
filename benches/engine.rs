//! Benchmarks for the predictors over histories of increasing length.

use chrono::{Duration, NaiveDate};
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use groundwater_forecast::core::RawRecord;
use groundwater_forecast::models::{
    FutureLevelForecaster, SeasonalForecaster, StressTransitionEstimator,
};
use groundwater_forecast::validation::filter_invalid_historical_data;

fn generate_history(n: usize) -> Vec<RawRecord> {
    let start = NaiveDate::from_ymd_opt(1990, 1, 1).unwrap();
    (0..n)
        .map(|i| {
            let seasonal = 2.0 * (2.0 * std::f64::consts::PI * i as f64 / 12.0).sin();
            RawRecord::new(
                start + Duration::days(30 * i as i64),
                10.0 + 0.01 * i as f64 + seasonal,
            )
        })
        .collect()
}

fn bench_predictors(c: &mut Criterion) {
    let mut group = c.benchmark_group("predictors");
    let base = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();
    let future = FutureLevelForecaster::default();
    let seasonal = SeasonalForecaster::default();

    for size in [48, 120, 480, 1200].iter() {
        let history = generate_history(*size);

        group.bench_with_input(BenchmarkId::new("filter", size), size, |b, _| {
            b.iter(|| filter_invalid_historical_data(black_box(&history)))
        });

        group.bench_with_input(BenchmarkId::new("future_levels", size), size, |b, _| {
            b.iter(|| future.forecast(black_box(&history), 0.12, 10.0, base))
        });

        group.bench_with_input(BenchmarkId::new("seasonal", size), size, |b, _| {
            b.iter(|| seasonal.forecast(black_box(&history), base, 0.12))
        });
    }

    group.finish();
}

fn bench_transition(c: &mut Criterion) {
    let estimator = StressTransitionEstimator::default();
    let today = NaiveDate::from_ymd_opt(2024, 6, 1).unwrap();

    c.bench_function("stress_transition", |b| {
        b.iter(|| estimator.estimate(black_box("Semi-critical"), black_box(0.32), 14.0, today))
    });
}

criterion_group!(benches, bench_predictors, bench_transition);
criterion_main!(benches);
