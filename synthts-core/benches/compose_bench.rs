//! Criterion benchmarks for synthts hot paths.
//!
//! Benchmarks:
//! 1. Full composition (default spec at several lengths)
//! 2. ARMA recurrence (walk vs. higher order with an exogenous regressor)
//! 3. Seasonality indices (holiday lookup, semi-markov renewal, sin_covar)
//! 4. Batch composition (rayon vs. sequential)

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use chrono::{Duration, NaiveDate};
use synthts_core::batch::compose_sequential;
use synthts_core::{
    compose, compose_batch, season_index, ArmaWalk, DateAxis, ExogenousRegressor, HolidaySpan,
    RandomSource, SeasonSpec, SeriesSpec,
};

// ── Helpers ──────────────────────────────────────────────────────────

fn start() -> NaiveDate {
    NaiveDate::from_ymd_opt(2019, 1, 1).unwrap()
}

fn seeded_spec(n: usize, seed: u64) -> SeriesSpec {
    SeriesSpec {
        seed: Some(seed),
        season: Some(
            SeasonSpec::new("fixed+error")
                .with_period_length(7)
                .with_period_sd(1.0)
                .with_start_index(3),
        ),
        ..SeriesSpec::new(start(), n)
    }
}

// ── 1. Composition ───────────────────────────────────────────────────

fn bench_compose(c: &mut Criterion) {
    let mut group = c.benchmark_group("compose");

    for &n in &[365, 1096, 3650] {
        let spec = seeded_spec(n, 42);
        group.bench_with_input(BenchmarkId::new("fixed_error", n), &n, |b, _| {
            b.iter(|| compose(black_box(&spec)));
        });
    }

    group.finish();
}

// ── 2. ARMA recurrence ───────────────────────────────────────────────

fn bench_arma(c: &mut Criterion) {
    let mut group = c.benchmark_group("arma");

    for &n in &[1096, 10_000] {
        let walk = ArmaWalk::random_walk(2.0);
        group.bench_with_input(BenchmarkId::new("random_walk", n), &n, |b, &n| {
            b.iter(|| walk.generate(black_box(n), &mut RandomSource::seeded(7)));
        });

        let driver: Vec<f64> = (0..n).map(|i| (i as f64 * 0.05).sin()).collect();
        let order_four = ArmaWalk::new(vec![0.5, 0.2, 0.1, 0.05], vec![0.3, 0.1], 1.0)
            .with_exogenous(ExogenousRegressor::new(vec![0.4, 0.2, 0.1], driver));
        group.bench_with_input(BenchmarkId::new("ar4_ma2_exog3", n), &n, |b, &n| {
            b.iter(|| order_four.generate(black_box(n), &mut RandomSource::seeded(7)));
        });
    }

    group.finish();
}

// ── 3. Seasonality ───────────────────────────────────────────────────

fn bench_season(c: &mut Criterion) {
    let mut group = c.benchmark_group("season_index");
    let axis = DateAxis::build(start(), 3650);

    let spans: Vec<HolidaySpan> = (0..10)
        .map(|year| HolidaySpan::new(start() + Duration::days(365 * year + 100), 4))
        .collect();
    let holiday = SeasonSpec::new("holiday").with_holidays(&spans);
    group.bench_function("holiday_10y", |b| {
        b.iter(|| season_index(black_box(axis.as_slice()), &holiday, &mut RandomSource::seeded(1)));
    });

    let semi_markov = SeasonSpec::new("semi-markov")
        .with_period_length(7)
        .with_period_sd(2.0)
        .with_start_index(0);
    group.bench_function("semi_markov_10y", |b| {
        b.iter(|| {
            season_index(black_box(axis.as_slice()), &semi_markov, &mut RandomSource::seeded(1))
        });
    });

    let covar = SeasonSpec::new("sin_covar")
        .with_period_length(365)
        .with_start_index(0);
    group.bench_function("sin_covar_10y", |b| {
        b.iter(|| season_index(black_box(axis.as_slice()), &covar, &mut RandomSource::seeded(1)));
    });

    group.finish();
}

// ── 4. Batch ─────────────────────────────────────────────────────────

fn bench_batch(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    group.sample_size(20);

    let specs: Vec<SeriesSpec> = (0..64).map(|seed| seeded_spec(1096, seed)).collect();
    group.bench_function("rayon_64", |b| {
        b.iter(|| compose_batch(black_box(&specs)));
    });
    group.bench_function("sequential_64", |b| {
        b.iter(|| compose_sequential(black_box(&specs)));
    });

    group.finish();
}

criterion_group!(benches, bench_compose, bench_arma, bench_season, bench_batch);
criterion_main!(benches);
