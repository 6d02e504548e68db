//! Benchmarks for interpolation and the per-frame tick pipeline.

use std::time::Duration;

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use orbis_chart::{
    BubbleChart, ChartConfig, Entity, NullSink, SeriesStore, TimeSeries, YearRange,
};
use orbis_test_utils::ManualClock;

fn series(len: usize, seed: f64) -> TimeSeries {
    let pairs: Vec<(f64, f64)> = (0..len)
        .map(|i| (1800.0 + i as f64, seed * (1.0 + (i as f64 * 0.37).sin().abs())))
        .collect();
    TimeSeries::from_pairs(&pairs).unwrap()
}

fn store(entities: usize) -> SeriesStore {
    let mut builder = SeriesStore::builder().with_years(YearRange::new(1800, 2009).unwrap());
    for i in 0..entities {
        let seed = 1.0 + i as f64;
        builder
            .add_entity(Entity::new(
                format!("entity-{i}").as_str(),
                series(210, seed * 1_000.0),
                series(210, seed),
                series(210, seed * 1_000_000.0),
            ))
            .unwrap();
    }
    builder.build().unwrap()
}

fn bench_interpolate(c: &mut Criterion) {
    let mut group = c.benchmark_group("interpolate");

    for len in [2, 50, 210, 1000] {
        let series = series(len, 1.0);
        let last = series.last().year;
        group.bench_with_input(BenchmarkId::from_parameter(len), &len, |b, _| {
            b.iter(|| series.value_at(black_box(last - 0.5)));
        });
    }

    group.finish();
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for entities in [10, 200, 1000] {
        group.throughput(Throughput::Elements(entities as u64));

        let clock = ManualClock::new();
        let config = ChartConfig::default().with_sweep_duration(Duration::from_secs(864_000));
        let mut chart =
            BubbleChart::with_clock(store(entities), config, NullSink, Box::new(clock.clone()))
                .unwrap();
        let ticket = chart.start().unwrap();

        group.bench_with_input(
            BenchmarkId::from_parameter(entities),
            &entities,
            |b, _| {
                b.iter(|| {
                    clock.advance_ms(16);
                    chart.on_frame(black_box(ticket))
                });
            },
        );
    }

    group.finish();
}

criterion_group!(benches, bench_interpolate, bench_tick);
criterion_main!(benches);
