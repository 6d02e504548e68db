//! Sweeps a small dataset through time and prints every tenth frame.
//!
//! Run with: cargo run -p orbis --example headless_sweep
//!
//! Set `ORBIS_PROFILE=1` to serve puffin profiling data on port 8585.

use std::time::Duration;

use orbis::core::logging;
use orbis::core::profiling::{ProfilingBackend, init_profiling};
use orbis::prelude::*;

/// (country, [(year, income, life expectancy, population)]), sampled once a decade
const DATA: &[(&str, [(i32, f64, f64, f64); 4])] = &[
    ("Brazil", [
        (1990, 9_000.0, 66.3, 149e6),
        (2000, 10_500.0, 70.1, 175e6),
        (2010, 14_200.0, 73.6, 196e6),
        (2020, 14_000.0, 75.9, 213e6),
    ]),
    ("Japan", [
        (1990, 35_000.0, 79.0, 123e6),
        (2000, 37_700.0, 81.2, 127e6),
        (2010, 38_800.0, 82.9, 128e6),
        (2020, 41_400.0, 84.6, 126e6),
    ]),
    ("Nigeria", [
        (1990, 3_200.0, 45.9, 95e6),
        (2000, 3_000.0, 46.3, 122e6),
        (2010, 4_800.0, 50.9, 160e6),
        (2020, 5_000.0, 54.7, 208e6),
    ]),
];

/// Prints the year and the bubbles in draw order.
#[derive(Default)]
struct ConsoleSink {
    frames: u64,
}

impl RenderSink for ConsoleSink {
    fn present(&mut self, frame: &Frame<'_>) {
        self.frames += 1;
        if self.frames % 10 != 1 {
            return;
        }

        println!("{} ({:.2})", frame.display_year, frame.year);
        for item in frame.items {
            let bubble = item.project(frame.scales);
            let label = if item.label_hidden { "" } else { &*item.label };
            println!(
                "  {:>8} at ({:6.1}, {:5.1}) r={:4.1}px {}",
                item.entity.as_str(), bubble.center.x, bubble.center.y, bubble.radius, label
            );
        }
    }
}

fn store() -> Result<SeriesStore, Box<dyn std::error::Error>> {
    let mut builder = SeriesStore::builder().with_years(YearRange::new(1990, 2020)?);
    for (country, samples) in DATA {
        let series = |pick: fn(&(i32, f64, f64, f64)) -> f64| {
            let pairs: Vec<(i32, f64)> = samples.iter().map(|s| (s.0, pick(s))).collect();
            TimeSeries::from_pairs(&pairs)
        };
        builder.add_entity(Entity::new(
            *country,
            series(|s| s.1)?,
            series(|s| s.2)?,
            series(|s| s.3)?,
        ))?;
    }
    Ok(builder.build()?)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    if std::env::var_os("ORBIS_PROFILE").is_some() {
        init_profiling(ProfilingBackend::PuffinHttp);
    }

    // The sweep interpolates between the decade samples
    let store = store()?;

    let config = ChartConfig::default()
        .with_sweep_duration(Duration::from_secs(3))
        .with_x_axis(
            AxisConfig::linear()
                .with_kind(ScaleKind::log10())
                .with_floor(None),
        );

    let mut chart = BubbleChart::new(store, config, ConsoleSink::default())?;
    chart.render();

    let frames = Player::default().play(&mut chart);
    println!("{} frames, {} printed", frames, chart.sink().frames.div_ceil(10));

    Ok(())
}
