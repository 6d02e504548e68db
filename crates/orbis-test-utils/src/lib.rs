//! Test utilities for Orbis charts.
//!
//! The main components are:
//!
//! - [`RecordingSink`] - Render sink that keeps a copy of every frame
//! - [`ManualClock`] - Clock that only moves when told to
//! - [`fixtures`] - Small datasets in raw-row and store form
//!
//! # Example
//!
//! ```rust
//! use orbis_chart::{BubbleChart, ChartConfig};
//! use orbis_test_utils::{ManualClock, RecordingSink, fixtures};
//!
//! let sink = RecordingSink::new();
//! let clock = ManualClock::new();
//! let mut chart = BubbleChart::with_clock(
//!     fixtures::store(),
//!     ChartConfig::default(),
//!     sink.clone(),
//!     Box::new(clock.clone()),
//! )
//! .unwrap();
//!
//! chart.render();
//! assert_eq!(sink.frame_count(), 1);
//! assert_eq!(sink.last().unwrap().display_year, fixtures::START_YEAR);
//! ```
//!
//! Both the sink and the clock are cheap handles over shared state, so a test
//! keeps one clone while the chart owns the other.

mod clock;
pub mod fixtures;
mod recording;

pub use clock::*;
pub use recording::*;
