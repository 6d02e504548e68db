//! Orbis Chart - Interpolation and sweep animation for animated bubble charts
//!
//! This crate provides:
//! - Sparse yearly time series with linear interpolation between samples
//! - An immutable, insertion-ordered store of entities loaded from raw rows
//! - Linear, logarithmic and square-root scales from data domains to pixels
//! - A clock-driven controller sweeping the year range with start/pause/reset
//! - Per-entity view state, label visibility and a stable draw order
//! - A [`RenderSink`] trait receiving one complete [`Frame`] per tick
//!
//! # Example
//!
//! ```ignore
//! use orbis_chart::*;
//!
//! let years = YearRange::new(1990, 2015)?;
//! let load = LoadConfig::new(IndicatorKeys::new("Income", "Life expectancy", "Population"), years);
//! let store = build_series_store(&rows, &load)?;
//!
//! let mut chart = BubbleChart::new(store, ChartConfig::default(), sink)?;
//! chart.render();
//!
//! let mut ticket = chart.start();
//! while let Some(t) = ticket {
//!     ticket = chart.on_frame(t);
//! }
//! ```

// Data
mod config;
mod error;
mod interpolate;
mod series;
mod store;

// Presentation
mod order;
mod scale;
mod view;

// Animation
mod animation;
mod clock;

// Output
mod chart;
mod sink;

pub use config::*;
pub use error::*;
pub use series::*;
pub use store::*;

pub use order::*;
pub use scale::*;
pub use view::*;

pub use animation::*;
pub use clock::*;

pub use chart::*;
pub use sink::*;
