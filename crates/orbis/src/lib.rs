//! Orbis - Animated bubble charts
//!
//! Orbis sweeps a set of entities through time, interpolating sparse yearly
//! indicators into smooth bubble motion:
//!
//! - **Data**: raw indicator rows cleaned into per-entity time series
//! - **Scales**: linear, logarithmic and square-root mappings to pixels
//! - **Animation**: a fixed-duration sweep with start, pause and reset
//! - **Rendering**: any [`RenderSink`] receives a complete frame per tick
//!
//! # Quick Start
//!
//! ```ignore
//! use orbis::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     orbis::core::logging::init();
//!
//!     let store = build_series_store(&rows, &load_config)?;
//!     let mut chart = BubbleChart::new(store, ChartConfig::default(), MySink)?;
//!     chart.render();
//!
//!     Player::default().play(&mut chart);
//!     Ok(())
//! }
//! ```

pub mod player;

pub use orbis_chart as chart;
pub use orbis_core as core;
pub use orbis_core::math;

pub use orbis_chart::{
    AnimationPhase, AnimationState, BubbleChart, ChartConfig, ChartScales, Clock, ConfigError,
    Entity, EntityId, Frame, FrameTicket, LoadConfig, LoadError, RawRow, RenderItem, RenderSink,
    Scale, ScaleKind, SeriesStore, SystemClock, TimeSeries, YearRange, build_series_store,
};
pub use player::Player;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::player::Player;

    pub use orbis_chart::{
        AxisConfig, BubbleChart, ChartConfig, ChartLayout, ChartScales, DomainPadding, Entity,
        Frame, IndicatorKeys, LabelSource, LoadConfig, RawRow, RenderItem, RenderSink,
        ResetPolicy, ScaleKind, SeriesStore, TimeSeries, YearRange, build_series_store,
    };

    pub use orbis_core::math::Vec2;
}
