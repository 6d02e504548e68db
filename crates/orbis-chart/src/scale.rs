//! Domain-to-pixel scales for the horizontal, vertical and radius dimensions.
//!
//! This module provides:
//! - `ScaleKind` - Linear, logarithmic and square-root transforms
//! - `Scale` - A transform bound to a data domain and a pixel range
//! - `ChartScales` - The three scales of a bubble chart, derived from a store

use crate::config::{AxisConfig, ChartConfig, DomainPadding};
use crate::store::{DomainRange, SeriesStore};

/// Tick count targeted when rounding a domain with [`Scale::nice`].
pub const NICE_TICK_COUNT: usize = 10;

/// Scale type for a dimension.
///
/// Determines how data values are mapped to pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum ScaleKind {
    /// Linear scale (default).
    #[default]
    Linear,

    /// Logarithmic scale.
    ///
    /// Useful for indicators spanning orders of magnitude such as income.
    /// Domain and values must be > 0.
    Logarithmic {
        /// Log base (typically 10 or e)
        base: f64,
    },

    /// Square-root scale.
    ///
    /// Used for bubble radii so that area, not radius, tracks the value.
    Sqrt,
}

impl ScaleKind {
    /// Create a base-10 logarithmic scale.
    pub fn log10() -> Self {
        Self::Logarithmic { base: 10.0 }
    }

    /// Create a natural logarithmic scale.
    pub fn ln() -> Self {
        Self::Logarithmic {
            base: std::f64::consts::E,
        }
    }

    /// Transform a data value to normalized coordinates [0, 1].
    ///
    /// A zero-width domain maps every value to 0.5.
    pub fn normalize(&self, value: f64, min: f64, max: f64) -> f64 {
        if (max - min).abs() < f64::EPSILON {
            return 0.5;
        }

        match self {
            Self::Linear => (value - min) / (max - min),

            Self::Logarithmic { base } => {
                if value <= 0.0 || min <= 0.0 || max <= 0.0 {
                    // Fall back to linear for invalid log values
                    return (value - min) / (max - min);
                }
                let log_value = value.log(*base);
                let log_min = min.log(*base);
                let log_max = max.log(*base);
                (log_value - log_min) / (log_max - log_min)
            }

            Self::Sqrt => {
                let sqrt_min = signed_sqrt(min);
                let sqrt_max = signed_sqrt(max);
                (signed_sqrt(value) - sqrt_min) / (sqrt_max - sqrt_min)
            }
        }
    }

    /// Transform a normalized coordinate back to data value.
    ///
    /// Inverse of `normalize`.
    pub fn denormalize(&self, normalized: f64, min: f64, max: f64) -> f64 {
        match self {
            Self::Linear => min + normalized * (max - min),

            Self::Logarithmic { base } => {
                if min <= 0.0 || max <= 0.0 {
                    return min + normalized * (max - min);
                }
                let log_min = min.log(*base);
                let log_max = max.log(*base);
                let log_value = log_min + normalized * (log_max - log_min);
                base.powf(log_value)
            }

            Self::Sqrt => {
                let sqrt_min = signed_sqrt(min);
                let sqrt_max = signed_sqrt(max);
                let s = sqrt_min + normalized * (sqrt_max - sqrt_min);
                s.signum() * s * s
            }
        }
    }
}

fn signed_sqrt(x: f64) -> f64 {
    x.signum() * x.abs().sqrt()
}

/// Step between round ticks for roughly `count` ticks over `[min, max]`.
fn tick_step(min: f64, max: f64, count: usize) -> Option<f64> {
    let span = max - min;
    if !(span.is_finite() && span > 0.0) || count == 0 {
        return None;
    }

    let mut step = 10f64.powf((span / count as f64).log10().floor());
    let err = count as f64 / span * step;
    if err <= 0.15 {
        step *= 10.0;
    } else if err <= 0.35 {
        step *= 5.0;
    } else if err <= 0.75 {
        step *= 2.0;
    }
    Some(step)
}

/// A transform bound to a data domain and an output pixel range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Scale {
    kind: ScaleKind,
    domain: DomainRange,
    range: (f64, f64),
}

impl Scale {
    pub fn new(kind: ScaleKind, domain: DomainRange, range: (f64, f64)) -> Self {
        Self {
            kind,
            domain,
            range,
        }
    }

    pub fn linear(domain: DomainRange, range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Linear, domain, range)
    }

    pub fn sqrt(domain: DomainRange, range: (f64, f64)) -> Self {
        Self::new(ScaleKind::Sqrt, domain, range)
    }

    pub fn log10(domain: DomainRange, range: (f64, f64)) -> Self {
        Self::new(ScaleKind::log10(), domain, range)
    }

    #[inline]
    pub fn kind(&self) -> ScaleKind {
        self.kind
    }

    #[inline]
    pub fn domain(&self) -> DomainRange {
        self.domain
    }

    #[inline]
    pub fn range(&self) -> (f64, f64) {
        self.range
    }

    /// Map a domain value to the output range.
    ///
    /// Values outside the domain extrapolate; a degenerate domain maps to the
    /// range midpoint.
    pub fn map(&self, value: f64) -> f64 {
        let t = self
            .kind
            .normalize(value, self.domain.min, self.domain.max);
        let (r0, r1) = self.range;
        r0 + t * (r1 - r0)
    }

    /// Map an output value back into the domain, e.g. for pointer hit-testing.
    pub fn invert(&self, output: f64) -> f64 {
        let (r0, r1) = self.range;
        if (r1 - r0).abs() < f64::EPSILON || self.domain.is_degenerate() {
            return self.domain.min;
        }
        let t = (output - r0) / (r1 - r0);
        self.kind
            .denormalize(t, self.domain.min, self.domain.max)
    }

    /// Extend the domain outward to round tick boundaries.
    ///
    /// Linear and square-root domains snap to a 1/2/5 x 10^n step; log domains
    /// snap to whole powers of the base. Degenerate domains are left alone.
    pub fn nice(mut self) -> Self {
        let DomainRange { min, max } = self.domain;
        match self.kind {
            ScaleKind::Linear | ScaleKind::Sqrt => {
                if let Some(step) = tick_step(min, max, NICE_TICK_COUNT) {
                    self.domain =
                        DomainRange::new((min / step).floor() * step, (max / step).ceil() * step);
                }
            }
            ScaleKind::Logarithmic { base } => {
                if min > 0.0 && max > min {
                    self.domain = DomainRange::new(
                        base.powf(min.log(base).floor()),
                        base.powf(max.log(base).ceil()),
                    );
                }
            }
        }
        self
    }
}

/// The three scales consumed on every tick.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartScales {
    /// Horizontal axis
    pub x: Scale,
    /// Vertical axis
    pub y: Scale,
    /// Bubble radius in pixels
    pub radius: Scale,
}

impl ChartScales {
    /// Derive scales from the store's domains and the chart configuration.
    ///
    /// Axis domains run from the configured floor (or the data minimum) to the
    /// data maximum; the vertical domain is padded first. The radius domain is
    /// the raw data domain.
    pub fn from_store(store: &SeriesStore, config: &ChartConfig) -> Self {
        let layout = &config.layout;
        let domains = store.domains();

        let x = axis_scale(
            &config.x_axis,
            domains.x,
            DomainPadding::NONE,
            layout.x_range(),
        );
        let y = axis_scale(
            &config.y_axis,
            domains.y,
            config.y_padding,
            layout.y_range(),
        );
        let radius = Scale::new(config.radius_kind, domains.radius, config.radius_range);

        Self { x, y, radius }
    }
}

fn axis_scale(
    axis: &AxisConfig,
    data: DomainRange,
    padding: DomainPadding,
    range: (f64, f64),
) -> Scale {
    let padded = data.padded(padding);
    let lower = match (axis.kind, axis.floor) {
        // Log domains cannot reach zero; start at the data instead
        (ScaleKind::Logarithmic { .. }, Some(floor)) if floor <= 0.0 => padded.min,
        (_, floor) => floor.unwrap_or(padded.min),
    };
    if matches!(axis.kind, ScaleKind::Logarithmic { .. }) && lower <= 0.0 {
        tracing::warn!(
            "Logarithmic axis over non-positive domain start {}, mapping linearly",
            lower
        );
    }
    let scale = Scale::new(axis.kind, DomainRange::spanning(lower, padded.max), range);
    if axis.nice { scale.nice() } else { scale }
}
