//! Configuration for loading data and building a chart.

use std::time::Duration;

use crate::error::{ConfigError, LoadError};
use crate::scale::ScaleKind;

/// Inclusive integer year range covered by the dataset and the sweep.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct YearRange {
    pub(crate) start: i32,
    pub(crate) end: i32,
}

impl YearRange {
    pub fn new(start: i32, end: i32) -> Result<Self, LoadError> {
        if start > end {
            return Err(LoadError::InvalidYearRange { start, end });
        }
        Ok(Self { start, end })
    }

    #[inline]
    pub fn start(&self) -> i32 {
        self.start
    }

    #[inline]
    pub fn end(&self) -> i32 {
        self.end
    }

    /// Every integer year in the range.
    pub fn years(&self) -> impl Iterator<Item = i32> {
        self.start..=self.end
    }

    pub fn len(&self) -> usize {
        (self.end - self.start) as usize + 1
    }

    /// Always `false`, a range holds at least one year.
    pub fn is_empty(&self) -> bool {
        false
    }
}

/// Indicator names feeding each dimension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IndicatorKeys {
    /// Indicator on the horizontal axis
    pub x: String,
    /// Indicator on the vertical axis
    pub y: String,
    /// Indicator driving bubble size
    pub radius: String,
}

impl IndicatorKeys {
    pub fn new(x: impl Into<String>, y: impl Into<String>, radius: impl Into<String>) -> Self {
        Self {
            x: x.into(),
            y: y.into(),
            radius: radius.into(),
        }
    }
}

/// Tells the loader which columns identify entities and indicators.
///
/// Each raw row is one (entity, indicator) pair with one column per year.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadConfig {
    /// Column holding the entity name
    pub entity_column: String,
    /// Column holding the indicator name
    pub indicator_column: String,
    /// Indicators mapped to chart dimensions
    pub indicators: IndicatorKeys,
    /// Years that must be present for every series
    pub years: YearRange,
}

impl LoadConfig {
    pub fn new(indicators: IndicatorKeys, years: YearRange) -> Self {
        Self {
            entity_column: "Country".to_string(),
            indicator_column: "Indicator".to_string(),
            indicators,
            years,
        }
    }

    pub fn with_entity_column(mut self, column: impl Into<String>) -> Self {
        self.entity_column = column.into();
        self
    }

    pub fn with_indicator_column(mut self, column: impl Into<String>) -> Self {
        self.indicator_column = column.into();
        self
    }
}

/// Multiplicative padding applied to a domain before it is handed to a scale.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DomainPadding {
    /// Factor applied to the domain minimum
    pub lower: f64,
    /// Factor applied to the domain maximum
    pub upper: f64,
}

impl DomainPadding {
    /// No padding.
    pub const NONE: Self = Self {
        lower: 1.0,
        upper: 1.0,
    };

    /// Symmetric padding by a fraction, e.g. `0.1` gives x0.9 / x1.1.
    pub fn fraction(margin: f64) -> Self {
        Self {
            lower: 1.0 - margin,
            upper: 1.0 + margin,
        }
    }
}

impl Default for DomainPadding {
    fn default() -> Self {
        Self::fraction(0.1)
    }
}

/// What `reset()` does after rewinding to the start year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResetPolicy {
    /// Rewind and immediately start a new sweep
    #[default]
    Restart,
    /// Rewind and wait for an explicit `start()`
    Rewind,
}

/// Where labels get their text from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LabelSource {
    /// The entity name
    #[default]
    Name,
    /// An auxiliary data field, falling back to the name when absent
    Aux(String),
}

/// Pixel geometry of the chart canvas.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChartLayout {
    /// Plot width in pixels
    pub width: f64,
    /// Plot height in pixels
    pub height: f64,
    /// Space reserved left of the plot for the vertical axis
    pub y_axis_margin: f64,
    /// Space reserved below the plot for the horizontal axis
    pub x_axis_margin: f64,
    /// Gap kept above the highest value
    pub top_inset: f64,
}

impl ChartLayout {
    /// Horizontal pixel range `[y_axis_margin, width]`.
    pub fn x_range(&self) -> (f64, f64) {
        (self.y_axis_margin, self.width)
    }

    /// Vertical pixel range, inverted so larger values sit higher.
    pub fn y_range(&self) -> (f64, f64) {
        (self.height - self.x_axis_margin, self.top_inset)
    }
}

impl Default for ChartLayout {
    /// A 1024x500 canvas with 19.5px margins and a 100px left gutter.
    fn default() -> Self {
        Self {
            width: 1024.0 - 19.5,
            height: 500.0 - 19.5 - 19.5,
            y_axis_margin: 60.0,
            x_axis_margin: 65.0,
            top_inset: 10.0,
        }
    }
}

/// Scale settings for one axis.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisConfig {
    /// Transform from domain to pixels
    pub kind: ScaleKind,
    /// Fixed domain start; `None` uses the data minimum
    pub floor: Option<f64>,
    /// Extend the domain to round tick values
    pub nice: bool,
}

impl AxisConfig {
    pub fn linear() -> Self {
        Self {
            kind: ScaleKind::Linear,
            floor: Some(0.0),
            nice: true,
        }
    }

    pub fn with_kind(mut self, kind: ScaleKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn with_floor(mut self, floor: Option<f64>) -> Self {
        self.floor = floor;
        self
    }

    pub fn with_nice(mut self, nice: bool) -> Self {
        self.nice = nice;
        self
    }
}

impl Default for AxisConfig {
    fn default() -> Self {
        Self::linear()
    }
}

/// Everything a [`BubbleChart`](crate::BubbleChart) needs besides its data.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartConfig {
    /// Wall-clock length of one sweep, regardless of the remaining distance
    pub sweep_duration: Duration,
    /// Behaviour of `reset()`
    pub reset_policy: ResetPolicy,
    /// Labels of bubbles smaller than this (in pixels) are hidden unless hovered
    pub label_threshold_px: f64,
    /// Canvas geometry
    pub layout: ChartLayout,
    /// Horizontal axis scale
    pub x_axis: AxisConfig,
    /// Vertical axis scale
    pub y_axis: AxisConfig,
    /// Padding applied to the vertical data domain
    pub y_padding: DomainPadding,
    /// Radius scale transform
    pub radius_kind: ScaleKind,
    /// Pixel radius range `(smallest, largest)`
    pub radius_range: (f64, f64),
    /// Label text source
    pub label_source: LabelSource,
    /// Sweep range; `None` uses the range the store was loaded for
    pub years: Option<YearRange>,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            sweep_duration: Duration::from_millis(30_000),
            reset_policy: ResetPolicy::Restart,
            label_threshold_px: 10.0,
            layout: ChartLayout::default(),
            x_axis: AxisConfig::linear(),
            y_axis: AxisConfig::linear(),
            y_padding: DomainPadding::default(),
            radius_kind: ScaleKind::Sqrt,
            radius_range: (5.0, 40.0),
            label_source: LabelSource::Name,
            years: None,
        }
    }
}

impl ChartConfig {
    pub fn with_sweep_duration(mut self, duration: Duration) -> Self {
        self.sweep_duration = duration;
        self
    }

    pub fn with_reset_policy(mut self, policy: ResetPolicy) -> Self {
        self.reset_policy = policy;
        self
    }

    pub fn with_label_threshold(mut self, threshold_px: f64) -> Self {
        self.label_threshold_px = threshold_px;
        self
    }

    pub fn with_layout(mut self, layout: ChartLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn with_x_axis(mut self, axis: AxisConfig) -> Self {
        self.x_axis = axis;
        self
    }

    pub fn with_y_axis(mut self, axis: AxisConfig) -> Self {
        self.y_axis = axis;
        self
    }

    pub fn with_y_padding(mut self, padding: DomainPadding) -> Self {
        self.y_padding = padding;
        self
    }

    pub fn with_radius_range(mut self, smallest: f64, largest: f64) -> Self {
        self.radius_range = (smallest, largest);
        self
    }

    pub fn with_label_source(mut self, source: LabelSource) -> Self {
        self.label_source = source;
        self
    }

    pub fn with_years(mut self, years: YearRange) -> Self {
        self.years = Some(years);
        self
    }

    /// Check values that would otherwise produce NaN pixels.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.label_threshold_px.is_finite() || self.label_threshold_px < 0.0 {
            return Err(ConfigError::InvalidLabelThreshold {
                threshold: self.label_threshold_px,
            });
        }

        let DomainPadding { lower, upper } = self.y_padding;
        if !(lower.is_finite() && upper.is_finite() && lower > 0.0 && upper > 0.0) {
            return Err(ConfigError::InvalidPadding { lower, upper });
        }

        let (start, end) = self.radius_range;
        if !(start.is_finite() && end.is_finite()) {
            return Err(ConfigError::InvalidRange {
                what: "radius",
                start,
                end,
            });
        }

        for (what, (start, end)) in [
            ("horizontal", self.layout.x_range()),
            ("vertical", self.layout.y_range()),
        ] {
            if !(start.is_finite() && end.is_finite()) {
                return Err(ConfigError::InvalidRange { what, start, end });
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_year_range_rejects_inverted() {
        assert_eq!(
            YearRange::new(2050, 2020),
            Err(LoadError::InvalidYearRange {
                start: 2050,
                end: 2020
            })
        );
    }

    #[test]
    fn test_year_range_iterates_inclusive() {
        let range = YearRange::new(1990, 1993).unwrap();
        assert_eq!(range.years().collect::<Vec<_>>(), vec![1990, 1991, 1992, 1993]);
        assert_eq!(range.len(), 4);
    }

    #[test]
    fn test_default_padding_is_ten_percent() {
        let padding = DomainPadding::default();
        assert!((padding.lower - 0.9).abs() < 1e-12);
        assert!((padding.upper - 1.1).abs() < 1e-12);
    }

    #[test]
    fn test_default_layout_ranges() {
        let layout = ChartLayout::default();
        assert_eq!(layout.x_range(), (60.0, 1004.5));
        assert_eq!(layout.y_range(), (461.0 - 65.0, 10.0));
    }

    #[test]
    fn test_default_config_is_valid() {
        assert!(ChartConfig::default().validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_negative_threshold() {
        let config = ChartConfig::default().with_label_threshold(-1.0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLabelThreshold { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_zero_padding() {
        let config = ChartConfig::default().with_y_padding(DomainPadding {
            lower: 0.0,
            upper: 1.1,
        });
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidPadding { .. })
        ));
    }
}
