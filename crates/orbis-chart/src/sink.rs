//! Output side of the chart: what a renderer receives on every tick.

use std::sync::Arc;

use orbis_core::math::{Vec2, to_screen};

use crate::scale::ChartScales;
use crate::store::EntityId;

/// One bubble, in draw order, with values still in domain units.
#[derive(Debug, Clone, PartialEq)]
pub struct RenderItem {
    /// Entity the bubble belongs to
    pub entity: EntityId,
    /// Label text
    pub label: Arc<str>,
    /// Horizontal value
    pub x: f64,
    /// Vertical value
    pub y: f64,
    /// Size value
    pub radius: f64,
    /// Whether the label should be drawn
    pub label_hidden: bool,
}

/// A bubble in pixel space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScreenBubble {
    /// Centre in pixels
    pub center: Vec2,
    /// Radius in pixels
    pub radius: f32,
}

impl RenderItem {
    /// Project through the chart scales into pixel space.
    pub fn project(&self, scales: &ChartScales) -> ScreenBubble {
        ScreenBubble {
            center: to_screen(scales.x.map(self.x), scales.y.map(self.y)),
            radius: scales.radius.map(self.radius) as f32,
        }
    }
}

/// Everything needed to draw one tick.
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    /// Fractional year the values were interpolated at
    pub year: f64,
    /// Year shown in the corner of the chart
    pub display_year: i32,
    /// Bubbles, largest first
    pub items: &'a [RenderItem],
    /// Scales for projecting items
    pub scales: &'a ChartScales,
}

/// Receives a complete frame after every recomputation.
///
/// Implementations draw `items` in slice order; later items sit on top.
pub trait RenderSink {
    fn present(&mut self, frame: &Frame<'_>);
}

impl<T: RenderSink + ?Sized> RenderSink for &mut T {
    fn present(&mut self, frame: &Frame<'_>) {
        (**self).present(frame);
    }
}

impl<T: RenderSink + ?Sized> RenderSink for Box<T> {
    fn present(&mut self, frame: &Frame<'_>) {
        (**self).present(frame);
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl RenderSink for NullSink {
    fn present(&mut self, _frame: &Frame<'_>) {}
}

/// Round a fractional year for display, halves rounding up.
#[inline]
pub fn display_year(year: f64) -> i32 {
    (year + 0.5).floor() as i32
}
