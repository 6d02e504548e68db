//! Per-entity view state updated on every tick.

use crate::scale::Scale;
use crate::series::Dimension;
use crate::store::Entity;

/// Current interpolated values of one entity plus its label visibility.
///
/// Values are kept in raw domain units; sinks project them with the chart's
/// scales.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EntityViewState {
    /// Horizontal value
    pub x: f64,
    /// Vertical value
    pub y: f64,
    /// Size value
    pub radius: f64,
    is_hovered: bool,
    label_hidden: bool,
}

impl EntityViewState {
    /// State of `entity` at `year`, not hovered, label visibility not yet computed.
    pub fn at_year(entity: &Entity, year: f64) -> Self {
        let mut state = Self {
            x: 0.0,
            y: 0.0,
            radius: 0.0,
            is_hovered: false,
            label_hidden: false,
        };
        state.update(entity, year);
        state
    }

    /// Interpolate all three dimensions at `year`.
    pub fn update(&mut self, entity: &Entity, year: f64) {
        self.x = entity.value_at(Dimension::X, year);
        self.y = entity.value_at(Dimension::Y, year);
        self.radius = entity.value_at(Dimension::Radius, year);
    }

    #[inline]
    pub fn is_hovered(&self) -> bool {
        self.is_hovered
    }

    /// Set by pointer enter/leave; applied at the next [`refresh_label`](Self::refresh_label).
    #[inline]
    pub fn set_hovered(&mut self, hovered: bool) {
        self.is_hovered = hovered;
    }

    /// Label visibility as of the last recomputation.
    #[inline]
    pub fn label_hidden(&self) -> bool {
        self.label_hidden
    }

    /// Recompute label visibility from the hover flag and the pixel radius.
    pub fn refresh_label(&mut self, radius_scale: &Scale, threshold_px: f64) {
        self.label_hidden = label_hidden(self.is_hovered, radius_scale.map(self.radius), threshold_px);
    }
}

/// Labels are hidden for small bubbles unless the pointer is over them.
#[inline]
pub fn label_hidden(is_hovered: bool, radius_px: f64, threshold_px: f64) -> bool {
    !is_hovered && radius_px < threshold_px
}
