//! Draw order: bigger bubbles first so smaller ones end up on top.

use std::cmp::Ordering;

use crate::view::EntityViewState;

/// Descending radius.
#[inline]
pub fn compare_radius(a: &EntityViewState, b: &EntityViewState) -> Ordering {
    b.radius.total_cmp(&a.radius)
}

/// Stable re-sort of `order` (indices into `states`) by descending radius.
///
/// Entities with equal radius keep their position relative to each other in
/// the previous order, so ties never swap between frames.
pub fn sort_draw_order(order: &mut [usize], states: &[EntityViewState]) {
    order.sort_by(|&a, &b| compare_radius(&states[a], &states[b]));
}
