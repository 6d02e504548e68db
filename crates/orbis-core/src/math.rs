/// Screen-space math using SIMD-accelerated `glam` types.
///
/// Projected bubble centres are handed to render sinks as [`Vec2`] in pixels,
/// while domain values stay `f64` inside the engine.
///
/// # Examples
///
/// ```
/// use orbis_core::math::{Vec2, to_screen};
///
/// let centre = to_screen(412.5, 97.25);
/// assert_eq!(centre, Vec2::new(412.5, 97.25));
/// ```
///
/// [`glam`]: https://docs.rs/glam
pub mod fast {
    pub use glam::*;
}

pub use fast::*;

/// Narrow a pair of pixel coordinates into a screen-space vector.
#[inline]
pub fn to_screen(x: f64, y: f64) -> Vec2 {
    Vec2::new(x as f32, y as f32)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_screen_narrows() {
        let v = to_screen(1.5, -2.25);
        assert_eq!(v.x, 1.5);
        assert_eq!(v.y, -2.25);
    }
}
