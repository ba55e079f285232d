pub mod bbox;
pub mod grid;

pub use bbox::BBox;
pub use grid::{Cell, Grid, Partition, MAX_RESOLUTION};

pub type Point = nalgebra::Vector2<f64>;

/// Linear interpolation between `min` and `max`
///
/// Doesn't overflow for finite inputs even if `max - min` would.
#[inline]
pub fn lerp(min: f64, max: f64, t: f64) -> f64 {
    let delta = max - min;
    if delta.is_finite() {
        min + delta * t
    } else {
        min * (1.0 - t) + max * t
    }
}
