//! Mathematical helpers for tolerance handling.

use std::f32::consts::PI;

/// Length below which a vector is treated as degenerate.
pub const DEGENERATE_LENGTH: f32 = 1e-9;

/// Convert a full normal-difference bound in degrees into the half-angle
/// radian threshold used by the pair filter.
///
/// # Example
/// ```
/// use chatur_match::core::math::half_angle_threshold;
///
/// let t = half_angle_threshold(20.0);
/// assert!((t - 10.0_f32.to_radians()).abs() < 1e-6);
/// ```
#[inline]
pub fn half_angle_threshold(max_normal_difference_deg: f32) -> f32 {
    0.5 * max_normal_difference_deg * PI / 180.0
}

/// Squared euclidean distance between two RGB color triples.
#[inline]
pub fn color_distance_squared(a: &[f32; 3], b: &[f32; 3]) -> f32 {
    let dr = a[0] - b[0];
    let dg = a[1] - b[1];
    let db = a[2] - b[2];
    dr * dr + dg * dg + db * db
}
