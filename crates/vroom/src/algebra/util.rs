//! Angle conversions and tolerances.

/// Tolerance for approximate comparisons of O(1)-scaled quantities.
pub const EPS: f64 = 1e-9;

#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad * 180.0 / std::f64::consts::PI
}

#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg * std::f64::consts::PI / 180.0
}
