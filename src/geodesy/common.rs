//! Curvature helpers shared by the geodetic conversions.

use super::ReferenceEllipsoid;

/// Prime-vertical radius of curvature N(φ) = a / sqrt(1 - e²·sin²φ).
///
/// `lat` is in radians. No guard on `e2`: for `e2 >= 1` the square root
/// argument can reach zero or go negative and the result is inf or NaN.
#[inline]
pub fn prime_vertical_radius<E: ReferenceEllipsoid + ?Sized>(ellipsoid: &E, lat: f64) -> f64 {
    let sin_lat = lat.sin();
    ellipsoid.semi_major_axis() / (1.0 - ellipsoid.eccentricity_squared() * sin_lat * sin_lat).sqrt()
}
