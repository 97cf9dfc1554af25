//! Single-point geodetic → ECEF conversion.
//!
//!   x = (N(φ) + h)·cos φ·cos λ
//!   y = (N(φ) + h)·cos φ·sin λ
//!   z = (N(φ)·(1 - e²) + h)·sin φ

use super::common::prime_vertical_radius;
use super::ReferenceEllipsoid;

/// Longitude and latitude in decimal degrees, height in metres along the
/// ellipsoid normal.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GeodeticPoint {
    pub lon: f64,
    pub lat: f64,
    pub height: f64,
}

impl GeodeticPoint {
    pub const fn new(lon: f64, lat: f64, height: f64) -> Self {
        Self { lon, lat, height }
    }
}

impl From<[f64; 3]> for GeodeticPoint {
    fn from([lon, lat, height]: [f64; 3]) -> Self {
        Self { lon, lat, height }
    }
}

/// Earth-centered, earth-fixed Cartesian position in metres.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct EcefPoint {
    pub x: f64,
    pub y: f64,
    pub z: f64,
}

impl From<EcefPoint> for [f64; 3] {
    fn from(p: EcefPoint) -> Self {
        [p.x, p.y, p.z]
    }
}

/// Convert one geodetic point. Inputs outside [-180, 180] / [-90, 90] are
/// not rejected and go through the trigonometry unchanged.
#[inline]
pub fn geodetic_to_ecef<E: ReferenceEllipsoid + ?Sized>(
    point: GeodeticPoint,
    ellipsoid: &E,
) -> EcefPoint {
    let lon = point.lon.to_radians();
    let lat = point.lat.to_radians();
    let e2 = ellipsoid.eccentricity_squared();

    let n = prime_vertical_radius(ellipsoid, lat);
    let (sin_lat, cos_lat) = lat.sin_cos();
    let (sin_lon, cos_lon) = lon.sin_cos();

    EcefPoint {
        x: (n + point.height) * cos_lat * cos_lon,
        y: (n + point.height) * cos_lat * sin_lon,
        z: (n * (1.0 - e2) + point.height) * sin_lat,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geodesy::ellipsoid::{Ellipsoid, SPHERE, WGS84};
    use approx::assert_relative_eq;

    #[test]
    fn test_origin_maps_to_semi_major_axis() {
        let p = geodetic_to_ecef(GeodeticPoint::new(0.0, 0.0, 0.0), &WGS84);
        assert_relative_eq!(p.x, WGS84.a, max_relative = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn test_north_pole_maps_to_semi_minor_axis() {
        let p = geodetic_to_ecef(GeodeticPoint::new(0.0, 90.0, 0.0), &WGS84);
        // cos(π/2) in f64 is ~6e-17, so x is ~4e-10 m rather than exactly 0
        assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(p.z, 6_356_752.314_245, max_relative = 1e-6);
    }

    #[test]
    fn test_south_pole_with_height() {
        let p = geodetic_to_ecef(GeodeticPoint::new(45.0, -90.0, 100.0), &WGS84);
        assert_relative_eq!(p.z, -(WGS84.b + 100.0), max_relative = 1e-9);
    }

    #[test]
    fn test_sphere_closed_form_at_45_degrees() {
        let r = SPHERE.a;
        let p = geodetic_to_ecef(GeodeticPoint::new(0.0, 45.0, 0.0), &SPHERE);
        let c = 45f64.to_radians();
        assert_relative_eq!(p.x, r * c.cos(), max_relative = 1e-12);
        assert_relative_eq!(p.y, 0.0, epsilon = 1e-9);
        assert_relative_eq!(p.z, r * c.sin(), max_relative = 1e-12);
    }

    #[test]
    fn test_known_point_greenwich() {
        // Royal Observatory, Greenwich: -0.0015°, 51.4778°, 45.0 m
        let p = geodetic_to_ecef(GeodeticPoint::new(-0.0015, 51.4778, 45.0), &WGS84);
        assert_relative_eq!(p.x, 3_980_609.237, epsilon = 1e-2);
        assert_relative_eq!(p.y, -104.212, epsilon = 1e-2);
        assert_relative_eq!(p.z, 4_966_859.729, epsilon = 1e-2);
    }

    #[test]
    fn test_out_of_range_angles_are_accepted() {
        let wrapped = geodetic_to_ecef(GeodeticPoint::new(370.0, 0.0, 0.0), &WGS84);
        let plain = geodetic_to_ecef(GeodeticPoint::new(10.0, 0.0, 0.0), &WGS84);
        assert_relative_eq!(wrapped.x, plain.x, max_relative = 1e-9);
        assert_relative_eq!(wrapped.y, plain.y, max_relative = 1e-9);

        let beyond_pole = geodetic_to_ecef(GeodeticPoint::new(0.0, 120.0, 0.0), &WGS84);
        assert!(beyond_pole.x.is_finite() && beyond_pole.x < 0.0);
    }

    #[test]
    fn test_degenerate_ellipsoid_yields_nan() {
        let bad = Ellipsoid::from_eccentricity_squared(6_378_137.0, 2.0);
        let p = geodetic_to_ecef(GeodeticPoint::new(0.0, 60.0, 0.0), &bad);
        assert!(p.x.is_nan() && p.z.is_nan());
    }

    #[test]
    fn test_array_conversions() {
        let g = GeodeticPoint::from([1.0, 2.0, 3.0]);
        assert_eq!(g, GeodeticPoint::new(1.0, 2.0, 3.0));
        let xyz: [f64; 3] = EcefPoint { x: 4.0, y: 5.0, z: 6.0 }.into();
        assert_eq!(xyz, [4.0, 5.0, 6.0]);
    }
}
