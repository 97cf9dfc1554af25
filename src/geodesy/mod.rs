pub mod common;
pub mod ellipsoid;
pub mod point;

/// Anything that can stand in for a reference ellipsoid.
///
/// The conversions only ever read the semi-major axis and the first
/// eccentricity squared, so callers can plug in their own datum types.
pub trait ReferenceEllipsoid: Send + Sync {
    /// Semi-major axis `a` (metres).
    fn semi_major_axis(&self) -> f64;

    /// First eccentricity squared `e2`.
    fn eccentricity_squared(&self) -> f64;
}

impl<E: ReferenceEllipsoid + ?Sized> ReferenceEllipsoid for &E {
    fn semi_major_axis(&self) -> f64 {
        (**self).semi_major_axis()
    }

    fn eccentricity_squared(&self) -> f64 {
        (**self).eccentricity_squared()
    }
}
