pub mod convert;
pub mod error;
pub mod geodesy;
#[cfg(feature = "python")]
mod py;

pub use convert::{to_ecef, EcefConverter};
pub use error::EcefError;
pub use geodesy::ellipsoid::{Ellipsoid, GRS80, SPHERE, WGS84};
pub use geodesy::point::{geodetic_to_ecef, EcefPoint, GeodeticPoint};
pub use geodesy::ReferenceEllipsoid;

/// A Python module implemented in Rust.
#[cfg(feature = "python")]
#[pyo3::pymodule]
fn geo_ecef(m: &pyo3::Bound<'_, pyo3::types::PyModule>) -> pyo3::PyResult<()> {
    py::register(m)?;
    Ok(())
}
