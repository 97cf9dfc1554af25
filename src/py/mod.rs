use pyo3::create_exception;
use pyo3::exceptions::PyValueError;
use pyo3::prelude::*;

use crate::error::EcefError;
use crate::geodesy::ellipsoid::{GRS80, SPHERE, WGS84};

mod ecef;

create_exception!(geo_ecef, InvalidShape, PyValueError);
create_exception!(geo_ecef, InvalidEllipsoid, PyValueError);

impl From<EcefError> for PyErr {
    fn from(err: EcefError) -> Self {
        match err {
            EcefError::InvalidShape(_) => InvalidShape::new_err(err.to_string()),
            EcefError::InvalidEllipsoid(_) => InvalidEllipsoid::new_err(err.to_string()),
        }
    }
}

/// Register all Python-visible functions and types.
pub fn register(m: &Bound<'_, PyModule>) -> PyResult<()> {
    let py = m.py();
    m.add_function(wrap_pyfunction!(ecef::to_ecef, m)?)?;
    m.add_class::<ecef::PyEllipsoid>()?;
    m.add("WGS84", ecef::PyEllipsoid::from(WGS84))?;
    m.add("GRS80", ecef::PyEllipsoid::from(GRS80))?;
    m.add("SPHERE", ecef::PyEllipsoid::from(SPHERE))?;
    m.add("InvalidShape", py.get_type::<InvalidShape>())?;
    m.add("InvalidEllipsoid", py.get_type::<InvalidEllipsoid>())?;
    Ok(())
}
