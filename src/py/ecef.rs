//! PyO3 binding for batch geodetic → ECEF conversion.

use ndarray::{Array2, Ix2};
use numpy::{PyArray2, PyReadonlyArrayDyn};
use pyo3::prelude::*;
use pyo3::types::PyString;

use crate::convert::EcefConverter;
use crate::error::EcefError;
use crate::geodesy::ellipsoid::{Ellipsoid, WGS84};

/// Reference ellipsoid exposed to Python.
#[pyclass(name = "Ellipsoid", frozen)]
#[derive(Clone, Copy)]
pub struct PyEllipsoid {
    #[pyo3(get)]
    pub a: f64,
    #[pyo3(get)]
    pub b: f64,
    #[pyo3(get)]
    pub e2: f64,
}

#[pymethods]
impl PyEllipsoid {
    #[new]
    fn new(a: f64, b: f64) -> Self {
        Ellipsoid::from_axes(a, b).into()
    }

    fn __repr__(&self) -> String {
        format!("Ellipsoid(a={}, b={})", self.a, self.b)
    }
}

impl From<Ellipsoid> for PyEllipsoid {
    fn from(e: Ellipsoid) -> Self {
        Self {
            a: e.a,
            b: e.b,
            e2: e.e2,
        }
    }
}

/// Resolve the `ellipsoid` argument.
///
/// Accepts `None` (WGS84), a preset name or PROJ-style string, or any object
/// with numeric `a` and `e2` attributes.
fn extract_ellipsoid(obj: Option<&Bound<'_, PyAny>>) -> Result<Ellipsoid, EcefError> {
    let Some(obj) = obj else {
        return Ok(WGS84);
    };
    if let Ok(s) = obj.downcast::<PyString>() {
        let s = s
            .to_str()
            .map_err(|e| EcefError::InvalidEllipsoid(e.to_string()))?;
        return Ellipsoid::from_user_string(s);
    }

    let attr = |name: &str| -> Result<f64, EcefError> {
        obj.getattr(name)
            .and_then(|v| v.extract::<f64>())
            .map_err(|e| EcefError::InvalidEllipsoid(format!("attribute '{name}': {e}")))
    };
    let a = attr("a")?;
    let e2 = attr("e2")?;
    Ok(Ellipsoid::from_eccentricity_squared(a, e2))
}

/// Convert positions to earth-centered, earth-fixed coordinates.
///
/// Args:
///     positions: array of shape (N, 3) holding (longitude, latitude, height),
///         angles in degrees and height in metres. The array is not modified.
///     ellipsoid: optional ellipsoid. Either an object with `a` and `e2`
///         attributes, a preset name ("WGS84"), or a PROJ-style string.
///         Defaults to WGS84.
///
/// Returns:
///     New float64 array of shape (N, 3) holding (x, y, z) in metres.
#[pyfunction]
#[pyo3(signature = (positions, ellipsoid=None))]
pub fn to_ecef<'py>(
    py: Python<'py>,
    positions: PyReadonlyArrayDyn<'py, f64>,
    ellipsoid: Option<&Bound<'py, PyAny>>,
) -> PyResult<Bound<'py, PyArray2<f64>>> {
    let view = positions.as_array();
    if view.ndim() != 2 {
        return Err(EcefError::InvalidShape(format!(
            "expected a 2-D array of shape (N, 3), got {} dimension(s)",
            view.ndim()
        ))
        .into());
    }
    let ellipsoid = extract_ellipsoid(ellipsoid)?;

    // Copy to owned before releasing the GIL
    let src: Array2<f64> = view
        .into_dimensionality::<Ix2>()
        .map_err(|e| EcefError::InvalidShape(e.to_string()))?
        .to_owned();

    let result = py.allow_threads(move || EcefConverter::new(ellipsoid).convert(&src.view()))?;

    Ok(PyArray2::from_owned_array(py, result))
}
