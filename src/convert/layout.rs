//! Input layout checks: every accepted layout is reduced to an `(N, 3)` view
//! before any arithmetic runs.

use ndarray::{Array2, ArrayView2, ArrayViewMut2};

use crate::error::EcefError;

/// Components per point: (lon, lat, height) in, (x, y, z) out.
pub const COMPONENTS: usize = 3;

/// Reject anything that is not `(N, 3)`.
pub fn check_columns(shape: (usize, usize)) -> Result<(), EcefError> {
    let (rows, cols) = shape;
    if cols != COMPONENTS {
        return Err(EcefError::InvalidShape(format!(
            "expected positions of shape (N, {COMPONENTS}), got ({rows}, {cols})"
        )));
    }
    Ok(())
}

fn flat_rows(len: usize) -> Result<usize, EcefError> {
    if len % COMPONENTS != 0 {
        return Err(EcefError::InvalidShape(format!(
            "flat buffer of {len} values is not a multiple of {COMPONENTS}"
        )));
    }
    Ok(len / COMPONENTS)
}

/// View an interleaved `[lon, lat, h, lon, lat, h, ...]` buffer as `(N, 3)`.
pub fn flat_view(values: &[f64]) -> Result<ArrayView2<'_, f64>, EcefError> {
    let rows = flat_rows(values.len())?;
    ArrayView2::from_shape((rows, COMPONENTS), values)
        .map_err(|e| EcefError::InvalidShape(e.to_string()))
}

pub fn flat_view_mut(values: &mut [f64]) -> Result<ArrayViewMut2<'_, f64>, EcefError> {
    let rows = flat_rows(values.len())?;
    ArrayViewMut2::from_shape((rows, COMPONENTS), values)
        .map_err(|e| EcefError::InvalidShape(e.to_string()))
}

/// Pack nested rows into an owned `(N, 3)` array, failing on the first row
/// with the wrong length.
pub fn rows_to_array<R: AsRef<[f64]>>(rows: &[R]) -> Result<Array2<f64>, EcefError> {
    if let Some((i, row)) = rows
        .iter()
        .enumerate()
        .find(|(_, row)| row.as_ref().len() != COMPONENTS)
    {
        return Err(EcefError::InvalidShape(format!(
            "row {i} has {} columns, expected {COMPONENTS}",
            row.as_ref().len()
        )));
    }

    Ok(Array2::from_shape_fn((rows.len(), COMPONENTS), |(i, j)| {
        rows[i].as_ref()[j]
    }))
}
