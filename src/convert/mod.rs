//! Batch geodetic → ECEF conversion.
//!
//! Every row is converted independently by the same scalar routine, so the
//! sequential and parallel paths produce bit-identical output.

pub mod layout;

use ndarray::{Array2, ArrayView1, ArrayView2, ArrayViewMut1, ArrayViewMut2, Zip};
use rayon::prelude::*;

use crate::error::EcefError;
use crate::geodesy::ellipsoid::{Ellipsoid, WGS84};
use crate::geodesy::point::{geodetic_to_ecef, EcefPoint, GeodeticPoint};
use crate::geodesy::ReferenceEllipsoid;

/// Row count at which batches are split across the rayon pool.
pub const DEFAULT_PARALLEL_THRESHOLD: usize = 16_384;

/// Converts batches of (lon°, lat°, height m) rows into (x, y, z) metres.
///
/// Inputs are only ever read through views; results go into freshly
/// allocated buffers.
#[derive(Clone, Debug)]
pub struct EcefConverter<E = Ellipsoid> {
    /// Reference ellipsoid. Default: WGS84.
    pub ellipsoid: E,
    /// Minimum number of rows for the parallel path. Default: 16384.
    pub parallel_threshold: usize,
}

impl Default for EcefConverter<Ellipsoid> {
    fn default() -> Self {
        Self::new(WGS84)
    }
}

impl<E: ReferenceEllipsoid> EcefConverter<E> {
    pub fn new(ellipsoid: E) -> Self {
        Self {
            ellipsoid,
            parallel_threshold: DEFAULT_PARALLEL_THRESHOLD,
        }
    }

    pub fn with_parallel_threshold(mut self, rows: usize) -> Self {
        self.parallel_threshold = rows;
        self
    }

    /// Convert an `(N, 3)` array of geodetic positions.
    ///
    /// Column 0 is longitude, column 1 latitude (both degrees), column 2
    /// height (metres). Fails with `InvalidShape` before doing any work if
    /// the array does not have exactly 3 columns.
    pub fn convert(&self, points: &ArrayView2<'_, f64>) -> Result<Array2<f64>, EcefError> {
        layout::check_columns(points.dim())?;
        let mut out = Array2::zeros(points.raw_dim());
        self.convert_into(points, out.view_mut());
        Ok(out)
    }

    /// Convert an interleaved `[lon, lat, h, lon, lat, h, ...]` buffer into a
    /// buffer of the same layout holding `[x, y, z, ...]`.
    pub fn convert_flat(&self, positions: &[f64]) -> Result<Vec<f64>, EcefError> {
        let src = layout::flat_view(positions)?;
        let mut out = vec![0.0; positions.len()];
        self.convert_into(&src, layout::flat_view_mut(&mut out)?);
        Ok(out)
    }

    /// Convert nested rows. Every row must hold exactly 3 values.
    pub fn convert_rows<R: AsRef<[f64]>>(&self, rows: &[R]) -> Result<Array2<f64>, EcefError> {
        let packed = layout::rows_to_array(rows)?;
        self.convert(&packed.view())
    }

    /// Convert typed points. Cannot fail: the shape is fixed by the type.
    pub fn convert_points(&self, points: &[GeodeticPoint]) -> Vec<EcefPoint> {
        if points.len() >= self.parallel_threshold {
            points
                .par_iter()
                .map(|&p| geodetic_to_ecef(p, &self.ellipsoid))
                .collect()
        } else {
            points
                .iter()
                .map(|&p| geodetic_to_ecef(p, &self.ellipsoid))
                .collect()
        }
    }

    fn convert_into(&self, src: &ArrayView2<'_, f64>, mut dst: ArrayViewMut2<'_, f64>) {
        let rows = src.nrows();
        let parallel = rows >= self.parallel_threshold;
        tracing::debug!(rows, parallel, "converting geodetic batch to ECEF");

        let zip = Zip::from(dst.rows_mut()).and(src.rows());
        if parallel {
            zip.par_for_each(|out, row| write_row(&self.ellipsoid, row, out));
        } else {
            zip.for_each(|out, row| write_row(&self.ellipsoid, row, out));
        }
    }
}

#[inline]
fn write_row<E: ReferenceEllipsoid>(
    ellipsoid: &E,
    row: ArrayView1<'_, f64>,
    mut out: ArrayViewMut1<'_, f64>,
) {
    let p = geodetic_to_ecef(GeodeticPoint::new(row[0], row[1], row[2]), ellipsoid);
    out[0] = p.x;
    out[1] = p.y;
    out[2] = p.z;
}

/// Convert an `(N, 3)` array with the default converter settings.
pub fn to_ecef<E: ReferenceEllipsoid + ?Sized>(
    points: &ArrayView2<'_, f64>,
    ellipsoid: &E,
) -> Result<Array2<f64>, EcefError> {
    EcefConverter::new(ellipsoid).convert(points)
}
