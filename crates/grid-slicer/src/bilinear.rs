//! Bilinear surfaces fitted to the four corners of a cell.
//!
//! The surface is `v(x, y) = c0 + c1·x + c2·y + c3·x·y`, with the four
//! coefficients chosen so it passes exactly through the corner values. The
//! 4×4 system is solved in cell-local coordinates: corners are shifted to the
//! bottom-left corner and scaled by the cell's extent, so the conditioning
//! check does not depend on where the cell sits or how large it is.

use nalgebra::{Matrix4, Vector4};
use weather_common::Point;

use crate::error::{Result, SliceError};

/// Systems whose normalized determinant falls below this are singular.
const MIN_CONDITIONING: f64 = 1e-10;

/// A bilinear surface through four corner values.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BilinearSurface {
    origin: Point,
    scale: (f64, f64),
    coeffs: [f64; 4],
}

impl BilinearSurface {
    /// Fit the surface through `values` at `corners`.
    ///
    /// Corner order does not matter as long as values match it. Fails with
    /// [`SliceError::SingularSystem`] when the corners do not determine a
    /// unique surface (collinear corners, a cell rotated 45°, zero extent).
    pub fn fit(corners: &[Point; 4], values: &[f64; 4]) -> Result<Self> {
        let origin = corners[0];
        let sx = corners
            .iter()
            .map(|c| (c.x - origin.x).abs())
            .fold(0.0, f64::max);
        let sy = corners
            .iter()
            .map(|c| (c.y - origin.y).abs())
            .fold(0.0, f64::max);

        if !(sx > 0.0 && sy > 0.0) {
            return Err(SliceError::singular(0.0));
        }

        let local: Vec<(f64, f64)> = corners
            .iter()
            .map(|c| ((c.x - origin.x) / sx, (c.y - origin.y) / sy))
            .collect();

        #[rustfmt::skip]
        let a = Matrix4::new(
            1.0, local[0].0, local[0].1, local[0].0 * local[0].1,
            1.0, local[1].0, local[1].1, local[1].0 * local[1].1,
            1.0, local[2].0, local[2].1, local[2].0 * local[2].1,
            1.0, local[3].0, local[3].1, local[3].0 * local[3].1,
        );
        let b = Vector4::from_column_slice(values);

        let conditioning = conditioning(&a);
        if !(conditioning >= MIN_CONDITIONING) {
            return Err(SliceError::singular(conditioning));
        }

        let c = a
            .lu()
            .solve(&b)
            .ok_or_else(|| SliceError::singular(conditioning))?;

        Ok(Self {
            origin,
            scale: (sx, sy),
            coeffs: [c[0], c[1], c[2], c[3]],
        })
    }

    /// Evaluate the surface at `p`.
    pub fn value_at(&self, p: Point) -> f64 {
        let x = (p.x - self.origin.x) / self.scale.0;
        let y = (p.y - self.origin.y) / self.scale.1;
        let [c0, c1, c2, c3] = self.coeffs;
        c0 + c1 * x + c2 * y + c3 * x * y
    }
}

/// Fit a surface through the corners and evaluate it at `p`.
pub fn interpolate(corners: &[Point; 4], values: &[f64; 4], p: Point) -> Result<f64> {
    Ok(BilinearSurface::fit(corners, values)?.value_at(p))
}

/// |det(A)| divided by the product of A's row norms.
///
/// 1 for orthogonal rows, 0 for linearly dependent ones (Hadamard's
/// inequality).
fn conditioning(a: &Matrix4<f64>) -> f64 {
    let norms: f64 = a.row_iter().map(|row| row.norm()).product();
    if norms == 0.0 {
        return 0.0;
    }
    a.determinant().abs() / norms
}
