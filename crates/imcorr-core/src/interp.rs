//! # Interpolation Module
//!
//! 1-D and bilinear interpolation over regular period grids.
//!
//! - Axes are strictly increasing (validated by the document loader)
//! - 1-D lookups clamp flat at the axis ends
//! - 2-D lookups extrapolate linearly from the boundary cell; range
//!   warnings and final clamping are the engine's concern, not this
//!   module's

use ndarray::{ArrayView1, ArrayView2};

/// 1-D linear interpolation with flat clamping at the axis ends.
///
/// A query below the first axis point returns the first value; above the
/// last point, the last value. `axis` and `values` have equal, nonzero
/// length.
#[must_use]
pub fn interp1_clamped(axis: ArrayView1<f64>, values: ArrayView1<f64>, t: f64) -> f64 {
    let n = axis.len();
    if t <= axis[0] {
        return values[0];
    }
    if t >= axis[n - 1] {
        return values[n - 1];
    }

    // t is interior, so an upper neighbour always exists
    let hi = axis.iter().position(|&x| x >= t).map_or(n - 1, |p| p);
    let lo = hi - 1;
    let frac = (t - axis[lo]) / (axis[hi] - axis[lo]);
    values[lo] + frac * (values[hi] - values[lo])
}

/// Bilinear interpolation on a regular grid, extrapolating at the edges.
///
/// `data` is indexed `[x, y]` with `data.dim() == (x_axis.len(), y_axis.len())`;
/// both axes have at least two points. Queries outside the grid evaluate
/// the boundary cell's linear form with an unbounded fractional
/// coordinate, which extends the edge gradient outward.
#[must_use]
pub fn interp2_extrapolating(
    x_axis: ArrayView1<f64>,
    y_axis: ArrayView1<f64>,
    data: ArrayView2<f64>,
    x: f64,
    y: f64,
) -> f64 {
    let (i, tx) = cell_coord(x_axis, x);
    let (j, ty) = cell_coord(y_axis, y);

    let v00 = data[[i, j]];
    let v10 = data[[i + 1, j]];
    let v01 = data[[i, j + 1]];
    let v11 = data[[i + 1, j + 1]];

    let lower = v00 + tx * (v10 - v00);
    let upper = v01 + tx * (v11 - v01);
    lower + ty * (upper - lower)
}

/// Locate the interpolation cell for `t`.
///
/// The cell index is clamped to the grid; the fractional coordinate is
/// left unbounded so out-of-range queries extrapolate from the boundary
/// cell.
fn cell_coord(axis: ArrayView1<f64>, t: f64) -> (usize, f64) {
    let n = axis.len();
    let lo = axis
        .iter()
        .position(|&x| x > t)
        .map_or(n - 1, |p| p)
        .saturating_sub(1)
        .min(n - 2);
    let frac = (t - axis[lo]) / (axis[lo + 1] - axis[lo]);
    (lo, frac)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::{array, Array2};

    #[test]
    fn interp1_hits_grid_points() {
        let axis = array![0.1, 0.5, 1.0];
        let values = array![0.9, 0.6, 0.3];
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 0.1), 0.9);
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 0.5), 0.6);
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 1.0), 0.3);
    }

    #[test]
    fn interp1_midpoint() {
        let axis = array![0.0, 1.0];
        let values = array![0.2, 0.8];
        assert_relative_eq!(
            interp1_clamped(axis.view(), values.view(), 0.5),
            0.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn interp1_clamps_flat_below_and_above() {
        let axis = array![0.1, 0.5, 1.0];
        let values = array![0.9, 0.6, 0.3];
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 0.01), 0.9);
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 5.0), 0.3);
    }

    #[test]
    fn interp1_single_point_axis() {
        let axis = array![0.3];
        let values = array![0.7];
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 0.3), 0.7);
        assert_relative_eq!(interp1_clamped(axis.view(), values.view(), 9.9), 0.7);
    }

    #[test]
    fn interp2_recovers_corner_values() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 1.0];
        let data =
            Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).expect("shape");

        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), 0.0, 0.0),
            1.0
        );
        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), 1.0, 1.0),
            4.0
        );
    }

    #[test]
    fn interp2_center_is_mean_of_corners() {
        let x = array![0.0, 1.0];
        let y = array![0.0, 1.0];
        let data =
            Array2::from_shape_vec((2, 2), vec![1.0, 2.0, 3.0, 4.0]).expect("shape");

        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), 0.5, 0.5),
            2.5
        );
    }

    #[test]
    fn interp2_extrapolates_edge_gradient() {
        // Plane z = x + y: extrapolation must follow the plane
        let x = array![0.0, 1.0, 2.0];
        let y = array![0.0, 1.0];
        let data = Array2::from_shape_vec(
            (3, 2),
            vec![0.0, 1.0, 1.0, 2.0, 2.0, 3.0],
        )
        .expect("shape");

        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), 3.0, 0.5),
            3.5
        );
        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), -1.0, 0.0),
            -1.0
        );
    }

    #[test]
    fn interp2_interior_cell_selection() {
        // Non-uniform axis spacing
        let x = array![0.0, 0.1, 1.0];
        let y = array![0.0, 2.0];
        let data = Array2::from_shape_vec(
            (3, 2),
            vec![0.0, 0.0, 10.0, 10.0, 100.0, 100.0],
        )
        .expect("shape");

        // Halfway between 0.1 and 1.0 along x
        assert_relative_eq!(
            interp2_extrapolating(x.view(), y.view(), data.view(), 0.55, 1.0),
            55.0,
            epsilon = 1e-12
        );
    }
}
