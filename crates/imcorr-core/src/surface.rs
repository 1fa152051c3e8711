//! # Grid Correlation Engine
//!
//! Correlation lookup over precomputed period-indexed surfaces.
//!
//! A `SurfaceSet` is the parsed grid document: one surface per pair plus
//! one period axis per period-dependent IM. It is built once by the
//! `formats` module and never mutated; every evaluation is a pure
//! function of (inputs, dataset).
//!
//! Period-dependence is a property of the DOCUMENT, not of the IM: an IM
//! is period-dependent here iff the document carries an axis for it, and
//! every lookup branches on axis presence in the resolved orientation.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};

use crate::registry;
use crate::{interp, CorrError, Im};

// =============================================================================
// SURFACE
// =============================================================================

/// A stored correlation surface for one IM pair.
#[derive(Debug, Clone, PartialEq)]
pub enum Surface {
    /// Both IMs period-independent: a single coefficient.
    Scalar(f64),
    /// Exactly one period axis: one coefficient per axis point.
    Curve(Array1<f64>),
    /// Two period axes: coefficients indexed by `(period_i, period_j)`.
    Grid(Array2<f64>),
}

impl Surface {
    /// Short kind tag for diagnostics.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Scalar(_) => "scalar",
            Self::Curve(_) => "curve",
            Self::Grid(_) => "grid",
        }
    }
}

// =============================================================================
// SURFACE SET
// =============================================================================

/// The grid dataset: correlation surfaces plus per-IM period axes.
///
/// Immutable after construction; share by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceSet {
    /// Surface per stored pair key (`"SA-FIV3"`).
    surfaces: BTreeMap<String, Surface>,
    /// Period axis per period-dependent IM name (`"SA"`).
    axes: BTreeMap<String, Array1<f64>>,
}

impl SurfaceSet {
    /// Assemble a set from parsed parts. Shape consistency between
    /// surfaces and axes is the loader's responsibility.
    pub(crate) fn from_parts(
        surfaces: BTreeMap<String, Surface>,
        axes: BTreeMap<String, Array1<f64>>,
    ) -> Self {
        Self { surfaces, axes }
    }

    /// Number of stored surfaces.
    #[must_use]
    pub fn len(&self) -> usize {
        self.surfaces.len()
    }

    /// Whether the set holds no surfaces.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.surfaces.is_empty()
    }

    /// Whether either orientation of `pair` has a stored surface.
    #[must_use]
    pub fn contains_pair(&self, pair: &str) -> bool {
        registry::resolve_pair(pair, |key| self.surfaces.contains_key(key)).is_ok()
    }

    /// The period axis for an IM, if it is period-dependent here.
    #[must_use]
    pub fn axis(&self, im: Im) -> Option<&Array1<f64>> {
        self.axes.get(im.name())
    }

    /// Correlation coefficient between the two IMs of `pair` at the given
    /// periods.
    ///
    /// Pass `None` for the period slot of a period-independent IM. Out of
    /// range periods are not errors: 1-D lookups clamp flat at the axis
    /// ends, 2-D lookups warn and extrapolate, and the 2-D result is
    /// clamped to [-1, 1].
    pub fn correlation(
        &self,
        pair: &str,
        period1: Option<f64>,
        period2: Option<f64>,
    ) -> Result<f64, CorrError> {
        let res = registry::resolve_pair(pair, |key| self.surfaces.contains_key(key))?;
        let (p_i, p_j) = res.order_periods(period1, period2);

        let surface = self
            .surfaces
            .get(&res.key())
            .ok_or_else(|| CorrError::UnsupportedPair(pair.to_string()))?;
        let axis_i = self.axes.get(res.imi.name());
        let axis_j = self.axes.get(res.imj.name());

        match (axis_i, axis_j) {
            // Both period-independent: the stored scalar is the answer.
            (None, None) => match surface {
                Surface::Scalar(v) => Ok(*v),
                other => Err(CorrError::ShapeMismatch(format!(
                    "{}: expected scalar surface, found {}",
                    res.key(),
                    other.kind()
                ))),
            },

            // Exactly one axis: 1-D lookup along it, flat at the ends.
            (Some(axis), None) | (None, Some(axis)) => {
                let dependent = if axis_i.is_some() { res.imi } else { res.imj };
                let period = p_i
                    .or(p_j)
                    .ok_or(CorrError::MissingPeriod(dependent))?;
                let curve = match surface {
                    Surface::Curve(c) => c,
                    other => {
                        return Err(CorrError::ShapeMismatch(format!(
                            "{}: expected curve surface, found {}",
                            res.key(),
                            other.kind()
                        )));
                    }
                };
                Ok(interp::interp1_clamped(axis.view(), curve.view(), period))
            }

            // Both axes: bilinear with warn-on-extrapolation and clamp.
            (Some(axis_i), Some(axis_j)) => {
                if res.imi == res.imj && p_i == p_j {
                    // Self-correlation at equal period
                    return Ok(1.0);
                }

                let t_i = p_i.ok_or(CorrError::MissingPeriod(res.imi))?;
                let t_j = p_j.ok_or(CorrError::MissingPeriod(res.imj))?;

                let grid = match surface {
                    Surface::Grid(g) => g,
                    other => {
                        return Err(CorrError::ShapeMismatch(format!(
                            "{}: expected grid surface, found {}",
                            res.key(),
                            other.kind()
                        )));
                    }
                };

                warn_if_outside(res.imi, axis_i, t_i);
                warn_if_outside(res.imj, axis_j, t_j);

                let raw = interp::interp2_extrapolating(
                    axis_i.view(),
                    axis_j.view(),
                    grid.view(),
                    t_i,
                    t_j,
                );
                Ok(raw.clamp(-1.0, 1.0))
            }
        }
    }
}

/// Non-fatal range check for 2-D lookups.
fn warn_if_outside(im: Im, axis: &Array1<f64>, t: f64) {
    let n = axis.len();
    if t < axis[0] || t > axis[n - 1] {
        tracing::warn!(
            im = im.name(),
            period = t,
            "value not within interpolation range, extrapolating"
        );
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use ndarray::array;

    /// Fixture: SA and FIV3 period-dependent, Ds575 and PGA independent.
    fn fixture() -> SurfaceSet {
        let mut surfaces = BTreeMap::new();
        let mut axes = BTreeMap::new();

        axes.insert("SA".to_string(), array![0.1, 1.0, 3.0]);
        axes.insert("FIV3".to_string(), array![0.5, 2.0]);

        // 2-D: SA rows, FIV3 columns
        surfaces.insert(
            "SA-FIV3".to_string(),
            Surface::Grid(
                Array2::from_shape_vec((3, 2), vec![0.9, 0.8, 0.7, 0.6, 0.5, 0.4])
                    .expect("shape"),
            ),
        );
        // 2-D self pair: SA x SA
        surfaces.insert(
            "SA-SA".to_string(),
            Surface::Grid(
                Array2::from_shape_vec(
                    (3, 3),
                    vec![1.0, 0.8, 0.5, 0.8, 1.0, 0.7, 0.5, 0.7, 1.0],
                )
                .expect("shape"),
            ),
        );
        // 1-D: SA period-dependent, Ds575 independent
        surfaces.insert(
            "SA-Ds575".to_string(),
            Surface::Curve(array![-0.3, -0.4, -0.5]),
        );
        // Scalar: both independent
        surfaces.insert("Ds575-PGA".to_string(), Surface::Scalar(0.25));

        SurfaceSet::from_parts(surfaces, axes)
    }

    #[test]
    fn scalar_pair_returns_stored_value() {
        let set = fixture();
        let v = set.correlation("Ds575-PGA", None, None).expect("eval");
        assert_relative_eq!(v, 0.25);
    }

    #[test]
    fn curve_pair_interpolates() {
        let set = fixture();
        // Midway between T=0.1 (-0.3) and T=1.0 (-0.4)
        let v = set.correlation("SA-Ds575", Some(0.55), None).expect("eval");
        assert_relative_eq!(v, -0.35, epsilon = 1e-12);
    }

    #[test]
    fn curve_pair_clamps_flat() {
        let set = fixture();
        let below = set.correlation("SA-Ds575", Some(0.01), None).expect("eval");
        let at_min = set.correlation("SA-Ds575", Some(0.1), None).expect("eval");
        assert_relative_eq!(below, at_min);

        let above = set.correlation("SA-Ds575", Some(99.0), None).expect("eval");
        assert_relative_eq!(above, -0.5);
    }

    #[test]
    fn curve_pair_accepts_period_in_either_slot() {
        // "the single supplied period" is whichever slot is present
        let set = fixture();
        let v1 = set.correlation("SA-Ds575", Some(0.55), None).expect("eval");
        let v2 = set.correlation("SA-Ds575", None, Some(0.55)).expect("eval");
        assert_relative_eq!(v1, v2);
    }

    #[test]
    fn grid_pair_interpolates_bilinearly() {
        let set = fixture();
        // Corner exact
        let v = set
            .correlation("SA-FIV3", Some(0.1), Some(0.5))
            .expect("eval");
        assert_relative_eq!(v, 0.9);

        // Center of the first cell
        let v = set
            .correlation("SA-FIV3", Some(0.55), Some(1.25))
            .expect("eval");
        assert_relative_eq!(v, (0.9 + 0.8 + 0.7 + 0.6) / 4.0, epsilon = 1e-12);
    }

    #[test]
    fn grid_pair_reversed_orientation_matches() {
        let set = fixture();
        let forward = set
            .correlation("SA-FIV3", Some(1.0), Some(0.5))
            .expect("eval");
        let reversed = set
            .correlation("FIV3-SA", Some(0.5), Some(1.0))
            .expect("eval");
        assert_eq!(forward.to_bits(), reversed.to_bits());
    }

    #[test]
    fn self_pair_equal_periods_is_exactly_one() {
        let set = fixture();
        let v = set.correlation("SA-SA", Some(0.37), Some(0.37)).expect("eval");
        assert_eq!(v, 1.0);
    }

    #[test]
    fn self_pair_unequal_periods_interpolates() {
        let set = fixture();
        let v = set.correlation("SA-SA", Some(0.1), Some(1.0)).expect("eval");
        assert_relative_eq!(v, 0.8);
    }

    #[test]
    fn extrapolated_grid_result_is_clamped() {
        // Steep surface: extrapolating past the edge exceeds 1 before the clamp
        let mut surfaces = BTreeMap::new();
        let mut axes = BTreeMap::new();
        axes.insert("SA".to_string(), array![0.1, 1.0]);
        axes.insert("FIV3".to_string(), array![0.5, 2.0]);
        surfaces.insert(
            "SA-FIV3".to_string(),
            Surface::Grid(
                Array2::from_shape_vec((2, 2), vec![0.2, 0.2, 0.9, 0.9]).expect("shape"),
            ),
        );
        let set = SurfaceSet::from_parts(surfaces, axes);

        let v = set
            .correlation("SA-FIV3", Some(10.0), Some(1.0))
            .expect("eval");
        assert_eq!(v, 1.0);
    }

    #[test]
    fn missing_period_is_an_error() {
        let set = fixture();
        let result = set.correlation("SA-FIV3", Some(1.0), None);
        assert!(matches!(result, Err(CorrError::MissingPeriod(Im::Fiv3))));

        let result = set.correlation("SA-Ds575", None, None);
        assert!(matches!(result, Err(CorrError::MissingPeriod(Im::Sa))));
    }

    #[test]
    fn zero_period_is_a_valid_period() {
        let set = fixture();
        // 0.0 must be treated as present, not as absent
        let v = set.correlation("SA-Ds575", Some(0.0), None).expect("eval");
        assert_relative_eq!(v, -0.3); // flat clamp at the axis minimum
    }

    #[test]
    fn unsupported_pair_is_an_error() {
        let set = fixture();
        let result = set.correlation("PGA-PGV", Some(1.0), Some(1.0));
        assert!(matches!(result, Err(CorrError::UnsupportedPair(_))));
    }

    #[test]
    fn repeated_calls_are_bit_identical() {
        let set = fixture();
        let a = set
            .correlation("SA-FIV3", Some(0.73), Some(1.21))
            .expect("eval");
        let b = set
            .correlation("SA-FIV3", Some(0.73), Some(1.21))
            .expect("eval");
        assert_eq!(a.to_bits(), b.to_bits());
    }
}
