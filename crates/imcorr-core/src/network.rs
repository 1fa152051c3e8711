//! # ANN Correlation Engine
//!
//! Feed-forward inference over pre-trained per-pair models.
//!
//! A `ModelSet` is the parsed model document: one layer stack per pair.
//! Weights are fixed constants; there is no training here, only forward
//! propagation. The engines share the registry's orientation resolution,
//! but resolve against their own key set: the model document may store a
//! pair in the opposite orientation from the grid document.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};

use crate::activation::Activation;
use crate::registry;
use crate::CorrError;

// =============================================================================
// LAYERS
// =============================================================================

/// One affine-plus-activation layer.
///
/// `weights` has shape `(output width, input width)`; `bias` has the
/// output width. Widths chain across the stack and are validated by the
/// loader.
#[derive(Debug, Clone, PartialEq)]
pub struct Layer {
    weights: Array2<f64>,
    bias: Array1<f64>,
    activation: Activation,
}

impl Layer {
    pub(crate) fn new(weights: Array2<f64>, bias: Array1<f64>, activation: Activation) -> Self {
        Self {
            weights,
            bias,
            activation,
        }
    }

    /// Input width this layer expects.
    #[must_use]
    pub fn input_width(&self) -> usize {
        self.weights.ncols()
    }

    /// Output width this layer produces.
    #[must_use]
    pub fn output_width(&self) -> usize {
        self.weights.nrows()
    }
}

// =============================================================================
// MODEL
// =============================================================================

/// A per-pair feed-forward model.
#[derive(Debug, Clone, PartialEq)]
pub struct AnnModel {
    layers: Vec<Layer>,
    /// Whether the first-layer affine step runs on ln(features).
    log_input: bool,
}

impl AnnModel {
    pub(crate) fn new(layers: Vec<Layer>, log_input: bool) -> Self {
        Self { layers, log_input }
    }

    /// Number of layers in the stack.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.layers.len()
    }

    /// Propagate a feature vector through the stack to a scalar.
    fn forward(&self, mut v: Array1<f64>) -> Result<f64, CorrError> {
        for (i, layer) in self.layers.iter().enumerate() {
            if self.log_input && i == 0 {
                v.mapv_inplace(f64::ln);
            }
            if layer.input_width() != v.len() {
                return Err(CorrError::ShapeMismatch(format!(
                    "layer {i} expects input width {}, got {}",
                    layer.input_width(),
                    v.len()
                )));
            }
            let z = layer.weights.dot(&v) + &layer.bias;
            v = layer.activation.apply(z);
        }

        if v.len() != 1 {
            return Err(CorrError::ShapeMismatch(format!(
                "final layer width {} (expected 1)",
                v.len()
            )));
        }
        Ok(v[0])
    }
}

// =============================================================================
// MODEL SET
// =============================================================================

/// The ANN dataset: one model per stored pair key.
///
/// Immutable after construction; share by reference.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ModelSet {
    models: BTreeMap<String, AnnModel>,
}

impl ModelSet {
    pub(crate) fn from_parts(models: BTreeMap<String, AnnModel>) -> Self {
        Self { models }
    }

    /// Number of stored models.
    #[must_use]
    pub fn len(&self) -> usize {
        self.models.len()
    }

    /// Whether the set holds no models.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// Whether either orientation of `pair` has a stored model.
    #[must_use]
    pub fn contains_pair(&self, pair: &str) -> bool {
        registry::resolve_pair(pair, |key| self.models.contains_key(key)).is_ok()
    }

    /// Correlation coefficient between the two IMs of `pair` at the given
    /// periods, reconstructed by the pair's network.
    ///
    /// Pass `None` for the period slot of a period-independent IM. The
    /// range bound comes from the trained final activation (tanh in the
    /// published models); no independent clamp is applied.
    pub fn correlation(
        &self,
        pair: &str,
        period1: Option<f64>,
        period2: Option<f64>,
    ) -> Result<f64, CorrError> {
        let res = registry::resolve_pair(pair, |key| self.models.contains_key(key))?;
        let (p_i, p_j) = res.order_periods(period1, period2);

        if res.imi == res.imj && p_i == p_j {
            // Self-correlation at equal period; skip the network
            return Ok(1.0);
        }

        let model = self
            .models
            .get(&res.key())
            .ok_or_else(|| CorrError::UnsupportedPair(pair.to_string()))?;

        // The models see a canonical period ordering: same-type pairs take
        // (larger, smaller); cross-type pairs take stored-orientation order;
        // pairs with a period-independent member take the one present period.
        let features = match (p_i, p_j) {
            (Some(a), Some(b)) if res.imi == res.imj => vec![a.max(b), a.min(b)],
            (Some(a), Some(b)) => vec![a, b],
            (Some(t), None) | (None, Some(t)) => vec![t],
            (None, None) => return Err(CorrError::MissingPeriod(res.imi)),
        };

        model.forward(Array1::from(features))
    }
}

// =============================================================================
// TESTS
// =============================================================================
