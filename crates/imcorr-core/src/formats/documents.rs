//! # Document Parsing
//!
//! JSON parsing for the grid document and the ANN model document.
//!
//! ## Validation
//!
//! All structural validation happens here, before any engine sees the
//! data:
//! - Document size limit checked BEFORE parsing
//! - Keys must follow the document grammar and name supported IMs
//! - Period axes strictly increasing, within length limits
//! - Surfaces shape-checked against the axes present for their pair
//! - Model layer lists parallel, widths chained, final width 1
//! - Activation names resolved to the closed enum at load
//!
//! A violation fails the load with `CorrError::MalformedDocument` (or the
//! more specific `UnknownIm` / `UnknownActivation`), never the Nth
//! evaluation.

use std::collections::BTreeMap;

use ndarray::{Array1, Array2};
use serde::Deserialize;
use serde_json::Value;

use crate::activation::Activation;
use crate::network::{AnnModel, Layer, ModelSet};
use crate::primitives::{
    AXIS_KEY_PREFIX, MAX_AXIS_LENGTH, MAX_DOCUMENT_SIZE, MAX_LAYER_WIDTH, SURFACE_KEY_PREFIX,
};
use crate::surface::{Surface, SurfaceSet};
use crate::{registry, CorrError, Im};

// =============================================================================
// GRID DOCUMENT
// =============================================================================

/// Parse the grid document from JSON text.
pub fn surfaces_from_json(text: &str) -> Result<SurfaceSet, CorrError> {
    guard_size(text.len())?;
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CorrError::MalformedDocument(e.to_string()))?;
    surfaces_from_value(&value)
}

/// Parse the grid document from an already-parsed JSON value.
///
/// Keys: `corr_<IMi>-<IMj>` -> scalar, 1-D or 2-D numeric array;
/// `T_<IM>` -> strictly increasing period axis.
pub fn surfaces_from_value(value: &Value) -> Result<SurfaceSet, CorrError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("grid document root must be an object"))?;

    // First pass: collect axes so surfaces can be shape-checked against them.
    let mut axes: BTreeMap<String, Array1<f64>> = BTreeMap::new();
    for (key, entry) in object {
        if let Some(im_name) = key.strip_prefix(AXIS_KEY_PREFIX) {
            let im = Im::from_name(im_name)?;
            axes.insert(im.name().to_string(), parse_axis(key, entry)?);
        } else if !key.starts_with(SURFACE_KEY_PREFIX) {
            return Err(malformed(format!("unrecognized key '{key}'")));
        }
    }

    let mut surfaces: BTreeMap<String, Surface> = BTreeMap::new();
    for (key, entry) in object {
        let Some(pair_key) = key.strip_prefix(SURFACE_KEY_PREFIX) else {
            continue;
        };
        let (imi, imj) = registry::parse_pair(pair_key)?;
        guard_single_orientation(&surfaces, pair_key, imi, imj)?;
        let surface = parse_surface(
            key,
            entry,
            axes.get(imi.name()),
            axes.get(imj.name()),
        )?;
        surfaces.insert(pair_key.to_string(), surface);
    }

    Ok(SurfaceSet::from_parts(surfaces, axes))
}

/// Parse and validate one period axis.
fn parse_axis(key: &str, entry: &Value) -> Result<Array1<f64>, CorrError> {
    let axis = parse_vector(key, entry)?;
    if axis.is_empty() {
        return Err(malformed(format!("{key}: empty period axis")));
    }
    if axis.len() > MAX_AXIS_LENGTH {
        return Err(malformed(format!(
            "{key}: axis length {} exceeds maximum {}",
            axis.len(),
            MAX_AXIS_LENGTH
        )));
    }
    if axis.windows(2).any(|w| w[1] <= w[0]) {
        return Err(malformed(format!(
            "{key}: period axis must be strictly increasing"
        )));
    }
    Ok(Array1::from(axis))
}

/// Parse one surface entry, shape-checked against the axes present for
/// its pair.
fn parse_surface(
    key: &str,
    entry: &Value,
    axis_i: Option<&Array1<f64>>,
    axis_j: Option<&Array1<f64>>,
) -> Result<Surface, CorrError> {
    match (axis_i, axis_j) {
        // Both period-independent: a bare number.
        (None, None) => {
            let v = entry
                .as_f64()
                .ok_or_else(|| malformed(format!("{key}: expected a scalar correlation")))?;
            Ok(Surface::Scalar(v))
        }

        // One axis: a curve along it. Accept a flat vector or a 2-D array
        // with a singleton dimension (the published documents use both).
        (Some(axis), None) | (None, Some(axis)) => {
            let curve = parse_curve(key, entry)?;
            if curve.len() != axis.len() {
                return Err(malformed(format!(
                    "{key}: curve length {} does not match axis length {}",
                    curve.len(),
                    axis.len()
                )));
            }
            Ok(Surface::Curve(Array1::from(curve)))
        }

        // Two axes: a full (len_i, len_j) grid, at least 2x2.
        (Some(axis_i), Some(axis_j)) => {
            if axis_i.len() < 2 || axis_j.len() < 2 {
                return Err(malformed(format!(
                    "{key}: 2-D surface needs at least two points per axis"
                )));
            }
            let rows = parse_matrix(key, entry)?;
            let (nrows, ncols) = (rows.len(), rows[0].len());
            if nrows != axis_i.len() || ncols != axis_j.len() {
                return Err(malformed(format!(
                    "{key}: surface shape ({nrows}, {ncols}) does not match axes ({}, {})",
                    axis_i.len(),
                    axis_j.len()
                )));
            }
            let flat: Vec<f64> = rows.into_iter().flatten().collect();
            let grid = Array2::from_shape_vec((nrows, ncols), flat)
                .map_err(|e| malformed(format!("{key}: {e}")))?;
            Ok(Surface::Grid(grid))
        }
    }
}

/// A 1-D curve, possibly stored as a singleton-dimension 2-D array.
fn parse_curve(key: &str, entry: &Value) -> Result<Vec<f64>, CorrError> {
    let items = entry
        .as_array()
        .ok_or_else(|| malformed(format!("{key}: expected an array")))?;

    if items.iter().all(Value::is_number) {
        return parse_vector(key, entry);
    }

    // Nested: flatten (1, n) or (n, 1)
    let mut rows = parse_matrix(key, entry)?;
    if rows.len() == 1 {
        Ok(rows.remove(0))
    } else if rows.iter().all(|r| r.len() == 1) {
        Ok(rows.into_iter().flatten().collect())
    } else {
        Err(malformed(format!(
            "{key}: expected a vector or singleton-dimension array"
        )))
    }
}

// =============================================================================
// ANN MODEL DOCUMENT
// =============================================================================

/// One model entry as stored in the document.
#[derive(Debug, Deserialize)]
struct RawModel {
    /// Ordered weight matrices, one per layer.
    weights: Vec<Vec<Vec<f64>>>,
    /// Ordered bias vectors, parallel to `weights`.
    biases: Vec<Vec<f64>>,
    /// Ordered activation names, parallel to `weights`.
    #[serde(rename = "activation-functions")]
    activations: Vec<String>,
}

/// Parse the ANN model document from JSON text.
pub fn models_from_json(text: &str) -> Result<ModelSet, CorrError> {
    guard_size(text.len())?;
    let value: Value = serde_json::from_str(text)
        .map_err(|e| CorrError::MalformedDocument(e.to_string()))?;
    models_from_value(&value)
}

/// Parse the ANN model document from an already-parsed JSON value.
///
/// Keys: `<IMi>-<IMj>` -> `{weights, biases, activation-functions}`.
pub fn models_from_value(value: &Value) -> Result<ModelSet, CorrError> {
    let object = value
        .as_object()
        .ok_or_else(|| malformed("model document root must be an object"))?;

    let mut models: BTreeMap<String, AnnModel> = BTreeMap::new();
    for (key, entry) in object {
        let (imi, imj) = registry::parse_pair(key)?;
        guard_single_orientation(&models, key, imi, imj)?;
        let raw: RawModel = serde_json::from_value(entry.clone())
            .map_err(|e| malformed(format!("{key}: {e}")))?;
        let log_input = registry::is_log_input_pair(imi, imj);
        models.insert(key.clone(), build_model(key, raw, log_input)?);
    }

    Ok(ModelSet::from_parts(models))
}

/// Validate one raw model and assemble its layer stack.
fn build_model(key: &str, raw: RawModel, log_input: bool) -> Result<AnnModel, CorrError> {
    let depth = raw.weights.len();
    if depth == 0 {
        return Err(malformed(format!("{key}: model has no layers")));
    }
    if raw.biases.len() != depth || raw.activations.len() != depth {
        return Err(malformed(format!(
            "{key}: weights/biases/activation-functions lists must be parallel \
             ({depth}/{}/{})",
            raw.biases.len(),
            raw.activations.len()
        )));
    }

    let mut layers = Vec::with_capacity(depth);
    let mut prev_width: Option<usize> = None;

    for (i, ((rows, bias), name)) in raw
        .weights
        .into_iter()
        .zip(raw.biases)
        .zip(raw.activations)
        .enumerate()
    {
        let weights = matrix_from_rows(key, i, rows)?;

        if bias.len() != weights.nrows() {
            return Err(malformed(format!(
                "{key}: layer {i} bias length {} does not match output width {}",
                bias.len(),
                weights.nrows()
            )));
        }
        if let Some(prev) = prev_width {
            if weights.ncols() != prev {
                return Err(malformed(format!(
                    "{key}: layer {i} input width {} does not chain from previous output {prev}",
                    weights.ncols()
                )));
            }
        }
        prev_width = Some(weights.nrows());

        let activation = Activation::from_name(&name)?;
        layers.push(Layer::new(weights, Array1::from(bias), activation));
    }

    if prev_width != Some(1) {
        return Err(malformed(format!(
            "{key}: final layer must emit width 1"
        )));
    }

    Ok(AnnModel::new(layers, log_input))
}

/// Assemble one rectangular weight matrix.
fn matrix_from_rows(key: &str, layer: usize, rows: Vec<Vec<f64>>) -> Result<Array2<f64>, CorrError> {
    if rows.is_empty() || rows[0].is_empty() {
        return Err(malformed(format!("{key}: layer {layer} has an empty weight matrix")));
    }
    let (nrows, ncols) = (rows.len(), rows[0].len());
    if nrows > MAX_LAYER_WIDTH || ncols > MAX_LAYER_WIDTH {
        return Err(malformed(format!(
            "{key}: layer {layer} width exceeds maximum {MAX_LAYER_WIDTH}"
        )));
    }
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(malformed(format!(
            "{key}: layer {layer} weight matrix is ragged"
        )));
    }
    let flat: Vec<f64> = rows.into_iter().flatten().collect();
    Array2::from_shape_vec((nrows, ncols), flat)
        .map_err(|e| malformed(format!("{key}: layer {layer}: {e}")))
}

// =============================================================================
// SHARED HELPERS
// =============================================================================

/// Reject a document that stores BOTH orientations of one pair.
///
/// Lookup relies on exactly one orientation existing per dataset; a
/// document with both is ambiguous.
fn guard_single_orientation<V>(
    seen: &BTreeMap<String, V>,
    key: &str,
    imi: Im,
    imj: Im,
) -> Result<(), CorrError> {
    let reversed = registry::pair_key(imj, imi);
    if imi != imj && seen.contains_key(&reversed) {
        return Err(malformed(format!(
            "{key}: document also stores the reversed orientation {reversed}"
        )));
    }
    Ok(())
}

/// Reject oversized documents BEFORE parsing.
fn guard_size(len: usize) -> Result<(), CorrError> {
    if len > MAX_DOCUMENT_SIZE {
        return Err(malformed(format!(
            "document size {len} bytes exceeds maximum allowed {MAX_DOCUMENT_SIZE} bytes"
        )));
    }
    Ok(())
}

fn malformed(msg: impl Into<String>) -> CorrError {
    CorrError::MalformedDocument(msg.into())
}

fn parse_vector(key: &str, entry: &Value) -> Result<Vec<f64>, CorrError> {
    entry
        .as_array()
        .ok_or_else(|| malformed(format!("{key}: expected an array")))?
        .iter()
        .map(|v| {
            v.as_f64()
                .ok_or_else(|| malformed(format!("{key}: non-numeric entry")))
        })
        .collect()
}

fn parse_matrix(key: &str, entry: &Value) -> Result<Vec<Vec<f64>>, CorrError> {
    let rows: Vec<Vec<f64>> = entry
        .as_array()
        .ok_or_else(|| malformed(format!("{key}: expected an array")))?
        .iter()
        .map(|row| parse_vector(key, row))
        .collect::<Result<_, _>>()?;
    if rows.is_empty() || rows[0].is_empty() {
        return Err(malformed(format!("{key}: empty array")));
    }
    let ncols = rows[0].len();
    if rows.iter().any(|r| r.len() != ncols) {
        return Err(malformed(format!("{key}: ragged array")));
    }
    Ok(rows)
}

// =============================================================================
// TESTS
// =============================================================================
