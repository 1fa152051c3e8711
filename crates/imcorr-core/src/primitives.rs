//! # Innate Primitives
//!
//! Hardcoded runtime constants for the imcorr engines.
//!
//! imcorr starts with zero data but fixed structure: the supported pair
//! table, the dataset key grammar, and the validation limits are compiled
//! into the binary and are immutable at runtime. The numeric content
//! (surfaces, weights) arrives from the two configuration documents.

/// Separator between the two IM names in a pair key (`"SA-FIV3"`).
pub const PAIR_SEPARATOR: char = '-';

/// Key prefix for correlation surfaces in the grid document.
///
/// - `corr_<IMi>-<IMj>` maps to a scalar, curve, or 2-D surface.
pub const SURFACE_KEY_PREFIX: &str = "corr_";

/// Key prefix for period axes in the grid document.
///
/// - `T_<IM>` maps to the ordered period axis of a period-dependent IM.
/// - An IM without a `T_` key is period-independent in that document.
pub const AXIS_KEY_PREFIX: &str = "T_";

/// The pairs covered by the published correlation models.
///
/// Orientations are as published; each dataset may store a given pair in
/// either orientation, so lookups must try both (see `registry`).
pub const SUPPORTED_PAIRS: [&str; 24] = [
    "FIV3-FIV3",
    "FIV3-Ds595",
    "FIV3-Ds575",
    "Sa_avg3-Sa_avg3",
    "Sa_avg3-FIV3",
    "Sa_avg3-Ds595",
    "Sa_avg3-Ds575",
    "SA-Sa_avg3",
    "SA-FIV3",
    "SA-SA",
    "SA-Ds595",
    "SA-Ds575",
    "Sa_avg2-Sa_avg2",
    "SA-Sa_avg2",
    "Sa_avg2-Sa_avg3",
    "Sa_avg2-PGA",
    "Sa_avg3-PGA",
    "Sa_avg2-PGV",
    "Sa_avg3-PGV",
    "Sa_avg2-Ds575",
    "Sa_avg2-Ds595",
    "FIV3-PGA",
    "FIV3-PGV",
    "Sa_avg2-FIV3",
];

/// Pairs whose ANN models take natural-log period input.
///
/// These are the spectral-to-spectral pairs: their networks were trained
/// on ln(T) features, so the first-layer affine step runs on the
/// elementwise log of the feature vector. Membership is checked in either
/// orientation (see `registry::is_log_input_pair`).
pub const LOG_INPUT_PAIRS: [&str; 6] = [
    "SA-SA",
    "SA-Sa_avg2",
    "SA-Sa_avg3",
    "Sa_avg2-Sa_avg2",
    "Sa_avg2-Sa_avg3",
    "Sa_avg3-Sa_avg3",
];

// =============================================================================
// INPUT VALIDATION LIMITS
// =============================================================================

/// Maximum accepted size for a configuration document (16 MB).
///
/// Documents larger than this are rejected before parsing.
/// This prevents memory exhaustion from malicious or corrupted input.
pub const MAX_DOCUMENT_SIZE: usize = 16 * 1024 * 1024;

/// Maximum number of points in a period axis.
///
/// Axes longer than this are rejected by the loader.
pub const MAX_AXIS_LENGTH: usize = 10_000;

/// Maximum width (rows or columns) of an ANN layer.
///
/// The published models are a few neurons wide; anything near this limit
/// indicates corrupted model data.
pub const MAX_LAYER_WIDTH: usize = 1024;
