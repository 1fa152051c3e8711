//! # imcorr-core
//!
//! Pairwise correlation of seismic intensity measures - THE LOGIC.
//!
//! This crate computes correlation coefficients between seismic intensity
//! measures (IMs) for probabilistic seismic hazard and risk analysis.
//! Given a named IM pair and optional vibration periods, it returns a
//! coefficient in [-1, 1] via one of two engines:
//!
//! - the GRID engine interpolates precomputed correlation surfaces
//!   indexed by period (`SurfaceSet`);
//! - the ANN engine propagates the periods through a small pre-trained
//!   feed-forward network per pair (`ModelSet`).
//!
//! ## Architectural Constraints
//!
//! - Pure Rust: no async, no network dependencies
//! - No file I/O: the two configuration documents arrive as already-read
//!   text; reading files is the app layer's job
//! - Immutable after load: datasets are explicit values passed by
//!   reference, never process globals; every evaluation is a pure
//!   function of (inputs, dataset)
//! - Closed: the IM set, pair table and activation set are compiled in
//!
//! ## Example
//!
//! ```
//! use imcorr_core::formats;
//!
//! let grid = formats::surfaces_from_json(r#"{
//!     "T_SA": [0.1, 1.0, 3.0],
//!     "corr_SA-Ds575": [-0.3, -0.4, -0.5]
//! }"#)?;
//!
//! let rho = grid.correlation("SA-Ds575", Some(0.55), None)?;
//! assert!((-1.0..=1.0).contains(&rho));
//! # Ok::<(), imcorr_core::CorrError>(())
//! ```

// =============================================================================
// MODULES
// =============================================================================

pub mod activation;
pub mod formats;
pub mod interp;
pub mod network;
pub mod primitives;
pub mod registry;
pub mod surface;
pub mod types;

// =============================================================================
// RE-EXPORTS: Core Types (from types module)
// =============================================================================

pub use types::{CorrError, Im};

// =============================================================================
// RE-EXPORTS: Engines
// =============================================================================

pub use network::{AnnModel, Layer, ModelSet};
pub use surface::{Surface, SurfaceSet};

// =============================================================================
// RE-EXPORTS: Registry & Activations
// =============================================================================

pub use activation::Activation;
pub use registry::{
    is_supported_im, is_supported_pair, parse_pair, resolve_pair, supported_pairs, Resolution,
    SUPPORTED_IMS,
};

// =============================================================================
// RE-EXPORTS: Formats (from formats module)
// =============================================================================

pub use formats::{models_from_json, models_from_value, surfaces_from_json, surfaces_from_value};
