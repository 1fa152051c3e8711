//! Integration tests for the CLI command layer: document loading from
//! disk and command execution against tempfile fixtures.

// Allow unwrap and panic in tests - these are standard for test code
#![allow(clippy::unwrap_used, clippy::panic)]

use imcorr::cli::{cmd_ann, cmd_grid, cmd_ims, cmd_pairs, load_models, load_surfaces};
use imcorr_core::CorrError;
use std::io::Write;
use std::path::PathBuf;
use tempfile::NamedTempFile;

const GRID_DOC: &str = r#"{
    "T_SA": [0.05, 0.1, 0.5, 1.0, 3.0],
    "T_FIV3": [0.5, 1.0, 2.0],
    "corr_SA-FIV3": [
        [0.52, 0.44, 0.36],
        [0.58, 0.49, 0.40],
        [0.76, 0.69, 0.58],
        [0.71, 0.78, 0.67],
        [0.55, 0.63, 0.72]
    ],
    "corr_SA-Ds575": [-0.25, -0.31, -0.38, -0.44, -0.49]
}"#;

const MODEL_DOC: &str = r#"{
    "SA-FIV3": {
        "weights": [[[0.6, -0.2], [0.3, 0.4]], [[0.7, -0.5]]],
        "biases": [[0.05, -0.1], [0.2]],
        "activation-functions": ["tanh", "tanh"]
    }
}"#;

fn write_doc(contents: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().unwrap();
    file.write_all(contents.as_bytes()).unwrap();
    file.flush().unwrap();
    file
}

// =============================================================================
// DOCUMENT LOADING
// =============================================================================

#[test]
fn load_surfaces_from_disk() {
    let file = write_doc(GRID_DOC);
    let set = load_surfaces(file.path()).unwrap();

    assert_eq!(set.len(), 2);
    let rho = set.correlation("SA-FIV3", Some(1.0), Some(0.5)).unwrap();
    assert!((rho - 0.71).abs() < 1e-12);
}

#[test]
fn load_models_from_disk() {
    let file = write_doc(MODEL_DOC);
    let set = load_models(file.path()).unwrap();

    assert_eq!(set.len(), 1);
    let rho = set.correlation("SA-FIV3", Some(1.0), Some(0.5)).unwrap();
    assert!((-1.0..=1.0).contains(&rho));
}

#[test]
fn missing_file_is_an_io_error() {
    let path = PathBuf::from("does-not-exist.json");
    let result = load_surfaces(&path);
    assert!(matches!(result, Err(CorrError::Io(_))));
}

#[test]
fn directory_path_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let result = load_surfaces(dir.path());
    assert!(matches!(result, Err(CorrError::Io(_))));
}

#[test]
fn malformed_document_rejected_on_load() {
    let file = write_doc("{ not json");
    let result = load_surfaces(file.path());
    assert!(matches!(result, Err(CorrError::MalformedDocument(_))));
}

// =============================================================================
// COMMANDS
// =============================================================================

#[test]
fn ims_and_pairs_commands_succeed() {
    assert!(cmd_ims(false).is_ok());
    assert!(cmd_ims(true).is_ok());
    assert!(cmd_pairs(false).is_ok());
    assert!(cmd_pairs(true).is_ok());
}

#[test]
fn grid_command_evaluates() {
    let file = write_doc(GRID_DOC);
    let result = cmd_grid(file.path(), false, "SA-FIV3", Some(1.05), Some(0.5));
    assert!(result.is_ok());

    // Single-period lookup against the curve surface
    let result = cmd_grid(file.path(), true, "SA-Ds575", Some(0.6), None);
    assert!(result.is_ok());
}

#[test]
fn ann_command_evaluates() {
    let file = write_doc(MODEL_DOC);
    let result = cmd_ann(file.path(), false, "SA-FIV3", Some(0.6), Some(1.0));
    assert!(result.is_ok());
}

#[test]
fn unsupported_pair_propagates() {
    let file = write_doc(GRID_DOC);
    let result = cmd_grid(file.path(), false, "PGA-PGV", None, None);
    assert!(matches!(result, Err(CorrError::UnsupportedPair(_))));
}

#[test]
fn unknown_im_rejected_before_loading() {
    // Parse failure fires before any file access
    let path = PathBuf::from("does-not-exist.json");
    let result = cmd_grid(&path, false, "SA-CAV", Some(1.0), Some(1.0));
    assert!(matches!(result, Err(CorrError::UnknownIm(_))));
}
