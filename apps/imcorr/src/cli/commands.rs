//! # CLI Command Implementations
//!
//! This module contains the actual implementations of CLI commands,
//! including the only file I/O in the workspace: reading the two
//! configuration documents.

use imcorr_core::{
    formats, primitives::MAX_DOCUMENT_SIZE, registry, CorrError, Im, ModelSet, SurfaceSet,
    SUPPORTED_IMS,
};
use std::path::{Path, PathBuf};

// =============================================================================
// FILE LOADING
// =============================================================================

/// Validate file size before reading.
///
/// The core rejects oversized document TEXT; checking the metadata first
/// avoids reading a huge file into memory at all.
fn validate_file_size(path: &Path, max_size: u64) -> Result<(), CorrError> {
    let metadata = std::fs::metadata(path)
        .map_err(|e| CorrError::Io(format!("Cannot read file metadata: {}", e)))?;

    if metadata.len() > max_size {
        return Err(CorrError::Io(format!(
            "File size {} bytes exceeds maximum allowed {} bytes",
            metadata.len(),
            max_size
        )));
    }
    Ok(())
}

/// Validate a document path.
///
/// Canonicalizes the path (resolving symlinks and "..") and ensures it
/// names a regular file.
fn validate_file_path(path: &Path) -> Result<PathBuf, CorrError> {
    let canonical = path
        .canonicalize()
        .map_err(|e| CorrError::Io(format!("Invalid file path '{}': {}", path.display(), e)))?;

    if !canonical.is_file() {
        return Err(CorrError::Io(format!(
            "Path '{}' is not a regular file",
            path.display()
        )));
    }

    Ok(canonical)
}

/// Read and parse the grid correlation document.
pub fn load_surfaces(path: &Path) -> Result<SurfaceSet, CorrError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_DOCUMENT_SIZE as u64)?;

    let text = std::fs::read_to_string(&canonical)
        .map_err(|e| CorrError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    let set = formats::surfaces_from_json(&text)?;

    tracing::info!(
        surfaces = set.len(),
        path = %path.display(),
        "loaded grid correlation document"
    );
    Ok(set)
}

/// Read and parse the ANN model document.
pub fn load_models(path: &Path) -> Result<ModelSet, CorrError> {
    let canonical = validate_file_path(path)?;
    validate_file_size(&canonical, MAX_DOCUMENT_SIZE as u64)?;

    let text = std::fs::read_to_string(&canonical)
        .map_err(|e| CorrError::Io(format!("Cannot read '{}': {}", path.display(), e)))?;
    let set = formats::models_from_json(&text)?;

    tracing::info!(
        models = set.len(),
        path = %path.display(),
        "loaded ANN model document"
    );
    Ok(set)
}

// =============================================================================
// IMS COMMAND
// =============================================================================

/// List the supported intensity measures.
pub fn cmd_ims(json_mode: bool) -> Result<(), CorrError> {
    let names: Vec<&str> = SUPPORTED_IMS.iter().map(|im| im.name()).collect();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&names).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Supported intensity measures");
    println!("============================");
    for name in names {
        println!("  {}", name);
    }

    Ok(())
}

// =============================================================================
// PAIRS COMMAND
// =============================================================================

/// List the supported IM pairs.
pub fn cmd_pairs(json_mode: bool) -> Result<(), CorrError> {
    let pairs = registry::supported_pairs();

    if json_mode {
        println!(
            "{}",
            serde_json::to_string_pretty(&pairs).unwrap_or_default()
        );
        return Ok(());
    }

    println!("Supported IM pairs");
    println!("==================");
    for pair in pairs {
        println!("  {}", pair);
    }

    Ok(())
}

// =============================================================================
// GRID COMMAND
// =============================================================================

/// Grid-engine correlation for a pair.
pub fn cmd_grid(
    grid_path: &Path,
    json_mode: bool,
    pair: &str,
    period1: Option<f64>,
    period2: Option<f64>,
) -> Result<(), CorrError> {
    let (imi, imj) = registry::parse_pair(pair)?;
    let surfaces = load_surfaces(grid_path)?;
    let rho = surfaces.correlation(pair, period1, period2)?;

    print_correlation("grid", imi, imj, period1, period2, rho, json_mode);
    Ok(())
}

// =============================================================================
// ANN COMMAND
// =============================================================================

/// ANN-engine correlation for a pair.
pub fn cmd_ann(
    models_path: &Path,
    json_mode: bool,
    pair: &str,
    period1: Option<f64>,
    period2: Option<f64>,
) -> Result<(), CorrError> {
    let (imi, imj) = registry::parse_pair(pair)?;
    let models = load_models(models_path)?;
    let rho = models.correlation(pair, period1, period2)?;

    print_correlation("ann", imi, imj, period1, period2, rho, json_mode);
    Ok(())
}

// =============================================================================
// OUTPUT FORMATTING
// =============================================================================

/// An IM with its optional period, e.g. `SA(1.0 s)` or `Ds575`.
fn format_im(im: Im, period: Option<f64>) -> String {
    match period {
        Some(t) => format!("{}({} s)", im, t),
        None => im.to_string(),
    }
}

fn print_correlation(
    engine: &str,
    imi: Im,
    imj: Im,
    period1: Option<f64>,
    period2: Option<f64>,
    rho: f64,
    json_mode: bool,
) {
    if json_mode {
        let output = serde_json::json!({
            "engine": engine,
            "imi": imi,
            "imj": imj,
            "period1": period1,
            "period2": period2,
            "correlation": rho
        });
        println!(
            "{}",
            serde_json::to_string_pretty(&output).unwrap_or_default()
        );
        return;
    }

    println!(
        "Correlation coefficient between {} and {} is {:.3}",
        format_im(imi, period1),
        format_im(imj, period2),
        rho
    );
}
