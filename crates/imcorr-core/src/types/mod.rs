//! # Core Type Definitions
//!
//! This module contains the core types for the imcorr correlation engines:
//! - The closed intensity-measure enumeration (`Im`)
//! - Error types (`CorrError`)
//!
//! ## Immutability Guarantees
//!
//! All types in this module:
//! - Form closed sets fixed at compile time (no runtime registration)
//! - Are plain values; nothing here owns I/O or mutable state

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

// =============================================================================
// INTENSITY MEASURES
// =============================================================================

/// A seismic intensity measure supported by the correlation models.
///
/// The set is closed: the published grid surfaces and ANN models are
/// defined over exactly these eight measures. Canonical text names are
/// the strings used as dataset keys (`"Sa_avg2"`, `"PGA"`, ...).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Im {
    /// Filtered incremental velocity (3-component).
    #[serde(rename = "FIV3")]
    Fiv3,
    /// Average spectral acceleration, variant 2.
    #[serde(rename = "Sa_avg2")]
    SaAvg2,
    /// Average spectral acceleration, variant 3.
    #[serde(rename = "Sa_avg3")]
    SaAvg3,
    /// Significant duration, 5-95% Arias intensity.
    #[serde(rename = "Ds595")]
    Ds595,
    /// Significant duration, 5-75% Arias intensity.
    #[serde(rename = "Ds575")]
    Ds575,
    /// Spectral acceleration at a vibration period.
    #[serde(rename = "SA")]
    Sa,
    /// Peak ground acceleration.
    #[serde(rename = "PGA")]
    Pga,
    /// Peak ground velocity.
    #[serde(rename = "PGV")]
    Pgv,
}

impl Im {
    /// Canonical text name, as used in dataset keys.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Fiv3 => "FIV3",
            Self::SaAvg2 => "Sa_avg2",
            Self::SaAvg3 => "Sa_avg3",
            Self::Ds595 => "Ds595",
            Self::Ds575 => "Ds575",
            Self::Sa => "SA",
            Self::Pga => "PGA",
            Self::Pgv => "PGV",
        }
    }

    /// Parse a canonical name.
    ///
    /// Returns `CorrError::UnknownIm` for anything outside the closed set.
    /// Matching is exact; no case folding.
    pub fn from_name(name: &str) -> Result<Self, CorrError> {
        match name {
            "FIV3" => Ok(Self::Fiv3),
            "Sa_avg2" => Ok(Self::SaAvg2),
            "Sa_avg3" => Ok(Self::SaAvg3),
            "Ds595" => Ok(Self::Ds595),
            "Ds575" => Ok(Self::Ds575),
            "SA" => Ok(Self::Sa),
            "PGA" => Ok(Self::Pga),
            "PGV" => Ok(Self::Pgv),
            other => Err(CorrError::UnknownIm(other.to_string())),
        }
    }

    /// Whether this measure is a response-spectrum quantity.
    ///
    /// Spectral pairs are the ones whose ANN models take log-period input.
    #[must_use]
    pub const fn is_spectral(self) -> bool {
        matches!(self, Self::Sa | Self::SaAvg2 | Self::SaAvg3)
    }
}

impl fmt::Display for Im {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

// =============================================================================
// ERROR TYPES
// =============================================================================

/// Errors that can occur in the imcorr engines.
///
/// - No silent failures
/// - Use `Result<T, CorrError>` for fallible operations
/// - Out-of-range periods in the grid engine are NOT errors; they warn
///   and extrapolate
#[derive(Debug, Error)]
pub enum CorrError {
    /// A name outside the closed intensity-measure set.
    #[error("Unknown intensity measure: {0}")]
    UnknownIm(String),

    /// A pair string without an `IMi-IMj` separator.
    #[error("Malformed IM pair: {0}")]
    MalformedPair(String),

    /// Neither orientation of the pair exists in the target dataset.
    #[error("Unsupported IM pair for this dataset: {0}")]
    UnsupportedPair(String),

    /// A model references an activation function not in the library.
    #[error("Unknown activation function: {0}")]
    UnknownActivation(String),

    /// A period-dependent lookup was called without the required period.
    #[error("Missing period for period-dependent IM {0}")]
    MissingPeriod(Im),

    /// Stored data dimensions are inconsistent with the request.
    #[error("Shape mismatch: {0}")]
    ShapeMismatch(String),

    /// A configuration document failed structural validation at load.
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    /// An I/O error occurred while reading a document (app layer).
    #[error("I/O error: {0}")]
    Io(String),
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_roundtrip_all_ims() {
        let all = [
            Im::Fiv3,
            Im::SaAvg2,
            Im::SaAvg3,
            Im::Ds595,
            Im::Ds575,
            Im::Sa,
            Im::Pga,
            Im::Pgv,
        ];
        for im in all {
            assert_eq!(Im::from_name(im.name()).expect("roundtrip"), im);
        }
    }

    #[test]
    fn unknown_name_rejected() {
        let result = Im::from_name("CAV");
        assert!(matches!(result, Err(CorrError::UnknownIm(_))));
    }

    #[test]
    fn name_matching_is_exact() {
        assert!(Im::from_name("pga").is_err());
        assert!(Im::from_name("sa_avg2").is_err());
        assert!(Im::from_name(" SA").is_err());
    }

    #[test]
    fn spectral_classification() {
        assert!(Im::Sa.is_spectral());
        assert!(Im::SaAvg2.is_spectral());
        assert!(Im::SaAvg3.is_spectral());
        assert!(!Im::Pga.is_spectral());
        assert!(!Im::Ds595.is_spectral());
        assert!(!Im::Fiv3.is_spectral());
    }

    #[test]
    fn serde_uses_canonical_names() {
        let json = serde_json::to_string(&Im::SaAvg2).expect("serialize");
        assert_eq!(json, "\"Sa_avg2\"");

        let im: Im = serde_json::from_str("\"PGV\"").expect("deserialize");
        assert_eq!(im, Im::Pgv);
    }
}
