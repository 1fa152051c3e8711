//! # IM/Pair Registry
//!
//! Membership checks against the closed IM and pair sets, and pair
//! orientation resolution.
//!
//! - Validate names before any dataset access
//! - Resolution is a pure function: it returns a new `Resolution` value
//!   and never touches caller bindings
//! - Orientation is a per-dataset property; the same pair may be stored
//!   as `"A-B"` in one document and `"B-A"` in the other

use crate::primitives::{LOG_INPUT_PAIRS, PAIR_SEPARATOR, SUPPORTED_PAIRS};
use crate::{CorrError, Im};

/// The closed set of supported intensity measures.
pub const SUPPORTED_IMS: [Im; 8] = [
    Im::Fiv3,
    Im::SaAvg2,
    Im::SaAvg3,
    Im::Ds595,
    Im::Ds575,
    Im::Sa,
    Im::Pga,
    Im::Pgv,
];

/// Check whether a name denotes a supported intensity measure.
#[must_use]
pub fn is_supported_im(name: &str) -> bool {
    Im::from_name(name).is_ok()
}

/// The supported pair keys, in published orientation.
#[must_use]
pub fn supported_pairs() -> &'static [&'static str] {
    &SUPPORTED_PAIRS
}

/// Check whether a pair string denotes a supported pair.
///
/// Accepts either orientation: callers cannot know the stored orientation
/// of any given dataset, so `"FIV3-SA"` is as supported as `"SA-FIV3"`.
#[must_use]
pub fn is_supported_pair(pair: &str) -> bool {
    let Ok((imi, imj)) = parse_pair(pair) else {
        return false;
    };
    let forward = pair_key(imi, imj);
    let reversed = pair_key(imj, imi);
    SUPPORTED_PAIRS
        .iter()
        .any(|p| *p == forward || *p == reversed)
}

/// Split a pair string on the first separator and parse both IM names.
pub fn parse_pair(pair: &str) -> Result<(Im, Im), CorrError> {
    let (left, right) = pair
        .split_once(PAIR_SEPARATOR)
        .ok_or_else(|| CorrError::MalformedPair(pair.to_string()))?;
    Ok((Im::from_name(left)?, Im::from_name(right)?))
}

/// Build the dataset key for an ordered IM pair.
#[must_use]
pub fn pair_key(imi: Im, imj: Im) -> String {
    format!("{}{}{}", imi.name(), PAIR_SEPARATOR, imj.name())
}

/// Whether a pair's ANN model takes natural-log period input.
///
/// Checked in either orientation against the compiled subset.
#[must_use]
pub fn is_log_input_pair(imi: Im, imj: Im) -> bool {
    let forward = pair_key(imi, imj);
    let reversed = pair_key(imj, imi);
    LOG_INPUT_PAIRS
        .iter()
        .any(|p| *p == forward || *p == reversed)
}

// =============================================================================
// ORIENTATION RESOLUTION
// =============================================================================

/// The outcome of resolving a requested pair against a dataset's keys.
///
/// `imi`/`imj` are in STORED order; `swapped` records whether the request
/// had to be reversed, so the caller can exchange its period arguments
/// via `order_periods`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Resolution {
    /// First IM of the stored orientation.
    pub imi: Im,
    /// Second IM of the stored orientation.
    pub imj: Im,
    /// Whether the requested orientation was reversed to match storage.
    pub swapped: bool,
}

impl Resolution {
    /// The stored dataset key for this pair.
    #[must_use]
    pub fn key(&self) -> String {
        pair_key(self.imi, self.imj)
    }

    /// Return the period arguments in stored order, as a new tuple.
    ///
    /// Presence travels with the IM: when the orientation was reversed,
    /// the two option slots are exchanged wholesale, so a supplied `0.0`
    /// is preserved exactly like any other value.
    #[must_use]
    pub fn order_periods(
        &self,
        period1: Option<f64>,
        period2: Option<f64>,
    ) -> (Option<f64>, Option<f64>) {
        if self.swapped {
            (period2, period1)
        } else {
            (period1, period2)
        }
    }
}

/// Resolve a requested pair against a dataset's key set.
///
/// Tries the requested orientation first, then the reverse. The `has_key`
/// predicate abstracts over the dataset (surfaces and models key their
/// maps independently and may disagree on orientation).
///
/// Returns `CorrError::UnsupportedPair` when neither orientation exists:
/// the pair is unsupported for that dataset.
pub fn resolve_pair(
    pair: &str,
    has_key: impl Fn(&str) -> bool,
) -> Result<Resolution, CorrError> {
    let (imi, imj) = parse_pair(pair)?;

    if has_key(&pair_key(imi, imj)) {
        return Ok(Resolution {
            imi,
            imj,
            swapped: false,
        });
    }

    if has_key(&pair_key(imj, imi)) {
        return Ok(Resolution {
            imi: imj,
            imj: imi,
            swapped: true,
        });
    }

    Err(CorrError::UnsupportedPair(pair.to_string()))
}

// =============================================================================
// TESTS
// =============================================================================
