//! # Activation Library
//!
//! Activation functions for the ANN correlation models.
//!
//! The set is a closed enumeration: model documents select activations by
//! name at load time, and call sites only ever hold the enum. Adding a
//! kind means adding a variant here; no call site changes.
//!
//! All functions are pure and stateless.

use ndarray::Array1;

use crate::CorrError;

/// An activation function kind.
///
/// | Kind | Definition |
/// |---------|------------------------------------------|
/// | linear | `x` |
/// | tanh | hyperbolic tangent, elementwise |
/// | sigmoid | `1 / (1 + e^-x)`, elementwise |
/// | softmax | probability simplex over the vector |
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Activation {
    /// Identity.
    Linear,
    /// Hyperbolic tangent; bounds output to (-1, 1).
    Tanh,
    /// Logistic sigmoid; bounds output to (0, 1).
    Sigmoid,
    /// Softmax over the whole vector.
    Softmax,
}

impl Activation {
    /// Resolve an activation name from a model document.
    ///
    /// This is the only place a name string is interpreted. An unknown
    /// name means malformed model data and fails the load.
    pub fn from_name(name: &str) -> Result<Self, CorrError> {
        match name {
            "linear" => Ok(Self::Linear),
            "tanh" => Ok(Self::Tanh),
            "sigmoid" => Ok(Self::Sigmoid),
            "softmax" => Ok(Self::Softmax),
            other => Err(CorrError::UnknownActivation(other.to_string())),
        }
    }

    /// Canonical name, as used in model documents.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Linear => "linear",
            Self::Tanh => "tanh",
            Self::Sigmoid => "sigmoid",
            Self::Softmax => "softmax",
        }
    }

    /// Apply the activation to a layer output vector.
    #[must_use]
    pub fn apply(self, z: Array1<f64>) -> Array1<f64> {
        match self {
            Self::Linear => z,
            Self::Tanh => z.mapv(f64::tanh),
            Self::Sigmoid => z.mapv(|x| 1.0 / (1.0 + (-x).exp())),
            Self::Softmax => softmax(z),
        }
    }
}

/// Softmax with the max-subtraction trick.
///
/// Subtracting the vector maximum before exponentiating keeps `exp` from
/// overflowing for large inputs; the normalization is unchanged.
fn softmax(z: Array1<f64>) -> Array1<f64> {
    let max = z.fold(f64::NEG_INFINITY, |acc, &x| acc.max(x));
    let exp = z.mapv(|x| (x - max).exp());
    let sum = exp.sum();
    exp / sum
}

// =============================================================================
// TESTS
// =============================================================================
