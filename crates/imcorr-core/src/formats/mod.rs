//! # Document Formats
//!
//! Parsing and validation of the two static configuration documents.
//!
//! File I/O operations are in the app layer; everything here is a pure
//! transformation from already-read text/values into immutable dataset
//! values.

mod documents;

pub use documents::{
    models_from_json, models_from_value, surfaces_from_json, surfaces_from_value,
};
