//! # imcorr application library
//!
//! CLI surface for the imcorr binary. The library target exists so the
//! command implementations are testable without spawning the binary.

pub mod cli;
