//! # imcorr CLI Module
//!
//! This module implements the CLI interface for imcorr.
//!
//! ## Available Commands
//!
//! - `ims` - List the supported intensity measures
//! - `pairs` - List the supported IM pairs
//! - `grid` - Grid-engine correlation for a pair
//! - `ann` - ANN-engine correlation for a pair

mod commands;

use clap::{Parser, Subcommand};
use imcorr_core::CorrError;
use std::path::PathBuf;

pub use commands::*;

// =============================================================================
// CLI STRUCTURE
// =============================================================================

/// imcorr - Intensity-Measure Correlation
///
/// Pairwise correlation coefficients between seismic intensity measures,
/// from precomputed grid surfaces or pre-trained ANN models.
#[derive(Parser, Debug)]
#[command(name = "imcorr")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress banner output
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Path to the grid correlation document
    #[arg(short = 'G', long, global = true, default_value = "correlation_surfaces.json")]
    pub grid: PathBuf,

    /// Path to the ANN model document
    #[arg(short = 'M', long, global = true, default_value = "correlation_models.json")]
    pub models: PathBuf,

    /// Output in JSON format (for programmatic access)
    #[arg(long, global = true)]
    pub json_mode: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available CLI commands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// List the supported intensity measures
    Ims,

    /// List the supported IM pairs
    Pairs,

    /// Grid-engine correlation for a pair
    Grid {
        /// IM pair, e.g. "SA-FIV3"
        #[arg(short, long)]
        pair: String,

        /// Period of the first IM, in seconds
        #[arg(long)]
        period1: Option<f64>,

        /// Period of the second IM, in seconds
        #[arg(long)]
        period2: Option<f64>,
    },

    /// ANN-engine correlation for a pair
    Ann {
        /// IM pair, e.g. "Sa_avg2-Ds575"
        #[arg(short, long)]
        pair: String,

        /// Period of the first IM, in seconds
        #[arg(long)]
        period1: Option<f64>,

        /// Period of the second IM, in seconds
        #[arg(long)]
        period2: Option<f64>,
    },
}

// =============================================================================
// COMMAND EXECUTION
// =============================================================================

/// Execute the CLI with parsed arguments.
pub fn execute(cli: Cli) -> Result<(), CorrError> {
    let json_mode = cli.json_mode;

    match cli.command {
        Some(Commands::Ims) => cmd_ims(json_mode),
        Some(Commands::Pairs) => cmd_pairs(json_mode),
        Some(Commands::Grid {
            pair,
            period1,
            period2,
        }) => cmd_grid(&cli.grid, json_mode, &pair, period1, period2),
        Some(Commands::Ann {
            pair,
            period1,
            period2,
        }) => cmd_ann(&cli.models, json_mode, &pair, period1, period2),
        None => {
            // No subcommand - list the supported pairs by default
            cmd_pairs(json_mode)
        }
    }
}
