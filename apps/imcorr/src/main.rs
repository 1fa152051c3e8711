//! # imcorr - Intensity-Measure Correlation CLI
//!
//! The main binary for the imcorr correlation engines.
//!
//! This application provides:
//! - CLI interface over the two correlation engines
//! - Loading of the grid and ANN configuration documents
//! - Text and JSON output formatting
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────────────────────────────────────────────────┐
//! │                apps/imcorr (THE BINARY)               │
//! │                                                       │
//! │  ┌─────────────┐      ┌─────────────────────────┐    │
//! │  │   CLI       │      │  Document file loading  │    │
//! │  │  (clap)     │      │  (size + path checks)   │    │
//! │  └──────┬──────┘      └────────────┬────────────┘    │
//! │         │                          │                 │
//! │         └────────────┬─────────────┘                 │
//! │                      ▼                               │
//! │              ┌───────────────┐                       │
//! │              │  imcorr-core  │                       │
//! │              │  (THE LOGIC)  │                       │
//! │              └───────────────┘                       │
//! └───────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```bash
//! # List the supported IMs and pairs
//! imcorr ims
//! imcorr pairs
//!
//! # Grid-engine correlation
//! imcorr -G surfaces.json grid --pair SA-FIV3 --period1 1.0 --period2 0.5
//!
//! # ANN-engine correlation
//! imcorr -M models.json ann --pair Sa_avg2-Ds575 --period1 0.6
//! ```

use clap::Parser;
use imcorr::cli;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

// =============================================================================
// APPLICATION ENTRY POINT
// =============================================================================

fn main() {
    // Initialize tracing — IMCORR_LOG_FORMAT=json enables machine-parseable output.
    let log_format = std::env::var("IMCORR_LOG_FORMAT").unwrap_or_else(|_| "text".to_string());

    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "imcorr=warn".into());

    match log_format.as_str() {
        "json" => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer().json())
                .init();
        }
        _ => {
            tracing_subscriber::registry()
                .with(filter)
                .with(tracing_subscriber::fmt::layer())
                .init();
        }
    }

    // Parse CLI arguments
    let cli = cli::Cli::parse();

    // Display startup banner
    if !cli.quiet {
        print_banner();
    }

    // Execute command
    if let Err(e) = cli::execute(cli) {
        tracing::error!("Error: {}", e);
        std::process::exit(1);
    }
}

/// Print the imcorr startup banner.
fn print_banner() {
    println!(
        r#"
  ██╗███╗   ███╗ ██████╗ ██████╗ ██████╗ ██████╗
  ██║████╗ ████║██╔════╝██╔═══██╗██╔══██╗██╔══██╗
  ██║██╔████╔██║██║     ██║   ██║██████╔╝██████╔╝
  ██║██║╚██╔╝██║██║     ██║   ██║██╔══██╗██╔══██╗
  ██║██║ ╚═╝ ██║╚██████╗╚██████╔╝██║  ██║██║  ██║
  ╚═╝╚═╝     ╚═╝ ╚═════╝ ╚═════╝ ╚═╝  ╚═╝╚═╝  ╚═╝

  Intensity-Measure Correlation v{}

  Grid Interpolation • ANN Inference • Deterministic
"#,
        env!("CARGO_PKG_VERSION")
    );
}
