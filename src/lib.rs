//! clade-counts - SARS-CoV-2 clade counts for variant nowcasting.
//!
//! This crate resolves an as-of date, counts Nextstrain sequence metadata by
//! clade, collection date and US state, and writes the result to Parquet.

#![warn(missing_docs)]

pub mod cli;
pub mod config;
pub mod constants;
pub mod error;
pub mod metadata;
pub mod output;
pub mod pipeline;
pub mod source;
pub mod utils;

use chrono::Utc;
use clap::Parser;
use cli::Cli;
use config::{Config, load_default_config, validate_config};
use constants::DEFAULT_LOG_FILTER;
use pipeline::JobOptions;
use source::NextstrainSource;
use tracing::info;

pub use error::{Error, Result};

/// Main entry point for the clade-counts CLI.
pub fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging();

    // Current time is captured once so every check in this run agrees on "today".
    let now = Utc::now();

    // Load configuration
    let config = load_default_config()?;
    validate_config(&config)?;

    // Building the source makes no requests; a future date still fails
    // before any context is created.
    let source = NextstrainSource::new(&config.source)?;
    let result = pipeline::run_job(&source, cli.as_of, now, &job_options(&config))?;

    info!(
        rows = result.rows,
        sequences = result.sequences,
        path = %result.output_path.display(),
        "Complete"
    );

    Ok(())
}

fn job_options(config: &Config) -> JobOptions {
    JobOptions {
        data_dir: config.output.data_dir.clone(),
        collect_mode: config.collect.mode(),
    }
}

fn init_logging() {
    use tracing_subscriber::{EnvFilter, fmt};

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_LOG_FILTER));

    fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stdout)
        .init();
}
