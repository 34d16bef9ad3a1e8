//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` and parses CLI arguments
//! - sets up logging
//! - runs the conversion pipeline
//! - prints the output path

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use crate::error::AppError;

pub mod pipeline;

/// Entry point for the `fitbit-weights` binary.
pub fn run() -> Result<(), AppError> {
    // Env-backed options (e.g. FITBIT_WEIGHTS_OUTPUT) may come from a .env file.
    dotenvy::dotenv().ok();
    let cli = Cli::parse();
    init_logging(cli.log_level());

    let config = cli.to_config();
    let run = pipeline::run_conversion(&config)?;

    info!(
        files_read = run.ingest.files_read,
        files_skipped = run.ingest.file_skips.len(),
        records_read = run.ingest.records_read,
        records_skipped = run.ingest.record_skips.len(),
        rows = run.rows_written,
        "conversion finished"
    );
    println!("Wrote {}", run.output_path.display());
    Ok(())
}

/// Logs go to stderr so stdout only carries the result line.
fn init_logging(default_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // Ignore a second initialisation (e.g. when embedded in another process).
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
