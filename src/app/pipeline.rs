//! The conversion pipeline, independent of argument parsing:
//! discover -> ingest -> merge -> write.

use std::path::PathBuf;

use tracing::debug;

use crate::domain::ConvertConfig;
use crate::error::AppError;
use crate::io::export::write_weights_csv;
use crate::io::ingest::{IngestedData, load_folder};
use crate::merge::{DayLog, merge};

/// Everything a single run produced.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub output_path: PathBuf,
    pub ingest: IngestedData,
    pub rows_written: usize,
}

/// Convert every export in `config.folder` into one CSV.
pub fn run_conversion(config: &ConvertConfig) -> Result<RunOutput, AppError> {
    let output_path = config.output_path();

    let mut ingest = load_folder(&config.folder, Some(output_path.as_path()))?;
    debug!(
        records = ingest.records.len(),
        folder = %config.folder.display(),
        "ingested exports"
    );

    let records = std::mem::take(&mut ingest.records);
    let log = merge(DayLog::new(), records);
    if log.is_empty() {
        debug!(folder = %config.folder.display(), "no dated records; writing header only");
    }

    write_weights_csv(&output_path, &log)?;

    Ok(RunOutput {
        output_path,
        ingest,
        rows_written: log.len(),
    })
}
