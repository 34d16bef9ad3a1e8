//! Write the merged day log to CSV.
//!
//! The export is meant to be easy to consume in spreadsheets: one row per day,
//! oldest first, absent measurements left as empty cells.

use std::fs::File;
use std::io::Write;
use std::path::Path;

use crate::domain::Reading;
use crate::error::AppError;
use crate::merge::DayLog;

/// Fixed header row.
pub const HEADER: [&str; 4] = ["date", "lbs", "bmi", "fat"];

/// Write `log` as CSV to `path`, replacing any existing file.
pub fn write_weights_csv(path: &Path, log: &DayLog) -> Result<(), AppError> {
    let file = File::create(path).map_err(|e| AppError::output(path, e))?;
    write_weights(file, log).map_err(|e| AppError::output(path, e))
}

/// Write `log` as CSV to any writer.
pub fn write_weights<W: Write>(writer: W, log: &DayLog) -> csv::Result<()> {
    let mut out = csv::WriterBuilder::new()
        .terminator(csv::Terminator::CRLF)
        .from_writer(writer);

    out.write_record(HEADER)?;
    for (date, day) in log.iter() {
        out.write_record([
            date.to_string(),
            cell(day.weight.as_ref()),
            cell(day.bmi.as_ref()),
            cell(day.fat.as_ref()),
        ])?;
    }
    out.flush()?;
    Ok(())
}

fn cell(reading: Option<&Reading>) -> String {
    reading.map(Reading::to_string).unwrap_or_default()
}
