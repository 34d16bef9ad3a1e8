use std::fs;
use std::path::Path;

use fitbit_weights::app::pipeline::run_conversion;
use fitbit_weights::domain::ConvertConfig;
use tempfile::TempDir;

pub fn create_test_dir() -> TempDir {
    tempfile::tempdir().expect("Should create temp dir")
}

pub fn write_export(dir: &Path, name: &str, body: &str) {
    fs::write(dir.join(name), body).expect("Should write export");
}

/// Run a conversion and return the CSV lines.
pub fn convert(dir: &Path) -> Vec<String> {
    let run = run_conversion(&ConvertConfig::new(dir)).expect("Should convert");
    fs::read_to_string(&run.output_path)
        .expect("Should read output")
        .lines()
        .map(str::to_string)
        .collect()
}
