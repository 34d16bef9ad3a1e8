//! Command-line parsing for the export merger.
//!
//! The goal of this module is to keep **argument parsing** separate from the
//! ingest/merge code; `app` turns a `Cli` into a `ConvertConfig`.

use std::path::PathBuf;

use clap::{ArgAction, Parser};

use crate::domain::{ConvertConfig, DEFAULT_OUTPUT_NAME};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(
    name = "fitbit-weights",
    version,
    about = "Merge Fitbit body-measurement JSON exports into one CSV (one row per day)"
)]
pub struct Cli {
    /// Folder containing the `*.json` exports. The CSV is written here too.
    #[arg(value_name = "FOLDER", default_value = ".")]
    pub folder: PathBuf,

    /// File name of the CSV written into FOLDER.
    #[arg(
        short,
        long,
        value_name = "NAME",
        env = "FITBIT_WEIGHTS_OUTPUT",
        default_value = DEFAULT_OUTPUT_NAME
    )]
    pub output: String,

    /// Log skipped files and entries to stderr (-v: summary, -vv: every skip).
    ///
    /// `RUST_LOG` takes precedence when set.
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Cli {
    pub fn log_level(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    pub fn to_config(&self) -> ConvertConfig {
        ConvertConfig {
            folder: self.folder.clone(),
            output_name: self.output.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folder_defaults_to_current_directory() {
        let cli = Cli::try_parse_from(["fitbit-weights"]).unwrap();
        assert_eq!(cli.folder, PathBuf::from("."));
        assert_eq!(cli.log_level(), "warn");
    }

    #[test]
    fn positional_folder_and_flags() {
        let cli =
            Cli::try_parse_from(["fitbit-weights", "exports", "-o", "out.csv", "-vv"]).unwrap();
        let config = cli.to_config();
        assert_eq!(config.output_path(), PathBuf::from("exports/out.csv"));
        assert_eq!(cli.log_level(), "debug");
    }

    #[test]
    fn output_name_comes_from_dotenv_file() {
        // The only test in this crate that touches FITBIT_WEIGHTS_OUTPUT.
        let dir = tempfile::tempdir().unwrap();
        let env_file = dir.path().join(".env");
        std::fs::write(&env_file, "FITBIT_WEIGHTS_OUTPUT=from-env.csv\n").unwrap();

        unsafe { std::env::remove_var("FITBIT_WEIGHTS_OUTPUT") };
        dotenvy::from_path(&env_file).unwrap();
        let from_env = Cli::try_parse_from(["fitbit-weights", "exports"]);
        let flag_wins = Cli::try_parse_from(["fitbit-weights", "exports", "--output", "flag.csv"]);
        unsafe { std::env::remove_var("FITBIT_WEIGHTS_OUTPUT") };

        assert_eq!(from_env.unwrap().output, "from-env.csv");
        assert_eq!(flag_wins.unwrap().output, "flag.csv");
    }

    #[test]
    fn rejects_extra_positionals() {
        assert!(Cli::try_parse_from(["fitbit-weights", "a", "b"]).is_err());
    }
}
