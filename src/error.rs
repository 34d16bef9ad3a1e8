use std::fmt;
use std::path::Path;

/// Exit code for an unreadable input folder or input file.
pub const EXIT_INPUT: u8 = 2;
/// Exit code for an output file that cannot be created or written.
pub const EXIT_OUTPUT: u8 = 4;

/// Error that terminates a run, carrying the process exit code.
///
/// Recoverable conditions (bad JSON, odd shapes, bad entries) never become an
/// `AppError`; see `io::ingest::SkipReason`.
#[derive(Clone)]
pub struct AppError {
    exit_code: u8,
    message: String,
}

impl AppError {
    pub fn new(exit_code: u8, message: impl Into<String>) -> Self {
        Self {
            exit_code,
            message: message.into(),
        }
    }

    pub fn input(path: &Path, err: impl fmt::Display) -> Self {
        Self::new(EXIT_INPUT, format!("Failed to read '{}': {err}", path.display()))
    }

    pub fn output(path: &Path, err: impl fmt::Display) -> Self {
        Self::new(EXIT_OUTPUT, format!("Failed to write '{}': {err}", path.display()))
    }

    pub fn exit_code(&self) -> u8 {
        self.exit_code
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl fmt::Debug for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppError")
            .field("exit_code", &self.exit_code)
            .field("message", &self.message)
            .finish()
    }
}

impl std::error::Error for AppError {}
