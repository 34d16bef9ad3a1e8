//! Export discovery and decoding.
//!
//! This module turns a folder of JSON exports into a flat list of
//! `DatedRecord`s ready to merge.
//!
//! Design goals:
//! - **Fail closed on shape**: a file is either a record list or a wrapper
//!   object with a known list key; anything else is skipped
//! - **Record-level leniency** (skip bad entries, but report what happened)
//! - **Deterministic order**: files are read in file-name order
//! - **Separation of concerns**: no merge logic here

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use tracing::debug;
use walkdir::WalkDir;

use crate::domain::{DatedRecord, DayRecord, NormalizedDate, RawRecord};
use crate::error::AppError;

/// Extension matched by input discovery (case-sensitive).
pub const EXPORT_EXTENSION: &str = "json";

/// Keys probed, in priority order, when an export wraps its list in an object.
pub const WRAPPER_KEYS: [&str; 4] = ["weight", "weights", "data", "items"];

/// Why an export file or a single entry was skipped.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkipReason {
    #[error("invalid JSON: {0}")]
    InvalidJson(String),
    #[error("unrecognized top-level shape: {0}")]
    UnrecognizedShape(&'static str),
    #[error("entry is not an object")]
    NotAnObject,
    #[error("missing `date`")]
    MissingDate,
    #[error("invalid date '{0}' (expected MM/DD/YY)")]
    InvalidDate(String),
}

/// Outcome of reading one export file that did not produce records.
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("failed to read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error(transparent)]
    Skip(#[from] SkipReason),
}

/// Accepted top-level shapes of an export file.
#[derive(Debug, Clone, PartialEq)]
pub enum ExportShape {
    /// `[ {...}, {...} ]`
    Records(Vec<Value>),
    /// `{ "<key>": [ {...}, ... ] }` with `key` one of `WRAPPER_KEYS`.
    Wrapped { key: &'static str, records: Vec<Value> },
}

impl ExportShape {
    pub fn decode(value: Value) -> Result<Self, SkipReason> {
        match value {
            Value::Array(records) => Ok(Self::Records(records)),
            Value::Object(map) => Self::unwrap_object(map),
            Value::Null => Err(SkipReason::UnrecognizedShape("null")),
            Value::Bool(_) => Err(SkipReason::UnrecognizedShape("boolean")),
            Value::Number(_) => Err(SkipReason::UnrecognizedShape("number")),
            Value::String(_) => Err(SkipReason::UnrecognizedShape("string")),
        }
    }

    // A key that is present but not a list does not stop the probe.
    fn unwrap_object(mut map: Map<String, Value>) -> Result<Self, SkipReason> {
        for key in WRAPPER_KEYS {
            if let Some(Value::Array(records)) = map.remove(key) {
                return Ok(Self::Wrapped { key, records });
            }
        }
        Err(SkipReason::UnrecognizedShape("object without a record list"))
    }

    /// The wrapper key the records were found under, if any.
    pub fn wrapper_key(&self) -> Option<&'static str> {
        match self {
            Self::Records(_) => None,
            Self::Wrapped { key, .. } => Some(*key),
        }
    }

    pub fn into_records(self) -> Vec<Value> {
        match self {
            Self::Records(records) | Self::Wrapped { records, .. } => records,
        }
    }
}

/// A skipped export file.
#[derive(Debug, Clone)]
pub struct FileSkip {
    pub path: PathBuf,
    pub reason: SkipReason,
}

/// A skipped entry inside an otherwise readable export.
#[derive(Debug, Clone)]
pub struct RecordSkip {
    pub path: PathBuf,
    /// Zero-based position in the file's record list.
    pub index: usize,
    pub reason: SkipReason,
}

/// Ingest output: dated records in input order + what was skipped.
#[derive(Debug, Clone, Default)]
pub struct IngestedData {
    pub records: Vec<DatedRecord>,
    pub files_read: usize,
    pub file_skips: Vec<FileSkip>,
    pub records_read: usize,
    pub record_skips: Vec<RecordSkip>,
}

/// List the export files directly inside `folder`, sorted by file name.
///
/// `exclude` (typically the output file) is never returned.
pub fn discover_exports(folder: &Path, exclude: Option<&Path>) -> Result<Vec<PathBuf>, AppError> {
    let walker = WalkDir::new(folder)
        .min_depth(1)
        .max_depth(1)
        .follow_links(true)
        .sort_by_file_name();

    let mut paths = Vec::new();
    for entry in walker {
        let entry = entry.map_err(|e| AppError::input(folder, e))?;

        if !entry.file_type().is_file() || !is_export_name(entry.file_name().to_str()) {
            continue;
        }
        if exclude.is_some_and(|ex| ex == entry.path()) {
            continue;
        }
        paths.push(entry.into_path());
    }
    Ok(paths)
}

fn is_export_name(name: Option<&str>) -> bool {
    let Some(name) = name else { return false };
    if name.starts_with('.') {
        return false;
    }
    Path::new(name)
        .extension()
        .is_some_and(|ext| ext == EXPORT_EXTENSION)
}

/// Read and shape-decode one export file.
pub fn read_export(path: &Path) -> Result<ExportShape, ExportError> {
    let file = File::open(path).map_err(|source| ExportError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let value: Value = serde_json::from_reader(BufReader::new(file)).map_err(|e| {
        if e.is_io() {
            ExportError::Io {
                path: path.to_path_buf(),
                source: e.into(),
            }
        } else {
            ExportError::Skip(SkipReason::InvalidJson(e.to_string()))
        }
    })?;

    Ok(ExportShape::decode(value)?)
}

/// Decode one list entry into a dated record.
pub fn decode_record(value: Value) -> Result<DatedRecord, SkipReason> {
    // Checked up front: serde would otherwise accept a positional array.
    if !value.is_object() {
        return Err(SkipReason::NotAnObject);
    }
    let raw: RawRecord = serde_json::from_value(value).map_err(|_| SkipReason::NotAnObject)?;

    let date_raw = raw.date.as_deref().ok_or(SkipReason::MissingDate)?;
    let date = NormalizedDate::parse_export(date_raw)
        .ok_or_else(|| SkipReason::InvalidDate(date_raw.to_string()))?;

    Ok(DatedRecord {
        date,
        day: DayRecord::from(raw),
    })
}

/// Discover, read and decode every export in `folder`.
///
/// Unreadable JSON and unexpected shapes skip the file; bad entries skip the
/// entry. Only filesystem failures are returned as errors.
pub fn load_folder(folder: &Path, exclude: Option<&Path>) -> Result<IngestedData, AppError> {
    let mut data = IngestedData::default();

    for path in discover_exports(folder, exclude)? {
        let shape = match read_export(&path) {
            Ok(shape) => shape,
            Err(ExportError::Skip(reason)) => {
                debug!(path = %path.display(), %reason, "skipping export file");
                data.file_skips.push(FileSkip { path, reason });
                continue;
            }
            Err(ExportError::Io { path, source }) => return Err(AppError::input(&path, source)),
        };

        data.files_read += 1;
        let mut used = 0usize;
        let wrapper = shape.wrapper_key().unwrap_or("-");
        let entries = shape.into_records();
        let total = entries.len();

        for (index, value) in entries.into_iter().enumerate() {
            data.records_read += 1;
            match decode_record(value) {
                Ok(record) => {
                    data.records.push(record);
                    used += 1;
                }
                Err(reason) => {
                    debug!(path = %path.display(), index, %reason, "skipping entry");
                    data.record_skips.push(RecordSkip {
                        path: path.clone(),
                        index,
                        reason,
                    });
                }
            }
        }

        debug!(path = %path.display(), wrapper, total, used, "read export file");
    }

    Ok(data)
}
