//! Shared domain types.
//!
//! Measurements are kept as the JSON numbers they were exported as, so that a
//! value spelled `148` in the export is written back as `148` (not `148.0`).

use std::fmt;
use std::path::PathBuf;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Deserializer};
use serde_json::{Number, Value};

/// Date pattern used by the export files (`07/15/24`).
pub const EXPORT_DATE_FORMAT: &str = "%m/%d/%y";

/// Canonical output pattern (`2024-07-15`).
pub const CANONICAL_DATE_FORMAT: &str = "%Y-%m-%d";

/// Default output file name, written next to the inputs.
pub const DEFAULT_OUTPUT_NAME: &str = "fitbit_weights.csv";

/// Calendar day used as the merge key.
///
/// Ordering is chronological, which is also the lexicographic order of the
/// rendered `YYYY-MM-DD` form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct NormalizedDate(NaiveDate);

impl NormalizedDate {
    /// Parse an export date (`MM/DD/YY`).
    ///
    /// Two-digit years follow the POSIX pivot: `69..=99` are 19xx and
    /// `00..=68` are 20xx.
    pub fn parse_export(raw: &str) -> Option<Self> {
        let date = NaiveDate::parse_from_str(raw, EXPORT_DATE_FORMAT).ok()?;
        // chrono pivots at 70, so 69 lands in 2069 instead of 1969.
        let date = if date.year() == 2069 {
            date.with_year(1969)?
        } else {
            date
        };
        Some(Self(date))
    }
}

impl fmt::Display for NormalizedDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(CANONICAL_DATE_FORMAT))
    }
}

/// A numeric measurement (weight, BMI or body fat) as exported.
///
/// `value()` is what the merge compares; `Display` renders the exported spelling.
#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    value: f64,
    raw: Number,
}

impl Reading {
    pub fn from_number(raw: Number) -> Option<Self> {
        let value = raw.as_f64().filter(|v| v.is_finite())?;
        Some(Self { value, raw })
    }

    #[cfg(test)]
    pub fn from_f64(value: f64) -> Option<Self> {
        let raw = Number::from_f64(value)?;
        Some(Self { value, raw })
    }

    pub fn value(&self) -> f64 {
        self.value
    }
}

impl From<i64> for Reading {
    fn from(value: i64) -> Self {
        Self {
            value: value as f64,
            raw: Number::from(value),
        }
    }
}

impl fmt::Display for Reading {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}

/// One entry of an export's record list, before date normalization.
///
/// Decoding is lenient per field: a value of the wrong JSON type is treated as
/// absent rather than rejecting the whole entry. Unknown fields are ignored.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawRecord {
    #[serde(default, deserialize_with = "non_empty_string")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "reading")]
    pub weight: Option<Reading>,
    #[serde(default, deserialize_with = "reading")]
    pub bmi: Option<Reading>,
    #[serde(default, deserialize_with = "reading")]
    pub fat: Option<Reading>,
}

fn non_empty_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) if !s.is_empty() => Some(s),
        _ => None,
    })
}

fn reading<'de, D>(deserializer: D) -> Result<Option<Reading>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::Number(n) => Reading::from_number(n),
        _ => None,
    })
}

/// The measurements retained for one calendar day.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DayRecord {
    pub weight: Option<Reading>,
    pub bmi: Option<Reading>,
    pub fat: Option<Reading>,
}

impl From<RawRecord> for DayRecord {
    fn from(raw: RawRecord) -> Self {
        Self {
            weight: raw.weight,
            bmi: raw.bmi,
            fat: raw.fat,
        }
    }
}

/// A record whose date has been normalized and is ready to merge.
#[derive(Debug, Clone, PartialEq)]
pub struct DatedRecord {
    pub date: NormalizedDate,
    pub day: DayRecord,
}

/// Resolved options for a single conversion run.
#[derive(Debug, Clone)]
pub struct ConvertConfig {
    /// Folder holding the export files; the output is written here too.
    pub folder: PathBuf,
    pub output_name: String,
}

impl ConvertConfig {
    pub fn new(folder: impl Into<PathBuf>) -> Self {
        Self {
            folder: folder.into(),
            output_name: DEFAULT_OUTPUT_NAME.to_string(),
        }
    }

    pub fn output_path(&self) -> PathBuf {
        self.folder.join(&self.output_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn export_date_normalizes_to_iso() {
        let d = NormalizedDate::parse_export("07/15/24").unwrap();
        assert_eq!(d.to_string(), "2024-07-15");
    }

    #[test]
    fn export_date_accepts_single_digit_month_and_day() {
        let d = NormalizedDate::parse_export("7/5/24").unwrap();
        assert_eq!(d.to_string(), "2024-07-05");
    }

    #[test]
    fn export_date_uses_posix_century_pivot() {
        assert_eq!(NormalizedDate::parse_export("01/01/68").unwrap().to_string(), "2068-01-01");
        assert_eq!(NormalizedDate::parse_export("01/01/69").unwrap().to_string(), "1969-01-01");
        assert_eq!(NormalizedDate::parse_export("12/31/99").unwrap().to_string(), "1999-12-31");
    }

    #[test]
    fn export_date_rejects_other_layouts() {
        assert!(NormalizedDate::parse_export("2024-07-15").is_none());
        assert!(NormalizedDate::parse_export("15/07/24").is_none());
        assert!(NormalizedDate::parse_export("02/30/24").is_none());
        assert!(NormalizedDate::parse_export("").is_none());
    }

    #[test]
    fn reading_keeps_export_spelling() {
        let whole: Value = serde_json::from_str("148").unwrap();
        let float: Value = serde_json::from_str("148.0").unwrap();
        let frac: Value = serde_json::from_str("148.5").unwrap();

        let render = |v: Value| match v {
            Value::Number(n) => Reading::from_number(n).unwrap().to_string(),
            _ => unreachable!(),
        };
        assert_eq!(render(whole), "148");
        assert_eq!(render(float), "148.0");
        assert_eq!(render(frac), "148.5");
    }

    #[test]
    fn reading_compares_by_value_across_spellings() {
        let int = Reading::from(150);
        let float = Reading::from_f64(149.5).unwrap();
        assert!(float.value() < int.value());
    }

    #[test]
    fn raw_record_treats_wrong_types_as_absent() {
        let raw: RawRecord = serde_json::from_str(
            r#"{"date": "07/15/24", "weight": "150", "bmi": null, "fat": 18, "logId": 1}"#,
        )
        .unwrap();
        assert_eq!(raw.date.as_deref(), Some("07/15/24"));
        assert!(raw.weight.is_none());
        assert!(raw.bmi.is_none());
        assert_eq!(raw.fat.unwrap().to_string(), "18");
    }

    #[test]
    fn raw_record_empty_or_non_string_date_is_absent() {
        let empty: RawRecord = serde_json::from_str(r#"{"date": "", "weight": 150}"#).unwrap();
        let number: RawRecord = serde_json::from_str(r#"{"date": 20240715}"#).unwrap();
        let missing: RawRecord = serde_json::from_str(r#"{"weight": 150}"#).unwrap();
        assert!(empty.date.is_none());
        assert!(number.date.is_none());
        assert!(missing.date.is_none());
    }

    #[test]
    fn output_path_joins_folder_and_name() {
        let config = ConvertConfig::new("/tmp/exports");
        assert_eq!(config.output_path(), PathBuf::from("/tmp/exports/fitbit_weights.csv"));
    }
}
