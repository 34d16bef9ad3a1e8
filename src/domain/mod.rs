//! Domain types used throughout the conversion.
//!
//! This module defines:
//!
//! - the canonical merge key (`NormalizedDate`)
//! - numeric measurements as they appear in exports (`Reading`)
//! - raw and merged per-day records (`RawRecord`, `DayRecord`, `DatedRecord`)
//! - the resolved run configuration (`ConvertConfig`)

pub mod types;

pub use types::*;
