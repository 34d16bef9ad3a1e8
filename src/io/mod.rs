//! Input/output helpers.
//!
//! - export discovery + shape/record decoding (`ingest`)
//! - merged CSV output (`export`)

pub mod export;
pub mod ingest;

pub use export::*;
pub use ingest::*;
