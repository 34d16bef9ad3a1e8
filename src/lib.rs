//! `fitbit-weights` library crate.
//!
//! Merges a folder of Fitbit body-measurement JSON exports into one CSV with a
//! single row per calendar day. The binary is a thin wrapper around this
//! library so the pipeline is testable without spawning processes.

pub mod app;
pub mod cli;
pub mod domain;
pub mod error;
pub mod io;
pub mod merge;
