#![forbid(unsafe_code)]

//! Core library for generating self-summing (generalized Fibonacci)
//! sequences.
//!
//! This crate provides:
//! - Value types (sequence keys, sequences, collections)
//! - The sequence generator and batch driver
//! - Configuration and batch input documents
//! - Exporters (plain text, CSV, structured store)

pub mod types;
pub mod error;
pub mod sequence;
pub mod driver;
pub mod config;
pub mod logging;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use sequence::{calc_sequence, calc_sequence_with, DiagnosticSink, NullSink, TracingSink};
pub use driver::{build_collection, build_collection_range, build_collection_with, BatchRequest};
pub use config::{BatchDocument, Config};
pub use export::{export_collection, Exporter, OutputFormat};
