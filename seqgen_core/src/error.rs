//! Error types for the seqgen_core library.

use crate::SequenceKey;
use std::io;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for seqgen_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// YAML parsing error
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A generator or batch parameter is out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// Tabular export requires every sequence to have the same length
    #[error("Sequence {key} has {found} entries, expected {expected}")]
    HeterogeneousLength {
        key: SequenceKey,
        expected: usize,
        found: usize,
    },
}
