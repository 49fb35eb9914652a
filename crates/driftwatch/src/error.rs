//! Error types for the Driftwatch library.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for Driftwatch operations.
#[derive(Debug, Error)]
pub enum DriftwatchError {
    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Error from the CSV library.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// File format not supported by the loader.
    #[error("Unsupported format: {0}")]
    UnsupportedFormat(String),

    /// Profiling invoked with zero records.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// Anomaly detection invoked with an unrecognized method name.
    #[error("Invalid anomaly method: {0} (expected \"iqr\" or \"zscore\")")]
    InvalidMethod(String),

    /// Baseline profile cannot be reconciled with the current dataset.
    #[error("Incompatible baseline: {0}")]
    IncompatibleBaseline(String),
}

/// Result type alias for Driftwatch operations.
pub type Result<T> = std::result::Result<T, DriftwatchError>;
