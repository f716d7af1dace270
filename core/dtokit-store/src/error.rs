//! Error types for record files.

use std::path::PathBuf;

use thiserror::Error;

/// Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Errors that can occur while reading or writing record files.
#[derive(Debug, Error)]
pub enum StoreError {
    /// No file path was given.
    #[error("file path cannot be empty")]
    EmptyPath,

    /// The file to read does not exist.
    #[error("file does not exist: {}", .0.display())]
    Missing(PathBuf),

    /// There were no records to write.
    #[error("data cannot be empty")]
    EmptyData,

    /// The first record has no keys to build a header from.
    #[error("data cannot contain empty records")]
    EmptyRecord,

    /// The file or the records have the wrong shape.
    #[error("invalid data: {0}")]
    InvalidData(String),

    /// The file extension does not name a known format.
    #[error("unsupported record format: {0}")]
    UnsupportedFormat(String),

    /// IO error (file system).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// CSV reader or writer error.
    #[error("CSV error: {0}")]
    Csv(#[from] ::csv::Error),

    /// JSON error.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
