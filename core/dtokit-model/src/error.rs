//! Error types shared by every dtokit layer that touches a DTO.

use thiserror::Error;

/// Result type for DTO operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised while describing, hydrating, serializing or indexing DTOs.
///
/// `owner` is the type (or component) reporting the error, `operation` the
/// entry point that detected it.
#[derive(Debug, Error)]
pub enum Error {
    /// A value had the wrong shape (not a mapping, not a string, ...).
    #[error("{owner}.{operation}: must be set to {expected}")]
    TypeConstraint {
        owner: String,
        operation: &'static str,
        expected: &'static str,
    },

    /// A mapping or sequence that must carry data was empty.
    #[error("{owner}.{operation}: {what} cannot be empty")]
    EmptyInput {
        owner: String,
        operation: &'static str,
        what: &'static str,
    },

    /// A key or attribute is not a declared field of the target type.
    #[error("{owner} has no attribute {field}")]
    UnknownField { owner: String, field: String },

    /// A keyed lookup referenced a key that is not stored.
    #[error("{owner}: \"{key}\" not found")]
    NotFound { owner: String, key: String },

    /// A partial update did not name the index field it targets.
    #[error("{owner}: mapping has no value for index field {field}")]
    MissingKey { owner: String, field: String },

    /// A field setter rejected the value it was given.
    #[error("{owner}.{field}: {reason}")]
    InvalidValue {
        owner: String,
        field: String,
        reason: String,
    },

    /// A runtime schema declared the same field twice.
    #[error("{owner}: duplicate field {field}")]
    DuplicateField { owner: String, field: String },

    /// Wire text could not be encoded or decoded.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn unknown_field(owner: &str, field: &str) -> Self {
        Self::UnknownField {
            owner: owner.to_string(),
            field: field.to_string(),
        }
    }
}
