//! Core error types for devdocket-core.
//!
//! Every failure in the core degrades to a visible notice or a silent no-op;
//! nothing here is fatal. Validation and not-found errors are recovered by the
//! shell, storage parse errors are recovered inside the store itself.

use std::path::PathBuf;
use thiserror::Error;

use crate::records::RecordId;

/// Core error type for devdocket-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// A required field was missing or malformed. No mutation was performed.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// An operation referenced an id that is not in the list.
    #[error("No record with id {id} in '{namespace}'")]
    NotFound { namespace: &'static str, id: RecordId },

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),
}

/// Validation errors raised before any record mutation.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty or absent.
    #[error("{field} is required")]
    MissingField { field: &'static str },

    /// A text field exceeded its character limit.
    #[error("{field} exceeds {limit} characters ({len})")]
    TooLong {
        field: &'static str,
        limit: usize,
        len: usize,
    },

    /// A value could not be parsed into the field's type.
    #[error("Invalid value for '{field}': {message}")]
    InvalidValue { field: &'static str, message: String },
}

impl ValidationError {
    /// Name of the offending field.
    pub fn field(&self) -> &'static str {
        match self {
            ValidationError::MissingField { field }
            | ValidationError::TooLong { field, .. }
            | ValidationError::InvalidValue { field, .. } => field,
        }
    }
}

/// Storage-specific errors.
#[derive(Error, Debug)]
pub enum StorageError {
    /// Failed to open database connection
    #[error("Failed to open database at {path}: {source}")]
    OpenFailed {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// Query execution failed
    #[error("Query failed: {0}")]
    Database(#[from] rusqlite::Error),

    /// A stored blob could not be decoded.
    #[error("Corrupt data in namespace '{namespace}': {source}")]
    Parse {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },

    /// A list could not be encoded.
    #[error("Failed to serialize namespace '{namespace}': {source}")]
    Serialize {
        namespace: String,
        #[source]
        source: serde_json::Error,
    },

    /// The data directory could not be located or created.
    #[error("Failed to access data directory: {0}")]
    DataDir(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Key does not exist in the configuration tree
    #[error("unknown config key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validation_error_names_the_field() {
        let err = ValidationError::MissingField { field: "name" };
        assert_eq!(err.field(), "name");
        assert_eq!(err.to_string(), "name is required");
    }

    #[test]
    fn not_found_mentions_namespace_and_id() {
        let err = CoreError::NotFound {
            namespace: "devdocket_tech_plans",
            id: RecordId(42),
        };
        let msg = err.to_string();
        assert!(msg.contains("devdocket_tech_plans"));
        assert!(msg.contains("42"));
    }
}
