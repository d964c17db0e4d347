//! Configuration error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for configuration loading and validation.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigError {
    /// The configuration file could not be read.
    #[error("[Config] Cannot read {path}: {reason}")]
    FileReadError {
        /// Path to the file.
        path: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The configuration file could not be written.
    #[error("[Config] Cannot write {path}: {reason}")]
    FileWriteError {
        /// Path to the file.
        path: String,
        /// Reason for the failure.
        reason: String,
    },

    /// The content could not be parsed in the detected format.
    #[error("[Config] Invalid format in {path}: {reason}")]
    InvalidFormat {
        /// Path to the file (or `<string>` for in-memory content).
        path: String,
        /// Reason for the parse failure.
        reason: String,
    },

    /// A required field was absent.
    #[error("[Config] Missing field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field held an unusable value.
    #[error("[Config] Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Reason the value was rejected.
        reason: String,
    },
}

impl ConfigError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        super::ErrorSeverity::Fatal
    }
}
