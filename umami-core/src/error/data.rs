//! Frame decoding and validation error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for decoding inbound frames and validating payloads.
///
/// A decode failure drops the offending frame after logging; it never tears
/// down the connection.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum DataError {
    /// The frame was not valid JSON or did not match the envelope shape.
    #[error("[Data] Decode error: {reason}")]
    Decode {
        /// Reason for the decode failure.
        reason: String,
    },

    /// A required field was absent.
    #[error("[Data] Missing field: {field}")]
    MissingField {
        /// Name of the missing field.
        field: String,
    },

    /// A field held an unusable value.
    #[error("[Data] Invalid value for {field}: {reason}")]
    InvalidValue {
        /// Name of the offending field.
        field: String,
        /// Reason the value was rejected.
        reason: String,
    },
}

impl DataError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        super::ErrorSeverity::Warning
    }

    /// Creates a decode error from any serde error.
    #[must_use]
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode {
            reason: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_error() {
        let error = DataError::decode("expected value at line 1");
        assert!(error.to_string().contains("expected value"));
        assert!(error.severity().is_recoverable());
    }

    #[test]
    fn test_missing_field_display() {
        let error = DataError::MissingField {
            field: "order_id".to_string(),
        };
        assert!(error.to_string().contains("order_id"));
    }

    #[test]
    fn test_serde_roundtrip() {
        let error = DataError::InvalidValue {
            field: "type".to_string(),
            reason: "empty".to_string(),
        };
        let json = serde_json::to_string(&error).unwrap();
        let parsed: DataError = serde_json::from_str(&json).unwrap();
        assert_eq!(error, parsed);
    }
}
