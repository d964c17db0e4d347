//! Error types and handling framework.
//!
//! This module provides a hierarchical error type system with
//! domain-specific error categories for the Umami realtime client.
//!
//! # Error Hierarchy
//!
//! - `UmamiError` - Top-level error type
//!   - `NetworkError` - Transport and connection errors
//!   - `ApiError` - REST API errors
//!   - `DataError` - Frame decoding and validation errors
//!   - `ConfigError` - Configuration errors
//!
//! Nothing in the realtime subsystem propagates an error past its own
//! boundary uncaught: operations return `Result` values and the callers
//! decide whether to log, retry, or degrade.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Error severity levels for categorizing errors.
///
/// Severity levels help determine the appropriate response to an error:
/// - `Fatal`: Unrecoverable errors that require operator attention
/// - `Recoverable`: Errors that can be retried or recovered from
/// - `Warning`: Non-critical issues that should be logged
/// - `Info`: Informational messages about expected conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ErrorSeverity {
    /// Unrecoverable error requiring operator attention.
    Fatal,

    /// Error that can potentially be recovered from through retry or fallback.
    #[default]
    Recoverable,

    /// Non-critical issue that should be logged but doesn't prevent operation.
    Warning,

    /// Informational message about an expected or handled condition.
    Info,
}

impl ErrorSeverity {
    /// Returns true if this error is recoverable (not fatal).
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        !matches!(self, Self::Fatal)
    }

    /// Returns true if this error is fatal (unrecoverable).
    #[must_use]
    pub const fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal)
    }

    /// Returns the severity as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Fatal => "FATAL",
            Self::Recoverable => "RECOVERABLE",
            Self::Warning => "WARNING",
            Self::Info => "INFO",
        }
    }
}

impl fmt::Display for ErrorSeverity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

mod api;
mod config;
mod data;
mod network;

pub use api::ApiError;
pub use config::ConfigError;
pub use data::DataError;
pub use network::NetworkError;

/// Top-level error type for the Umami realtime client.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum UmamiError {
    /// Transport or connection error.
    #[error("{0}")]
    Network(#[from] NetworkError),

    /// REST API error.
    #[error("{0}")]
    Api(#[from] ApiError),

    /// Frame decoding or validation error.
    #[error("{0}")]
    Data(#[from] DataError),

    /// Configuration error.
    #[error("{0}")]
    Config(#[from] ConfigError),
}

impl UmamiError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            Self::Network(e) => e.severity(),
            Self::Api(e) => e.severity(),
            Self::Data(e) => e.severity(),
            Self::Config(e) => e.severity(),
        }
    }

    /// Returns true if this error is recoverable.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        self.severity().is_recoverable()
    }

    /// Returns the error category as a string.
    #[must_use]
    pub fn category(&self) -> &'static str {
        match self {
            Self::Network(_) => "network",
            Self::Api(_) => "api",
            Self::Data(_) => "data",
            Self::Config(_) => "config",
        }
    }

    /// Returns the inner network error, if this is a network error.
    #[must_use]
    pub fn as_network_error(&self) -> Option<&NetworkError> {
        match self {
            Self::Network(e) => Some(e),
            _ => None,
        }
    }

    /// Returns the inner API error, if this is an API error.
    #[must_use]
    pub fn as_api_error(&self) -> Option<&ApiError> {
        match self {
            Self::Api(e) => Some(e),
            _ => None,
        }
    }
}

/// A specialized Result type for Umami operations.
pub type Result<T> = std::result::Result<T, UmamiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_severity_display() {
        assert_eq!(ErrorSeverity::Fatal.to_string(), "FATAL");
        assert_eq!(ErrorSeverity::Recoverable.to_string(), "RECOVERABLE");
    }

    #[test]
    fn test_error_severity_is_recoverable() {
        assert!(!ErrorSeverity::Fatal.is_recoverable());
        assert!(ErrorSeverity::Recoverable.is_recoverable());
        assert!(ErrorSeverity::Warning.is_recoverable());
        assert!(ErrorSeverity::Info.is_recoverable());
    }

    #[test]
    fn test_network_error_conversion() {
        let network_err = NetworkError::Timeout { timeout_ms: 5000 };
        let err: UmamiError = network_err.clone().into();
        assert_eq!(err.category(), "network");
        assert_eq!(err.as_network_error(), Some(&network_err));
        assert!(err.as_api_error().is_none());
    }

    #[test]
    fn test_api_error_conversion() {
        let api_err = ApiError::Unauthorized;
        let err: UmamiError = api_err.clone().into();
        assert_eq!(err.category(), "api");
        assert_eq!(err.as_api_error(), Some(&api_err));
    }

    #[test]
    fn test_is_recoverable_delegates() {
        let recoverable = UmamiError::Network(NetworkError::Timeout { timeout_ms: 5000 });
        assert!(recoverable.is_recoverable());

        let fatal = UmamiError::Network(NetworkError::Tls {
            reason: "certificate expired".to_string(),
        });
        assert!(!fatal.is_recoverable());
    }

    #[test]
    fn test_serde_roundtrip() {
        let err = UmamiError::Network(NetworkError::Timeout { timeout_ms: 3000 });
        let json = serde_json::to_string(&err).unwrap();
        let parsed: UmamiError = serde_json::from_str(&json).unwrap();
        assert_eq!(err, parsed);
    }
}
