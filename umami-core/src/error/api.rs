//! REST API error types.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error type for REST API collaborators (notifications, orders, settings,
/// users).
///
/// Bridge code treats every variant as non-fatal: a failed lookup falls back
/// to a degraded-but-functional path (client-side counting, generic
/// navigation target) rather than surfacing an error state.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ApiError {
    /// The session token was rejected.
    #[error("[Api] Unauthorized")]
    Unauthorized,

    /// The requested resource does not exist.
    #[error("[Api] Not found: {resource}")]
    NotFound {
        /// Resource description (path or identifier).
        resource: String,
    },

    /// Any other non-success status.
    #[error("[Api] Request failed: status {status_code} - {reason}")]
    Status {
        /// HTTP status code.
        status_code: u16,
        /// Response body or reason phrase.
        reason: String,
    },

    /// The response body could not be decoded.
    #[error("[Api] Decode error: {reason}")]
    Decode {
        /// Reason for the decode failure.
        reason: String,
    },
}

impl ApiError {
    /// Returns the severity level of this error.
    #[must_use]
    pub fn severity(&self) -> super::ErrorSeverity {
        use super::ErrorSeverity;
        match self {
            Self::Status { status_code, .. } if *status_code >= 500 => ErrorSeverity::Recoverable,
            _ => ErrorSeverity::Warning,
        }
    }

    /// Returns true if the failure indicates an expired or invalid session.
    #[must_use]
    pub fn is_auth_failure(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}
