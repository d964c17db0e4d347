//! NewType wrappers for platform identifiers.
//!
//! This module provides type-safe wrappers around raw identifier values
//! to prevent mixing incompatible identifiers at compile time.
//!
//! # Types
//!
//! - [`OrderId`] - Order identifiers
//! - [`NotificationId`] - Notification identifiers
//! - [`UserId`] - User account identifiers
//! - [`AuthToken`] - Session authentication tokens (masked in output)
//! - [`TemporaryId`] - Guest order tracking identifiers
//! - [`Timestamp`] - Unix millisecond timestamps
//! - [`Role`] - Account roles

mod auth_token;
mod notification_id;
mod order_id;
mod role;
mod temporary_id;
mod timestamp;
mod user_id;

pub use auth_token::AuthToken;
pub use notification_id::NotificationId;
pub use order_id::OrderId;
pub use role::Role;
pub use temporary_id::TemporaryId;
pub use timestamp::Timestamp;
pub use user_id::UserId;

/// Validation error for `NewType` construction.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Order ID is not a positive integer
    #[error("order ID must be positive: {0}")]
    InvalidOrderId(i64),

    /// Notification ID is not a positive integer
    #[error("notification ID must be positive: {0}")]
    InvalidNotificationId(i64),

    /// User ID is not a positive integer
    #[error("user ID must be positive: {0}")]
    InvalidUserId(i64),

    /// Authentication token is empty
    #[error("auth token cannot be empty")]
    EmptyAuthToken,

    /// Guest tracking identifier is empty
    #[error("temporary ID cannot be empty")]
    EmptyTemporaryId,

    /// Timestamp is invalid (negative)
    #[error("invalid timestamp: {0}")]
    InvalidTimestamp(i64),

    /// Role string is not recognized
    #[error("unknown role: {0}")]
    UnknownRole(String),
}
