//! Notification ID type for representing notification identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Notification ID type - used for representing notification identifiers.
///
/// Wraps an `i64` value with validation to ensure it is positive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NotificationId(i64);

impl NotificationId {
    /// Creates a new `NotificationId` from an integer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidNotificationId` if the value is not positive.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidNotificationId(value));
        }
        Ok(Self(value))
    }

    /// Creates a new `NotificationId` without validation.
    ///
    /// The caller must ensure the value is positive.
    #[must_use]
    pub const fn new_unchecked(value: i64) -> Self {
        Self(value)
    }

    /// Returns the notification ID as an `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for NotificationId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| ValidationError::InvalidNotificationId(0))?;
        Self::new(value)
    }
}
