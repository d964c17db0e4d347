//! User ID type for representing user account identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ValidationError;

/// User ID type - used for representing user account identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(i64);

impl UserId {
    /// Creates a new `UserId` from an integer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidUserId` if the value is not positive.
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidUserId(value));
        }
        Ok(Self(value))
    }

    /// Creates a new `UserId` without validation.
    ///
    /// The caller must ensure the value is positive.
    #[must_use]
    pub const fn new_unchecked(value: i64) -> Self {
        Self(value)
    }

    /// Returns the user ID as an `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for UserId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
