//! Guest order tracking identifier.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Temporary ID - the tracking identifier issued to guests who place orders
/// without an account. Guests authenticate to the realtime endpoint and the
/// guest-order tracking API with this value instead of a session token.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TemporaryId(String);

impl TemporaryId {
    /// Creates a new `TemporaryId` from a string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTemporaryId` if the string is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::EmptyTemporaryId);
        }
        Ok(Self(s))
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TemporaryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for TemporaryId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

impl AsRef<str> for TemporaryId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temporary_id_new() {
        let id = TemporaryId::new("guest-20250801-8f3a").unwrap();
        assert_eq!(id.as_str(), "guest-20250801-8f3a");
        assert!(TemporaryId::new("").is_err());
    }

    #[test]
    fn test_temporary_id_serde_roundtrip() {
        let id = TemporaryId::new("guest-1").unwrap();
        let json = serde_json::to_string(&id).unwrap();
        let parsed: TemporaryId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, parsed);
    }
}
