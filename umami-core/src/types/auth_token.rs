//! Authentication token type.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Authentication token - the session credential passed to the realtime
/// endpoint as a query parameter and to the REST API in the Authorization
/// header.
///
/// Both `Display` and `Debug` render the token masked so it can be logged
/// safely; use [`AuthToken::expose`] at the points where the raw value is
/// actually transmitted.
///
/// # Examples
///
/// ```
/// use umami_core::types::AuthToken;
///
/// let token = AuthToken::new("9c1185a5c5e9fc54612808977ee8f548b2258d31").unwrap();
/// assert_eq!(token.expose(), "9c1185a5c5e9fc54612808977ee8f548b2258d31");
/// assert!(!format!("{token}").contains("612808977"));
/// ```
#[derive(Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AuthToken(String);

impl AuthToken {
    /// Creates a new `AuthToken` from a string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyAuthToken` if the string is empty.
    pub fn new(value: impl Into<String>) -> Result<Self, ValidationError> {
        let s = value.into();
        if s.is_empty() {
            return Err(ValidationError::EmptyAuthToken);
        }
        Ok(Self(s))
    }

    /// Returns the raw token value.
    ///
    /// Only call this where the token is actually sent over the wire.
    #[must_use]
    pub fn expose(&self) -> &str {
        &self.0
    }

    /// Returns the masked form: the first and last three characters with
    /// the middle elided. Short tokens are fully masked.
    #[must_use]
    pub fn masked(&self) -> String {
        if self.0.len() <= 8 {
            return "***".to_string();
        }
        format!("{}***{}", &self.0[..3], &self.0[self.0.len() - 3..])
    }
}

impl fmt::Display for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.masked())
    }
}

impl fmt::Debug for AuthToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("AuthToken").field(&self.masked()).finish()
    }
}

impl FromStr for AuthToken {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_token_new_valid() {
        let token = AuthToken::new("abcdef1234567890").unwrap();
        assert_eq!(token.expose(), "abcdef1234567890");
    }

    #[test]
    fn test_auth_token_new_empty() {
        assert!(matches!(
            AuthToken::new(""),
            Err(ValidationError::EmptyAuthToken)
        ));
    }

    #[test]
    fn test_auth_token_display_is_masked() {
        let token = AuthToken::new("abcdef1234567890").unwrap();
        let shown = format!("{token}");
        assert_eq!(shown, "abc***890");
        assert!(!shown.contains("1234567"));
    }

    #[test]
    fn test_auth_token_debug_is_masked() {
        let token = AuthToken::new("abcdef1234567890").unwrap();
        let shown = format!("{token:?}");
        assert!(!shown.contains("1234567"));
    }

    #[test]
    fn test_auth_token_short_fully_masked() {
        let token = AuthToken::new("short").unwrap();
        assert_eq!(token.masked(), "***");
    }

    #[test]
    fn test_auth_token_serde_roundtrip() {
        let token = AuthToken::new("abcdef1234567890").unwrap();
        let json = serde_json::to_string(&token).unwrap();
        // Serialization keeps the raw value; only human-facing output masks.
        assert_eq!(json, "\"abcdef1234567890\"");
        let parsed: AuthToken = serde_json::from_str(&json).unwrap();
        assert_eq!(token, parsed);
    }
}
