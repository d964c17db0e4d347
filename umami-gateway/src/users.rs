//! Users resource client.
//!
//! Consumed at the interface boundary only: the bridges never mutate user
//! records, they just resolve ids and roles.

use serde::{Deserialize, Serialize};
use std::sync::Arc;

use umami_core::error::UmamiError;
use umami_core::types::{Role, UserId};

use crate::rest::{Page, RestClient};

/// A user account record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    /// User identifier.
    pub id: UserId,
    /// Login name.
    #[serde(default)]
    pub username: Option<String>,
    /// Email address.
    #[serde(default)]
    pub email: Option<String>,
    /// Account role.
    #[serde(default)]
    pub role: Option<Role>,
    /// Whether the account is active.
    #[serde(default)]
    pub is_active: Option<bool>,
}

/// Typed client for the users resource.
#[derive(Debug, Clone)]
pub struct UsersApi {
    client: Arc<RestClient>,
}

impl UsersApi {
    /// Creates the users client.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Lists users (admin only).
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn list(&self) -> Result<Vec<User>, UmamiError> {
        let page: Page<User> = self.client.get_json("/users/", &[]).await?;
        Ok(page.into_items())
    }

    /// Fetches a user by id.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn get(&self, id: UserId) -> Result<User, UmamiError> {
        self.client.get_json(&format!("/users/{id}/"), &[]).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_decoding() {
        let json = r#"{"id": 12, "username": "ann", "role": "admin", "is_active": true}"#;
        let user: User = serde_json::from_str(json).unwrap();
        assert_eq!(user.id.as_i64(), 12);
        assert_eq!(user.role, Some(Role::Admin));
    }

    #[test]
    fn test_user_minimal() {
        let user: User = serde_json::from_str(r#"{"id": 3}"#).unwrap();
        assert!(user.role.is_none());
        assert!(user.username.is_none());
    }
}
