//! Account role enumeration.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Account role, as reported by the authentication API.
///
/// The role gates which realtime bridge connects: customers and admins hold
/// a live connection for order-status push, restaurant accounts rely on the
/// order listing alone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Customer account.
    Customer,
    /// Platform administrator.
    Admin,
    /// Restaurant operator.
    Restaurant,
}

impl Role {
    /// Returns true if accounts with this role hold a realtime connection.
    #[must_use]
    pub const fn connects_realtime(&self) -> bool {
        matches!(self, Self::Customer | Self::Admin)
    }

    /// Returns the role as a static string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Customer => "customer",
            Self::Admin => "admin",
            Self::Restaurant => "restaurant",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Role {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "customer" => Ok(Self::Customer),
            "admin" => Ok(Self::Admin),
            "restaurant" => Ok(Self::Restaurant),
            other => Err(ValidationError::UnknownRole(other.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_connects_realtime() {
        assert!(Role::Customer.connects_realtime());
        assert!(Role::Admin.connects_realtime());
        assert!(!Role::Restaurant.connects_realtime());
    }

    #[test]
    fn test_role_from_str() {
        assert_eq!("admin".parse::<Role>().unwrap(), Role::Admin);
        assert!(matches!(
            "driver".parse::<Role>(),
            Err(ValidationError::UnknownRole(_))
        ));
    }

    #[test]
    fn test_role_serde() {
        assert_eq!(serde_json::to_string(&Role::Customer).unwrap(), "\"customer\"");
        let parsed: Role = serde_json::from_str("\"restaurant\"").unwrap();
        assert_eq!(parsed, Role::Restaurant);
    }
}
