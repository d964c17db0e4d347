//! Order ID type for representing order identifiers.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use super::ValidationError;

/// Order ID type - used for representing order identifiers.
///
/// Wraps an `i64` value with validation to ensure it is positive. Order
/// identifiers are assigned by the backend; the client never generates them.
///
/// # Examples
///
/// ```
/// use umami_core::types::OrderId;
///
/// let order_id = OrderId::new(42).unwrap();
/// assert_eq!(order_id.as_i64(), 42);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct OrderId(i64);

impl OrderId {
    /// Creates a new `OrderId` from an integer.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::InvalidOrderId` if the value is not positive.
    ///
    /// # Examples
    ///
    /// ```
    /// use umami_core::types::OrderId;
    ///
    /// let order_id = OrderId::new(42).unwrap();
    /// assert!(OrderId::new(0).is_err());
    /// ```
    pub fn new(value: i64) -> Result<Self, ValidationError> {
        if value <= 0 {
            return Err(ValidationError::InvalidOrderId(value));
        }
        Ok(Self(value))
    }

    /// Creates a new `OrderId` without validation.
    ///
    /// The caller must ensure the value is positive.
    #[must_use]
    pub const fn new_unchecked(value: i64) -> Self {
        Self(value)
    }

    /// Returns the order ID as an `i64`.
    #[must_use]
    pub const fn as_i64(&self) -> i64 {
        self.0
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for OrderId {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let value: i64 = s
            .parse()
            .map_err(|_| ValidationError::InvalidOrderId(0))?;
        Self::new(value)
    }
}

impl From<OrderId> for i64 {
    fn from(order_id: OrderId) -> Self {
        order_id.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_order_id_new_valid() {
        let order_id = OrderId::new(42).unwrap();
        assert_eq!(order_id.as_i64(), 42);
    }

    #[test]
    fn test_order_id_new_invalid() {
        assert!(matches!(
            OrderId::new(0),
            Err(ValidationError::InvalidOrderId(0))
        ));
        assert!(OrderId::new(-5).is_err());
    }

    #[test]
    fn test_order_id_display() {
        let order_id = OrderId::new(1234).unwrap();
        assert_eq!(format!("{order_id}"), "1234");
    }

    #[test]
    fn test_order_id_from_str() {
        let order_id: OrderId = "77".parse().unwrap();
        assert_eq!(order_id.as_i64(), 77);
        assert!("abc".parse::<OrderId>().is_err());
    }

    #[test]
    fn test_order_id_serde_roundtrip() {
        let order_id = OrderId::new(42).unwrap();
        let json = serde_json::to_string(&order_id).unwrap();
        assert_eq!(json, "42");
        let parsed: OrderId = serde_json::from_str(&json).unwrap();
        assert_eq!(order_id, parsed);
    }
}
