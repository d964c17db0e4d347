//! Orders resource client.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;

use umami_core::error::UmamiError;
use umami_core::types::OrderId;

use crate::rest::{Page, RestClient};

/// Order lifecycle statuses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    /// Placed, awaiting payment.
    Pending,
    /// Payment confirmed.
    Paid,
    /// Restaurant is preparing the order.
    Preparing,
    /// Ready for courier pickup.
    ReadyForPickup,
    /// Courier is delivering.
    Delivering,
    /// Delivered.
    Completed,
    /// Cancelled by either party.
    Cancelled,
}

impl OrderStatus {
    /// Returns the status as the wire string.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
            Self::Preparing => "preparing",
            Self::ReadyForPickup => "ready_for_pickup",
            Self::Delivering => "delivering",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Returns true if the order can still change status.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        !matches!(self, Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// An order record.
///
/// Status stays a plain string here: the realtime feed forwards whatever
/// the backend sends, and an unrecognized status must not break decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub order_id: OrderId,
    /// Owning user id.
    #[serde(default)]
    pub user: Option<i64>,
    /// Customer display name.
    #[serde(default)]
    pub customer_name: Option<String>,
    /// Restaurant display name.
    #[serde(default)]
    pub restaurant_name: Option<String>,
    /// Order total, serialized as a decimal string.
    #[serde(default)]
    pub total_amount: Option<String>,
    /// Current lifecycle status.
    pub current_status: String,
    /// Delivery address.
    #[serde(default)]
    pub delivery_address: Option<String>,
    /// Placement time.
    #[serde(default)]
    pub order_date: Option<DateTime<Utc>>,
}

/// Filter parameters for listing orders.
#[derive(Debug, Clone, Default)]
pub struct OrderFilter {
    /// Restrict by status.
    pub status: Option<OrderStatus>,
    /// Ordering expression (e.g. `-order_date`).
    pub ordering: Option<String>,
    /// Maximum number of records.
    pub limit: Option<u32>,
}

impl OrderFilter {
    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(status) = self.status {
            query.push(("current_status", status.as_str().to_string()));
        }
        if let Some(ordering) = &self.ordering {
            query.push(("ordering", ordering.clone()));
        }
        if let Some(limit) = self.limit {
            query.push(("limit", limit.to_string()));
        }
        query
    }
}

#[derive(Debug, Serialize)]
struct StatusPatch<'a> {
    current_status: &'a str,
}

/// Typed client for the orders resource.
#[derive(Debug, Clone)]
pub struct OrdersApi {
    client: Arc<RestClient>,
}

impl OrdersApi {
    /// Creates the orders client.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Lists orders matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn list(&self, filter: &OrderFilter) -> Result<Vec<Order>, UmamiError> {
        let page: Page<Order> = self.client.get_json("/orders/", &filter.to_query()).await?;
        Ok(page.into_items())
    }

    /// Fetches a single order.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn get(&self, id: OrderId) -> Result<Order, UmamiError> {
        self.client.get_json(&format!("/orders/{id}/"), &[]).await
    }

    /// Transitions an order to a new status.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn update_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, UmamiError> {
        self.client
            .patch_json(
                &format!("/orders/{id}/"),
                &StatusPatch {
                    current_status: status.as_str(),
                },
            )
            .await
    }

    /// Cancels an order.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn cancel(&self, id: OrderId) -> Result<Order, UmamiError> {
        self.update_status(id, OrderStatus::Cancelled).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_strings() {
        assert_eq!(OrderStatus::ReadyForPickup.as_str(), "ready_for_pickup");
        assert_eq!(OrderStatus::Cancelled.to_string(), "cancelled");
    }

    #[test]
    fn test_status_is_active() {
        assert!(OrderStatus::Pending.is_active());
        assert!(OrderStatus::Delivering.is_active());
        assert!(!OrderStatus::Completed.is_active());
        assert!(!OrderStatus::Cancelled.is_active());
    }

    #[test]
    fn test_status_serde() {
        assert_eq!(
            serde_json::to_string(&OrderStatus::Preparing).unwrap(),
            "\"preparing\""
        );
        let parsed: OrderStatus = serde_json::from_str("\"ready_for_pickup\"").unwrap();
        assert_eq!(parsed, OrderStatus::ReadyForPickup);
    }

    #[test]
    fn test_order_decoding_tolerates_unknown_status() {
        let json = r#"{"order_id": 42, "current_status": "awaiting_rider"}"#;
        let order: Order = serde_json::from_str(json).unwrap();
        assert_eq!(order.current_status, "awaiting_rider");
    }

    #[test]
    fn test_filter_query() {
        let filter = OrderFilter {
            status: Some(OrderStatus::Pending),
            ordering: Some("-order_date".to_string()),
            limit: Some(10),
        };
        let query = filter.to_query();

        assert!(query.contains(&("current_status", "pending".to_string())));
        assert!(query.contains(&("ordering", "-order_date".to_string())));
        assert!(query.contains(&("limit", "10".to_string())));
    }

    #[test]
    fn test_status_patch_body() {
        let body = serde_json::to_string(&StatusPatch {
            current_status: OrderStatus::Cancelled.as_str(),
        })
        .unwrap();
        assert_eq!(body, r#"{"current_status":"cancelled"}"#);
    }
}
