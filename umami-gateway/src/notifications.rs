//! Notifications resource client.
//!
//! Covers the notification surface the bridges depend on: filtered
//! listing, the unread count, and the mark-read actions.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use umami_core::error::UmamiError;
use umami_core::types::{NotificationId, OrderId};

use crate::rest::{Page, RestClient};

/// A notification record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Notification {
    /// Notification identifier.
    pub notification_id: NotificationId,
    /// Short title.
    #[serde(default)]
    pub title: Option<String>,
    /// Body text.
    #[serde(default)]
    pub message: Option<String>,
    /// Notification category (`order`, `guest_order`, `system`, ...).
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// Related order, when the notification concerns one.
    #[serde(default)]
    pub related_order: Option<OrderId>,
    /// Whether the user has read this notification.
    #[serde(default)]
    pub is_read: bool,
    /// Creation time.
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

/// Filter parameters for listing notifications.
#[derive(Debug, Clone, Default)]
pub struct NotificationFilter {
    /// Restrict by read state.
    pub is_read: Option<bool>,
    /// Ordering expression (e.g. `-created_at`).
    pub ordering: Option<String>,
    /// Maximum number of records.
    pub limit: Option<u32>,
}

impl NotificationFilter {
    /// The filter the admin bridge uses to resolve an alert: unread,
    /// newest first, bounded.
    #[must_use]
    pub fn unread_newest(limit: u32) -> Self {
        Self {
            is_read: Some(false),
            ordering: Some("-created_at".to_string()),
            limit: Some(limit),
        }
    }

    fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(is_read) = self.is_read {
            query.push(("is_read", is_read.to_string()));
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

#[derive(Debug, Deserialize)]
struct UnreadCount {
    unread_count: i64,
}

#[derive(Debug, Deserialize)]
#[allow(dead_code)]
struct MarkAllResponse {
    message: String,
}

/// Typed client for the notifications resource.
#[derive(Debug, Clone)]
pub struct NotificationsApi {
    client: Arc<RestClient>,
}

impl NotificationsApi {
    /// Creates the notifications client.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Lists notifications matching the filter.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn list(&self, filter: &NotificationFilter) -> Result<Vec<Notification>, UmamiError> {
        let page: Page<Notification> = self
            .client
            .get_json("/notifications/", &filter.to_query())
            .await?;
        Ok(page.into_items())
    }

    /// Returns the number of unread notifications.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn unread_count(&self) -> Result<i64, UmamiError> {
        let count: UnreadCount = self
            .client
            .get_json("/notifications/unread-count/", &[])
            .await?;
        Ok(count.unread_count)
    }

    /// Marks a single notification as read, returning the updated record.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn mark_read(&self, id: NotificationId) -> Result<Notification, UmamiError> {
        self.client
            .post_empty(&format!("/notifications/{id}/mark-read/"))
            .await
    }

    /// Marks every notification as read.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn mark_all_read(&self) -> Result<(), UmamiError> {
        let _: MarkAllResponse = self
            .client
            .post_empty("/notifications/mark-all-read/")
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_query() {
        let filter = NotificationFilter::unread_newest(20);
        let query = filter.to_query();

        assert!(query.contains(&("is_read", "false".to_string())));
        assert!(query.contains(&("ordering", "-created_at".to_string())));
        assert!(query.contains(&("limit", "20".to_string())));
    }

    #[test]
    fn test_empty_filter_query() {
        assert!(NotificationFilter::default().to_query().is_empty());
    }

    #[test]
    fn test_notification_decoding() {
        let json = r#"{
            "notification_id": 31,
            "title": "New order",
            "message": "Order #42 from Ann",
            "type": "order",
            "related_order": 42,
            "is_read": false,
            "created_at": "2025-08-01T10:30:00+00:00"
        }"#;

        let notification: Notification = serde_json::from_str(json).unwrap();
        assert_eq!(notification.notification_id.as_i64(), 31);
        assert_eq!(notification.related_order.map(|id| id.as_i64()), Some(42));
        assert!(!notification.is_read);
        assert_eq!(notification.kind.as_deref(), Some("order"));
    }

    #[test]
    fn test_notification_minimal_fields() {
        let json = r#"{"notification_id": 7}"#;
        let notification: Notification = serde_json::from_str(json).unwrap();
        assert!(notification.related_order.is_none());
        assert!(!notification.is_read);
    }

    #[test]
    fn test_paginated_list_decoding() {
        let json = r#"{"count": 1, "results": [{"notification_id": 3, "is_read": true}]}"#;
        let page: Page<Notification> = serde_json::from_str(json).unwrap();
        let items = page.into_items();
        assert_eq!(items.len(), 1);
        assert!(items[0].is_read);
    }
}
