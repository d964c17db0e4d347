//! Transient order alert state.
//!
//! The alert board holds the cards an admin session shows for incoming
//! orders. State is in-memory only and rebuilt from scratch whenever the
//! service restarts; dismissal goes through an `exiting` phase so the UI
//! can run an exit transition before removal.

use parking_lot::RwLock;

use umami_core::types::{OrderId, TemporaryId};

/// A transient new-order alert.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderAlert {
    /// The order that triggered the alert.
    pub order_id: OrderId,
    /// Customer display name.
    pub customer_name: String,
    /// Whether the order came from a guest session.
    pub is_guest: bool,
    /// Guest tracking identifier, for guest orders.
    pub temporary_id: Option<TemporaryId>,
    /// Whether the alert is running its exit transition.
    pub exiting: bool,
}

impl OrderAlert {
    /// Creates an alert for a registered customer's order.
    #[must_use]
    pub fn new(order_id: OrderId, customer_name: impl Into<String>) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            is_guest: false,
            temporary_id: None,
            exiting: false,
        }
    }

    /// Creates an alert for a guest order.
    #[must_use]
    pub fn guest(
        order_id: OrderId,
        customer_name: impl Into<String>,
        temporary_id: Option<TemporaryId>,
    ) -> Self {
        Self {
            order_id,
            customer_name: customer_name.into(),
            is_guest: true,
            temporary_id,
            exiting: false,
        }
    }
}

/// Ordered, in-memory list of active alerts.
///
/// Thread-safe; the dispatcher handler appends from the connection task
/// while the UI thread snapshots.
#[derive(Debug, Default)]
pub struct AlertBoard {
    alerts: RwLock<Vec<OrderAlert>>,
}

impl AlertBoard {
    /// Creates an empty board.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an alert.
    pub fn push(&self, alert: OrderAlert) {
        self.alerts.write().push(alert);
    }

    /// Flags an alert for its exit transition.
    ///
    /// Returns false if no active alert matches, e.g. because it was
    /// already dismissed by hand before its auto-dismiss timer fired.
    pub fn mark_exiting(&self, order_id: OrderId) -> bool {
        let mut alerts = self.alerts.write();
        let mut found = false;
        for alert in alerts.iter_mut() {
            if alert.order_id == order_id && !alert.exiting {
                alert.exiting = true;
                found = true;
            }
        }
        found
    }

    /// Removes every alert for the given order.
    pub fn remove(&self, order_id: OrderId) {
        self.alerts.write().retain(|a| a.order_id != order_id);
    }

    /// Removes all alerts.
    pub fn clear(&self) {
        self.alerts.write().clear();
    }

    /// Returns a snapshot of the current alerts, oldest first.
    #[must_use]
    pub fn active(&self) -> Vec<OrderAlert> {
        self.alerts.read().clone()
    }

    /// Returns the number of alerts on the board.
    #[must_use]
    pub fn len(&self) -> usize {
        self.alerts.read().len()
    }

    /// Returns true if the board is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.alerts.read().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn order(id: i64) -> OrderId {
        OrderId::new(id).unwrap()
    }

    #[test]
    fn test_push_and_snapshot() {
        let board = AlertBoard::new();
        board.push(OrderAlert::new(order(42), "Ann"));

        let alerts = board.active();
        assert_eq!(alerts.len(), 1);
        assert_eq!(alerts[0].order_id, order(42));
        assert!(!alerts[0].is_guest);
        assert!(!alerts[0].exiting);
    }

    #[test]
    fn test_guest_alert_carries_temporary_id() {
        let board = AlertBoard::new();
        board.push(OrderAlert::guest(
            order(9),
            "Guest",
            Some(TemporaryId::new("guest-8f3a").unwrap()),
        ));

        let alerts = board.active();
        assert!(alerts[0].is_guest);
        assert_eq!(
            alerts[0].temporary_id.as_ref().map(TemporaryId::as_str),
            Some("guest-8f3a")
        );
    }

    #[test]
    fn test_mark_exiting_then_remove() {
        let board = AlertBoard::new();
        board.push(OrderAlert::new(order(1), "Ann"));
        board.push(OrderAlert::new(order(2), "Ben"));

        assert!(board.mark_exiting(order(1)));
        let alerts = board.active();
        assert!(alerts.iter().any(|a| a.order_id == order(1) && a.exiting));
        assert!(alerts.iter().any(|a| a.order_id == order(2) && !a.exiting));

        board.remove(order(1));
        assert_eq!(board.len(), 1);
        assert_eq!(board.active()[0].order_id, order(2));
    }

    #[test]
    fn test_mark_exiting_missing_alert_is_false() {
        let board = AlertBoard::new();
        assert!(!board.mark_exiting(order(7)));
    }

    #[test]
    fn test_mark_exiting_twice_is_false() {
        let board = AlertBoard::new();
        board.push(OrderAlert::new(order(7), "Ann"));
        assert!(board.mark_exiting(order(7)));
        // The auto-dismiss timer finds the alert already exiting.
        assert!(!board.mark_exiting(order(7)));
    }

    #[test]
    fn test_remove_only_matching_order() {
        let board = AlertBoard::new();
        board.push(OrderAlert::new(order(1), "Ann"));
        board.push(OrderAlert::new(order(2), "Ben"));

        board.remove(order(2));
        assert_eq!(board.active()[0].order_id, order(1));
    }

    #[test]
    fn test_clear() {
        let board = AlertBoard::new();
        board.push(OrderAlert::new(order(1), "Ann"));
        board.clear();
        assert!(board.is_empty());
    }

    #[test]
    fn test_alerts_keep_arrival_order() {
        let board = AlertBoard::new();
        for id in 1..=3 {
            board.push(OrderAlert::new(order(id), format!("Customer {id}")));
        }

        let ids: Vec<i64> = board.active().iter().map(|a| a.order_id.as_i64()).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
