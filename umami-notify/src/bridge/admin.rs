//! Admin notification bridge.
//!
//! Subscribes to `new_order` and `new_guest_order`, maintains the alert
//! board, fires sound/vibration feedback, and resolves alert actions
//! against the notifications API.

use parking_lot::Mutex;
use std::sync::Arc;
use std::time::Duration;
use tokio::time::sleep;
use tracing::{info, warn};

use umami_core::error::UmamiError;
use umami_core::types::OrderId;
use umami_gateway::notifications::{NotificationFilter, NotificationsApi};
use umami_gateway::ws::{event_type, HandlerError, HandlerId, NewGuestOrder, NewOrder, WsClient};

use super::NavigationTarget;
use crate::alerts::{AlertBoard, OrderAlert};
use crate::bus::{NotificationBus, NotificationSignal};
use crate::config::NotifyConfig;
use crate::feedback::{fire_alert_feedback, FeedbackSink};

/// Name shown when an event arrives without a customer name.
const UNKNOWN_CUSTOMER: &str = "Unknown Customer";

/// Shared pieces an incoming-order handler needs.
#[derive(Clone)]
struct AlertContext {
    board: Arc<AlertBoard>,
    bus: NotificationBus,
    feedback: Arc<dyn FeedbackSink>,
    display_duration: Duration,
    exit_duration: Duration,
    vibration_pattern: Vec<u64>,
}

impl AlertContext {
    /// Accepts an incoming order: records the alert, signals sibling
    /// components, schedules auto-dismissal, and fires feedback without
    /// blocking the dispatch path.
    fn accept(&self, alert: OrderAlert) {
        let order_id = alert.order_id;
        info!(
            order_id = order_id.as_i64(),
            guest = alert.is_guest,
            "New order alert"
        );

        self.board.push(alert);
        self.bus.publish(NotificationSignal::OrdersChanged);

        let board = Arc::clone(&self.board);
        let display = self.display_duration;
        let exit = self.exit_duration;
        tokio::spawn(async move {
            sleep(display).await;
            // Already gone (or already exiting) when dismissed by hand.
            if board.mark_exiting(order_id) {
                sleep(exit).await;
                board.remove(order_id);
            }
        });

        let feedback = Arc::clone(&self.feedback);
        let pattern = self.vibration_pattern.clone();
        tokio::spawn(async move {
            fire_alert_feedback(feedback.as_ref(), &pattern).await;
        });
    }
}

/// Admin-facing bridge: alert cards for incoming orders.
pub struct AdminBridge {
    client: Arc<WsClient>,
    board: Arc<AlertBoard>,
    bus: NotificationBus,
    notifications: NotificationsApi,
    feedback: Arc<dyn FeedbackSink>,
    config: NotifyConfig,
    handlers: Mutex<Vec<(&'static str, HandlerId)>>,
}

impl AdminBridge {
    /// Creates the bridge. Call [`AdminBridge::attach`] to start
    /// receiving events.
    #[must_use]
    pub fn new(
        client: Arc<WsClient>,
        board: Arc<AlertBoard>,
        bus: NotificationBus,
        notifications: NotificationsApi,
        feedback: Arc<dyn FeedbackSink>,
        config: NotifyConfig,
    ) -> Self {
        Self {
            client,
            board,
            bus,
            notifications,
            feedback,
            config,
            handlers: Mutex::new(Vec::new()),
        }
    }

    /// Registers the event subscriptions.
    ///
    /// Idempotent: attaching while attached does nothing.
    pub fn attach(&self) {
        let mut handlers = self.handlers.lock();
        if !handlers.is_empty() {
            return;
        }

        let dispatcher = self.client.dispatcher();

        let ctx = self.context();
        let id = dispatcher.on(event_type::NEW_ORDER, move |envelope| {
            let event: NewOrder = envelope
                .payload_as()
                .map_err(|e| HandlerError::new(e.to_string()))?;
            let name = event
                .customer_name
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());
            ctx.accept(OrderAlert::new(event.order_id, name));
            Ok(())
        });
        handlers.push((event_type::NEW_ORDER, id));

        let ctx = self.context();
        let id = dispatcher.on(event_type::NEW_GUEST_ORDER, move |envelope| {
            let event: NewGuestOrder = envelope
                .payload_as()
                .map_err(|e| HandlerError::new(e.to_string()))?;
            let name = event
                .customer_name
                .unwrap_or_else(|| UNKNOWN_CUSTOMER.to_string());
            ctx.accept(OrderAlert::guest(
                event.order_id,
                name,
                event.temporary_id,
            ));
            Ok(())
        });
        handlers.push((event_type::NEW_GUEST_ORDER, id));
    }

    /// Removes the event subscriptions. Alerts already on the board stay
    /// until dismissed or cleared.
    pub fn detach(&self) {
        let dispatcher = self.client.dispatcher();
        for (event, id) in self.handlers.lock().drain(..) {
            dispatcher.off(event, id);
        }
    }

    /// Returns true if the bridge currently holds subscriptions.
    #[must_use]
    pub fn is_attached(&self) -> bool {
        !self.handlers.lock().is_empty()
    }

    /// Returns the alert board.
    #[must_use]
    pub fn board(&self) -> Arc<AlertBoard> {
        Arc::clone(&self.board)
    }

    /// Dismisses an alert by hand: exit transition, then removal.
    pub fn dismiss(&self, order_id: OrderId) {
        if !self.board.mark_exiting(order_id) {
            return;
        }
        let board = Arc::clone(&self.board);
        let exit = self.config.exit_duration;
        tokio::spawn(async move {
            sleep(exit).await;
            board.remove(order_id);
        });
    }

    /// Resolves the "view order" action for an alert.
    ///
    /// Looks up the unread notification for the order and marks it read,
    /// then navigates to the admin orders page. Any lookup or marking
    /// failure degrades the target to the generic notifications listing;
    /// the action never dead-ends.
    pub async fn view_order(&self, order_id: OrderId) -> NavigationTarget {
        let target = match self.mark_related_read(order_id).await {
            Ok(()) => NavigationTarget::AdminOrders,
            Err(e) => {
                warn!(
                    order_id = order_id.as_i64(),
                    error = %e,
                    "Notification lookup failed, falling back to listing"
                );
                NavigationTarget::Notifications
            }
        };

        self.board.remove(order_id);
        self.bus.publish(NotificationSignal::OrdersChanged);
        target
    }

    async fn mark_related_read(&self, order_id: OrderId) -> Result<(), UmamiError> {
        let unread = self
            .notifications
            .list(&NotificationFilter::unread_newest(
                self.config.alert_lookup_limit,
            ))
            .await?;

        if let Some(target) = unread
            .iter()
            .find(|n| n.related_order == Some(order_id))
        {
            self.notifications.mark_read(target.notification_id).await?;
            self.bus.publish(NotificationSignal::MarkedRead {
                notification_id: target.notification_id,
            });
        }

        Ok(())
    }

    fn context(&self) -> AlertContext {
        AlertContext {
            board: Arc::clone(&self.board),
            bus: self.bus.clone(),
            feedback: Arc::clone(&self.feedback),
            display_duration: self.config.display_duration,
            exit_duration: self.config.exit_duration,
            vibration_pattern: self.config.vibration_pattern.clone(),
        }
    }
}

impl std::fmt::Debug for AdminBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AdminBridge")
            .field("attached", &self.is_attached())
            .field("alerts", &self.board.len())
            .finish_non_exhaustive()
    }
}
