//! In-process notification bus.
//!
//! A typed broadcast channel connecting components that have no direct
//! reference to each other: the admin bridge announces changes, the
//! unread counter and any listing view resynchronize on them. Senders
//! never block; a slow receiver observes a lag count instead.

use tokio::sync::broadcast;
use tracing::debug;

use umami_core::types::NotificationId;

/// Signals carried on the bus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationSignal {
    /// The set of order notifications changed (a new order arrived or an
    /// alert was acted on); listings and counters should resynchronize.
    OrdersChanged,
    /// The unread count changed by some other means.
    UnreadChanged,
    /// A specific notification was marked read.
    MarkedRead {
        /// The notification that was read.
        notification_id: NotificationId,
    },
}

/// Typed broadcast bus for notification signals.
#[derive(Debug, Clone)]
pub struct NotificationBus {
    tx: broadcast::Sender<NotificationSignal>,
}

impl Default for NotificationBus {
    fn default() -> Self {
        Self::new()
    }
}

impl NotificationBus {
    /// Creates a bus with a small bounded buffer.
    #[must_use]
    pub fn new() -> Self {
        let (tx, _) = broadcast::channel(64);
        Self { tx }
    }

    /// Publishes a signal to every subscriber.
    ///
    /// Publishing with no subscribers is a no-op.
    pub fn publish(&self, signal: NotificationSignal) {
        let delivered = self.tx.send(signal).unwrap_or(0);
        debug!(?signal, subscribers = delivered, "Notification signal");
    }

    /// Subscribes to signals published after this call.
    #[must_use]
    pub fn subscribe(&self) -> broadcast::Receiver<NotificationSignal> {
        self.tx.subscribe()
    }

    /// Returns the current number of subscribers.
    #[must_use]
    pub fn subscriber_count(&self) -> usize {
        self.tx.receiver_count()
    }
}
