//! Unread notification counter.
//!
//! The count is pushed up by `new_order` events and pulled down by
//! mark-read actions, with a REST resynchronization as the source of
//! truth. When the count endpoint fails, the counter falls back to
//! counting an unread listing page client-side; when even that fails the
//! last known value stands.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, warn};

use umami_gateway::notifications::{NotificationFilter, NotificationsApi};

use crate::bus::{NotificationBus, NotificationSignal};

/// Page size for the client-side fallback count.
const FALLBACK_LIST_LIMIT: u32 = 100;

/// Shared unread notification counter.
#[derive(Debug)]
pub struct UnreadCounter {
    count: Mutex<i64>,
    api: NotificationsApi,
    bus: NotificationBus,
}

impl UnreadCounter {
    /// Creates a counter starting at zero.
    #[must_use]
    pub fn new(api: NotificationsApi, bus: NotificationBus) -> Self {
        Self {
            count: Mutex::new(0),
            api,
            bus,
        }
    }

    /// Returns the current count.
    #[must_use]
    pub fn get(&self) -> i64 {
        *self.count.lock()
    }

    /// Increments the count (a new order arrived).
    pub fn increment(&self) {
        let mut count = self.count.lock();
        *count += 1;
        debug!(count = *count, "Unread count incremented");
    }

    /// Decrements the count, never below zero (one notification read).
    pub fn decrement(&self) {
        let mut count = self.count.lock();
        *count = (*count - 1).max(0);
        debug!(count = *count, "Unread count decremented");
    }

    /// Resets the count to zero (mark-all-read).
    pub fn reset(&self) {
        *self.count.lock() = 0;
    }

    fn set(&self, value: i64) {
        *self.count.lock() = value.max(0);
    }

    /// Resynchronizes the count from the API.
    ///
    /// Tries the count endpoint first; on failure, counts an unread
    /// listing page client-side. When both fail the last known value is
    /// kept and the failure is logged.
    #[allow(clippy::cast_possible_wrap)]
    pub async fn refresh(&self) {
        match self.api.unread_count().await {
            Ok(count) => {
                self.set(count);
                return;
            }
            Err(e) => {
                warn!(error = %e, "Unread count endpoint failed, falling back to listing");
            }
        }

        match self
            .api
            .list(&NotificationFilter::unread_newest(FALLBACK_LIST_LIMIT))
            .await
        {
            Ok(notifications) => {
                let unread = notifications.iter().filter(|n| !n.is_read).count() as i64;
                self.set(unread);
            }
            Err(e) => {
                warn!(error = %e, "Unread fallback listing failed, keeping last known count");
            }
        }
    }

    /// Spawns the resynchronization task: refreshes on every bus signal
    /// and on a fixed polling interval as the push fallback.
    ///
    /// The returned handle must be aborted (or awaited after shutdown) by
    /// the owner; the service facade does this in `stop`.
    #[must_use]
    pub fn spawn_sync(self: &Arc<Self>, poll_interval: std::time::Duration) -> JoinHandle<()> {
        let counter = Arc::clone(self);
        let mut signals = self.bus.subscribe();

        tokio::spawn(async move {
            let mut poll = tokio::time::interval(poll_interval);
            poll.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
            poll.tick().await;

            loop {
                tokio::select! {
                    signal = signals.recv() => {
                        match signal {
                            Ok(NotificationSignal::OrdersChanged) => counter.refresh().await,
                            Ok(NotificationSignal::MarkedRead { .. }) => counter.decrement(),
                            Ok(NotificationSignal::UnreadChanged) => {}
                            Err(tokio::sync::broadcast::error::RecvError::Lagged(missed)) => {
                                debug!(missed = missed, "Counter lagged on signals, refreshing");
                                counter.refresh().await;
                            }
                            Err(tokio::sync::broadcast::error::RecvError::Closed) => break,
                        }
                    }
                    _ = poll.tick() => {
                        counter.refresh().await;
                    }
                }
            }
        })
    }
}
