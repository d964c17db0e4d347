//! Event dispatcher routing decoded frames to subscribers by type.
//!
//! The registry maps event-type strings to handler sets. Registration
//! returns a [`HandlerId`]; removal is keyed by that handle, and removing
//! an unknown handle (or from an unknown type) is a silent no-op. Handler
//! failures are isolated per handler: one failing subscriber never
//! prevents the rest from seeing the frame.

use dashmap::DashMap;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

use super::message::Envelope;

/// Unique handle for a registered event handler.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HandlerId(u64);

impl HandlerId {
    /// Returns the handle as a `u64`.
    #[must_use]
    pub const fn as_u64(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for HandlerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Error returned by a handler; logged per handler, never propagated to
/// sibling handlers or to the connection task.
#[derive(Debug, Clone, thiserror::Error)]
#[error("{reason}")]
pub struct HandlerError {
    /// Why the handler rejected the frame.
    pub reason: String,
}

impl HandlerError {
    /// Creates a handler error.
    #[must_use]
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

impl From<String> for HandlerError {
    fn from(reason: String) -> Self {
        Self { reason }
    }
}

impl From<&str> for HandlerError {
    fn from(reason: &str) -> Self {
        Self {
            reason: reason.to_string(),
        }
    }
}

type Handler = Arc<dyn Fn(&Envelope) -> Result<(), HandlerError> + Send + Sync>;

/// Listener registry: event-type string to a set of handlers.
///
/// Shared by the connection task (dispatch side) and any number of bridge
/// components (subscribe side).
#[derive(Default)]
pub struct EventDispatcher {
    listeners: DashMap<String, Vec<(HandlerId, Handler)>>,
    next_id: AtomicU64,
    dispatched: AtomicU64,
    dropped: AtomicU64,
}

impl EventDispatcher {
    /// Creates an empty dispatcher.
    #[must_use]
    pub fn new() -> Self {
        Self {
            listeners: DashMap::new(),
            next_id: AtomicU64::new(1),
            dispatched: AtomicU64::new(0),
            dropped: AtomicU64::new(0),
        }
    }

    /// Registers a handler for an event type, returning its handle.
    pub fn on<F>(&self, event_type: impl Into<String>, handler: F) -> HandlerId
    where
        F: Fn(&Envelope) -> Result<(), HandlerError> + Send + Sync + 'static,
    {
        let event_type = event_type.into();
        let id = HandlerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners
            .entry(event_type.clone())
            .or_default()
            .push((id, Arc::new(handler)));

        debug!(event_type = %event_type, handler_id = %id, "Handler registered");
        id
    }

    /// Removes a handler by its handle.
    ///
    /// Removing an unknown handle, or from an event type with no
    /// registrations, does nothing. Empty handler sets are pruned so the
    /// registry does not accumulate dead keys.
    pub fn off(&self, event_type: &str, id: HandlerId) {
        let mut remove_key = false;
        if let Some(mut entry) = self.listeners.get_mut(event_type) {
            entry.retain(|(handler_id, _)| *handler_id != id);
            remove_key = entry.is_empty();
        }
        if remove_key {
            self.listeners.remove(event_type);
        }
    }

    /// Removes every registered handler.
    pub fn clear(&self) {
        self.listeners.clear();
        debug!("Listener registry cleared");
    }

    /// Dispatches a decoded envelope to every handler registered for its
    /// type.
    ///
    /// Handlers run synchronously in registration order, though callers
    /// must not rely on any ordering. A handler error is logged and the
    /// remaining handlers still run. A frame with no registered handlers
    /// is logged at warn level and dropped.
    pub fn dispatch(&self, envelope: &Envelope) {
        let handlers: Vec<(HandlerId, Handler)> = match self.listeners.get(&envelope.kind) {
            Some(entry) if !entry.is_empty() => entry.value().clone(),
            _ => {
                warn!(event_type = %envelope.kind, "No listeners registered for message type");
                self.dropped.fetch_add(1, Ordering::Relaxed);
                return;
            }
        };

        for (id, handler) in handlers {
            if let Err(e) = handler(envelope) {
                warn!(
                    event_type = %envelope.kind,
                    handler_id = %id,
                    error = %e,
                    "Handler failed"
                );
            }
        }

        self.dispatched.fetch_add(1, Ordering::Relaxed);
    }

    /// Returns the number of handlers registered for an event type.
    #[must_use]
    pub fn listener_count(&self, event_type: &str) -> usize {
        self.listeners
            .get(event_type)
            .map_or(0, |entry| entry.len())
    }

    /// Returns true if no handlers are registered at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    /// Returns the number of frames delivered to at least one handler.
    #[must_use]
    pub fn dispatched(&self) -> u64 {
        self.dispatched.load(Ordering::Relaxed)
    }

    /// Returns the number of frames dropped for lack of listeners.
    #[must_use]
    pub fn dropped(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }
}

impl fmt::Debug for EventDispatcher {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventDispatcher")
            .field("event_types", &self.listeners.len())
            .field("dispatched", &self.dispatched())
            .field("dropped", &self.dropped())
            .finish()
    }
}
