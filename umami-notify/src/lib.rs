//! # Umami Notify
//!
//! Notification bridges for the Umami realtime client.
//!
//! This crate turns dispatched wire events into observable UI state:
//! - An alert board holding transient new-order cards with exit
//!   transitions and auto-dismissal
//! - An unread counter kept in sync by push events with a polling
//!   fallback
//! - Role-gated bridges owning the event subscriptions
//! - A typed in-process notification bus connecting unrelated components
//! - [`RealtimeService`], the injectable facade that owns the whole
//!   subsystem's lifecycle (construct, start, stop)

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// Transient order alert state
pub mod alerts;

/// Notification bridges (admin, customer)
pub mod bridge;

/// In-process notification bus
pub mod bus;

/// Configuration for the notification subsystem
pub mod config;

/// Best-effort user feedback (sound, vibration)
pub mod feedback;

/// Realtime service lifecycle facade
pub mod service;

/// Unread notification counter
pub mod unread;

pub use service::RealtimeService;

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::alerts::{AlertBoard, OrderAlert};
    pub use crate::bridge::{AdminBridge, CustomerBridge, NavigationTarget};
    pub use crate::bus::{NotificationBus, NotificationSignal};
    pub use crate::config::{NotifyConfig, UmamiConfig};
    pub use crate::feedback::{FeedbackSink, NullFeedback};
    pub use crate::service::RealtimeService;
    pub use crate::unread::UnreadCounter;
}
