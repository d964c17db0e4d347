//! # Umami Gateway
//!
//! Network transport for the Umami realtime client.
//!
//! This crate provides:
//! - WebSocket client with supervised reconnection and keepalive
//! - Event dispatcher routing inbound frames to subscribers by type
//! - REST client with token authentication
//! - Typed clients for the platform's REST resources (notifications,
//!   orders, app settings, users)
//!
//! # Architecture
//!
//! The gateway is organized into:
//! - `ws` - WebSocket client infrastructure (connection, dispatch, supervision)
//! - `rest` - REST client infrastructure
//! - Resource modules (`notifications`, `orders`, `settings`, `users`)
//!
//! # Example
//!
//! ```ignore
//! use umami_gateway::ws::{Credentials, WsClient, WsConfig};
//!
//! let config = WsConfig::builder()
//!     .endpoint("wss://umami.example/ws/orders/")
//!     .build();
//!
//! let client = WsClient::new(config);
//! client.connect(&Credentials::token("...")?).await?;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::module_name_repetitions)]

/// WebSocket client infrastructure
pub mod ws;

/// REST client infrastructure
pub mod rest;

/// Notifications resource client
pub mod notifications;

/// Orders resource client
pub mod orders;

/// App settings resource client
pub mod settings;

/// Users resource client
pub mod users;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::notifications::{Notification, NotificationFilter, NotificationsApi};
    pub use crate::orders::{Order, OrderStatus, OrdersApi};
    pub use crate::rest::{RestClient, RestConfig, RestConfigBuilder};
    pub use crate::settings::{AppSettings, SettingsApi};
    pub use crate::users::{User, UsersApi};
    pub use crate::ws::{
        ConnectionEvent, ConnectionState, Credentials, Envelope, EventDispatcher, HandlerId,
        Supervisor, SupervisorStatus, Trigger, WsClient, WsConfig, WsConfigBuilder,
    };
}
