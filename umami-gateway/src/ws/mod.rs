//! WebSocket client infrastructure.
//!
//! This module provides the realtime side of the gateway:
//! - A WebSocket client holding the single transport handle, with
//!   keepalive and connection-state tracking
//! - An event dispatcher fanning decoded frames out to subscribers by
//!   message type
//! - A supervisor owning the bounded reconnection policy, fed by every
//!   liveness trigger
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use umami_gateway::ws::{Credentials, Supervisor, Trigger, WsClient, WsConfig};
//!
//! let config = WsConfig::builder()
//!     .endpoint("wss://umami.example/ws/orders/")
//!     .build();
//!
//! let client = Arc::new(WsClient::new(config));
//! client.dispatcher().on("order_status_update", |envelope| {
//!     println!("{:?}", envelope.payload);
//!     Ok(())
//! });
//!
//! let credentials = Credentials::token("...")?;
//! client.connect(&credentials).await?;
//!
//! let supervisor = Supervisor::spawn(Arc::clone(&client), credentials);
//! supervisor.nudge(Trigger::Mount);
//! ```

mod client;
mod config;
mod dispatcher;
mod message;
mod state;
mod supervisor;

pub use client::{ConnectionEvent, WsClient};
pub use config::{Credentials, WsConfig, WsConfigBuilder};
pub use dispatcher::{EventDispatcher, HandlerError, HandlerId};
pub use message::{
    event_type, ConnectionEstablished, Envelope, NewGuestOrder, NewOrder, OrderStatusUpdate, Pong,
    ServerError,
};
pub use state::{ConnectionState, ABNORMAL_CLOSURE, NORMAL_CLOSURE};
pub use supervisor::{Supervisor, SupervisorStatus, Trigger};
