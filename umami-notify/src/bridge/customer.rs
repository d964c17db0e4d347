//! Customer connection bridge.
//!
//! Customers hold a realtime connection purely for order-status push;
//! there is no alert UI on this side. The bridge gates the connection on
//! the session role: it connects when a customer session is active and
//! tears the connection down when the session ends or changes role.

use std::sync::Arc;
use tracing::{debug, warn};

use umami_core::types::Role;
use umami_gateway::ws::{Credentials, WsClient};

/// Role-gated connection bridge for customer sessions.
#[derive(Debug)]
pub struct CustomerBridge {
    client: Arc<WsClient>,
}

impl CustomerBridge {
    /// Creates the bridge.
    #[must_use]
    pub fn new(client: Arc<WsClient>) -> Self {
        Self { client }
    }

    /// Synchronizes the connection with the current session.
    ///
    /// A customer session connects (best-effort; the supervisor retries
    /// failures); anything else disconnects. Errors never propagate.
    pub async fn sync(&self, session: Option<(Role, &Credentials)>) {
        match session {
            Some((Role::Customer, credentials)) => {
                if self.client.is_connected() {
                    debug!("Customer connection already open");
                    return;
                }
                if let Err(e) = self.client.connect(credentials).await {
                    warn!(error = %e, "Customer connection failed");
                }
            }
            _ => {
                if !self.client.state().is_inactive() {
                    self.client.disconnect().await;
                }
            }
        }
    }
}
