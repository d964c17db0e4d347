//! Realtime service lifecycle facade.
//!
//! One injectable object owns the whole realtime subsystem: the WebSocket
//! client, its supervisor, the bridges, and the unread counter's
//! synchronization task. The application root constructs it, `start`s it
//! with the session's role and credentials, and `stop`s it on teardown -
//! every task spawned by `start` is cancelled by `stop`.

use parking_lot::Mutex;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use umami_core::error::UmamiError;
use umami_core::types::Role;
use umami_gateway::notifications::NotificationsApi;
use umami_gateway::orders::OrdersApi;
use umami_gateway::rest::RestClient;
use umami_gateway::settings::SettingsApi;
use umami_gateway::users::UsersApi;
use umami_gateway::ws::{Credentials, Supervisor, SupervisorStatus, Trigger, WsClient};

use crate::alerts::AlertBoard;
use crate::bridge::{AdminBridge, CustomerBridge};
use crate::bus::NotificationBus;
use crate::config::UmamiConfig;
use crate::feedback::{FeedbackSink, NullFeedback};
use crate::unread::UnreadCounter;

/// The realtime subsystem, owned by the application root.
///
/// # Example
///
/// ```ignore
/// use umami_notify::{config::UmamiConfig, RealtimeService};
/// use umami_core::types::Role;
/// use umami_gateway::ws::Credentials;
///
/// let service = RealtimeService::new(config)?;
/// service.start(Role::Admin, Credentials::token(token)?).await;
/// // ... app runs; triggers forward into the supervisor ...
/// service.notify_app_resumed();
/// service.stop().await;
/// ```
pub struct RealtimeService {
    config: UmamiConfig,
    client: Arc<WsClient>,
    notifications: NotificationsApi,
    orders: OrdersApi,
    settings: SettingsApi,
    users: UsersApi,
    bus: NotificationBus,
    board: Arc<AlertBoard>,
    unread: Arc<UnreadCounter>,
    admin: AdminBridge,
    customer: CustomerBridge,
    supervisor: Mutex<Option<Supervisor>>,
    tasks: Mutex<Vec<JoinHandle<()>>>,
}

impl RealtimeService {
    /// Constructs the service with no feedback sink.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` if the REST client cannot be created.
    pub fn new(config: UmamiConfig) -> Result<Self, UmamiError> {
        Self::with_feedback(config, Arc::new(NullFeedback))
    }

    /// Constructs the service with the given feedback sink.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` if the REST client cannot be created.
    pub fn with_feedback(
        config: UmamiConfig,
        feedback: Arc<dyn FeedbackSink>,
    ) -> Result<Self, UmamiError> {
        let client = Arc::new(WsClient::new(config.ws.clone()));
        let rest = Arc::new(RestClient::new(config.rest.clone())?);

        let notifications = NotificationsApi::new(Arc::clone(&rest));
        let orders = OrdersApi::new(Arc::clone(&rest));
        let settings = SettingsApi::new(Arc::clone(&rest));
        let users = UsersApi::new(Arc::clone(&rest));

        let bus = NotificationBus::new();
        let board = Arc::new(AlertBoard::new());
        let unread = Arc::new(UnreadCounter::new(notifications.clone(), bus.clone()));

        let admin = AdminBridge::new(
            Arc::clone(&client),
            Arc::clone(&board),
            bus.clone(),
            notifications.clone(),
            feedback,
            config.notify.clone(),
        );
        let customer = CustomerBridge::new(Arc::clone(&client));

        Ok(Self {
            config,
            client,
            notifications,
            orders,
            settings,
            users,
            bus,
            board,
            unread,
            admin,
            customer,
            supervisor: Mutex::new(None),
            tasks: Mutex::new(Vec::new()),
        })
    }

    /// Starts the realtime subsystem for a session.
    ///
    /// Best-effort by design: a failed initial connect is left to the
    /// supervisor's retry cycle, and roles that hold no realtime
    /// connection simply skip it.
    pub async fn start(&self, role: Role, credentials: Credentials) {
        if self.supervisor.lock().is_some() {
            warn!("Realtime service already started");
            return;
        }

        if !role.connects_realtime() {
            debug!(role = %role, "Role holds no realtime connection");
            return;
        }

        if let Err(e) = self.client.connect(&credentials).await {
            warn!(error = %e, "Initial connect failed, supervisor will retry");
        }

        let supervisor = Supervisor::spawn(Arc::clone(&self.client), credentials);
        supervisor.nudge(Trigger::Mount);
        *self.supervisor.lock() = Some(supervisor);

        if role == Role::Admin {
            self.admin.attach();
            self.unread.refresh().await;
            let sync = self.unread.spawn_sync(self.config.notify.unread_poll_interval);
            self.tasks.lock().push(sync);
        }

        info!(role = %role, "Realtime service started");
    }

    /// Stops the realtime subsystem, cancelling everything `start`
    /// spawned.
    pub async fn stop(&self) {
        let supervisor = self.supervisor.lock().take();
        if let Some(supervisor) = supervisor {
            supervisor.shutdown().await;
        }

        self.admin.detach();

        for task in self.tasks.lock().drain(..) {
            task.abort();
        }

        self.client.disconnect().await;
        self.board.clear();

        info!("Realtime service stopped");
    }

    /// Returns the WebSocket client.
    #[must_use]
    pub fn client(&self) -> Arc<WsClient> {
        Arc::clone(&self.client)
    }

    /// Returns the alert board.
    #[must_use]
    pub fn alerts(&self) -> Arc<AlertBoard> {
        Arc::clone(&self.board)
    }

    /// Returns the unread counter.
    #[must_use]
    pub fn unread(&self) -> Arc<UnreadCounter> {
        Arc::clone(&self.unread)
    }

    /// Returns the notification bus.
    #[must_use]
    pub fn bus(&self) -> NotificationBus {
        self.bus.clone()
    }

    /// Returns the admin bridge.
    #[must_use]
    pub fn admin(&self) -> &AdminBridge {
        &self.admin
    }

    /// Returns the customer bridge.
    #[must_use]
    pub fn customer(&self) -> &CustomerBridge {
        &self.customer
    }

    /// Returns the notifications API client.
    #[must_use]
    pub fn notifications(&self) -> &NotificationsApi {
        &self.notifications
    }

    /// Returns the orders API client.
    #[must_use]
    pub fn orders(&self) -> &OrdersApi {
        &self.orders
    }

    /// Returns the settings API client.
    #[must_use]
    pub fn settings(&self) -> &SettingsApi {
        &self.settings
    }

    /// Returns the users API client.
    #[must_use]
    pub fn users(&self) -> &UsersApi {
        &self.users
    }

    /// Returns whether the realtime connection is open.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.client.is_connected()
    }

    /// Returns the supervisor status while started.
    #[must_use]
    pub fn supervisor_status(&self) -> Option<SupervisorStatus> {
        self.supervisor.lock().as_ref().map(Supervisor::status)
    }

    /// The application became visible again.
    pub fn notify_app_resumed(&self) {
        self.nudge(Trigger::Resume);
    }

    /// The window regained focus.
    pub fn notify_focus(&self) {
        self.nudge(Trigger::Focus);
    }

    /// A client-side route change completed.
    pub fn notify_route_changed(&self) {
        self.nudge(Trigger::RouteChange);
    }

    /// Explicitly requests a connection check.
    pub fn ensure_connected(&self) {
        self.nudge(Trigger::Manual);
    }

    fn nudge(&self, trigger: Trigger) {
        if let Some(supervisor) = self.supervisor.lock().as_ref() {
            supervisor.nudge(trigger);
        } else {
            debug!(trigger = %trigger, "Trigger ignored, service not started");
        }
    }
}

impl std::fmt::Debug for RealtimeService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RealtimeService")
            .field("connected", &self.is_connected())
            .field("alerts", &self.board.len())
            .field("unread", &self.unread.get())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;
    use umami_gateway::rest::RestConfig;
    use umami_gateway::ws::WsConfig;

    fn test_config() -> UmamiConfig {
        UmamiConfig {
            ws: WsConfig::builder()
                .endpoint("ws://127.0.0.1:1/ws/orders/")
                .connect_timeout(Duration::from_millis(100))
                .reconnect_delay(Duration::from_millis(50))
                .max_reconnect_attempts(1)
                .liveness_check_interval(Duration::from_secs(3600))
                .build(),
            rest: RestConfig::builder()
                .base_url("http://127.0.0.1:1/api")
                .timeout(Duration::from_millis(100))
                .build(),
            ..UmamiConfig::default()
        }
    }

    #[tokio::test]
    async fn test_start_stop_lifecycle() {
        let service = RealtimeService::new(test_config()).unwrap();
        let credentials = Credentials::token("9c1185a5c5e9fc54").unwrap();

        service.start(Role::Admin, credentials).await;
        assert!(service.supervisor_status().is_some());
        assert!(service.admin().is_attached());

        service.stop().await;
        assert!(service.supervisor_status().is_none());
        assert!(!service.admin().is_attached());
        assert!(service.alerts().is_empty());
        assert!(service.client().dispatcher().is_empty());
    }

    #[tokio::test]
    async fn test_restaurant_role_skips_connection() {
        let service = RealtimeService::new(test_config()).unwrap();
        let credentials = Credentials::token("9c1185a5c5e9fc54").unwrap();

        service.start(Role::Restaurant, credentials).await;
        assert!(service.supervisor_status().is_none());
        assert!(!service.is_connected());
    }

    #[tokio::test]
    async fn test_double_start_is_rejected() {
        let service = RealtimeService::new(test_config()).unwrap();
        let credentials = Credentials::token("9c1185a5c5e9fc54").unwrap();

        service.start(Role::Customer, credentials.clone()).await;
        service.start(Role::Customer, credentials).await;
        assert!(service.supervisor_status().is_some());

        service.stop().await;
    }

    #[tokio::test]
    async fn test_triggers_without_start_are_ignored() {
        let service = RealtimeService::new(test_config()).unwrap();
        service.notify_app_resumed();
        service.notify_focus();
        service.notify_route_changed();
        service.ensure_connected();
    }

    #[tokio::test]
    async fn test_stop_without_start_is_safe() {
        let service = RealtimeService::new(test_config()).unwrap();
        service.stop().await;
        assert!(!service.is_connected());
    }
}
