//! Reconnect supervisor.
//!
//! A single supervising task owns the reconnection policy. Every liveness
//! trigger - the periodic check, app resume, window focus, client-side
//! route changes, component mounts - funnels into the same task through
//! [`Supervisor::nudge`], so concurrent triggers collapse into one connect
//! attempt instead of racing to replace the handle. A keepalive failure
//! surfaces as an abnormal `Closed` event from the client and re-enters
//! the same path.
//!
//! Policy: an abnormal closure (code != 1000) schedules one reconnect per
//! delay window while the attempt counter stays below the ceiling; the
//! counter resets only when a connection actually opens. Once the ceiling
//! is reached the supervisor parks in [`SupervisorStatus::Exhausted`] -
//! visible to callers - until an explicit trigger resets the counter and
//! tries again.

use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::sync::{broadcast, mpsc, watch};
use tokio::task::JoinHandle;
use tokio::time::{interval, sleep};
use tracing::{debug, info, warn};

use super::client::{ConnectionEvent, WsClient};
use super::config::{Credentials, WsConfig};
use super::state::NORMAL_CLOSURE;

/// Delays for the post-mount re-checks that tolerate connect-in-progress
/// races.
const MOUNT_RECHECK_SHORT: Duration = Duration::from_secs(1);
const MOUNT_RECHECK_MEDIUM: Duration = Duration::from_secs(5);

/// Liveness triggers that request an `ensure connected` pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// A consuming component mounted; also schedules two delayed re-checks.
    Mount,
    /// The application became visible again.
    Resume,
    /// The window regained focus.
    Focus,
    /// A client-side route change completed.
    RouteChange,
    /// The supervisor's own periodic liveness check.
    Interval,
    /// An explicit caller request.
    Manual,
}

impl Trigger {
    /// Whether this trigger may restart a supervisor parked in
    /// [`SupervisorStatus::Exhausted`]. The automatic interval check may
    /// not; everything driven by an external signal may.
    #[must_use]
    pub const fn resets_exhaustion(&self) -> bool {
        !matches!(self, Self::Interval)
    }

    /// Returns the trigger name for logging.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Mount => "mount",
            Self::Resume => "resume",
            Self::Focus => "focus",
            Self::RouteChange => "route_change",
            Self::Interval => "interval",
            Self::Manual => "manual",
        }
    }
}

impl std::fmt::Display for Trigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Observable supervisor state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SupervisorStatus {
    /// Not connected and not currently trying.
    Idle,
    /// A connect attempt (or retry cycle) is in progress.
    Connecting,
    /// The connection is open.
    Connected,
    /// The attempt ceiling was reached; no automatic retries until an
    /// explicit trigger arrives.
    Exhausted,
}

/// Handle to the supervising task.
pub struct Supervisor {
    trigger_tx: mpsc::Sender<Trigger>,
    shutdown_tx: mpsc::Sender<()>,
    status_rx: watch::Receiver<SupervisorStatus>,
    task: Mutex<Option<JoinHandle<()>>>,
}

impl Supervisor {
    /// Spawns the supervising task for the given client and credentials.
    ///
    /// The credentials are reused for every reconnect attempt.
    #[must_use]
    pub fn spawn(client: Arc<WsClient>, credentials: Credentials) -> Self {
        let (trigger_tx, trigger_rx) = mpsc::channel(8);
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);
        let (status_tx, status_rx) = watch::channel(SupervisorStatus::Idle);

        let config = client.config().clone();
        let events_rx = client.subscribe_events();

        let task = SupervisorTask {
            client,
            credentials,
            config,
            status_tx,
            trigger_tx: trigger_tx.clone(),
        };

        let handle = tokio::spawn(task.run(trigger_rx, shutdown_rx, events_rx));

        Self {
            trigger_tx,
            shutdown_tx,
            status_rx,
            task: Mutex::new(Some(handle)),
        }
    }

    /// Requests an `ensure connected` pass.
    ///
    /// Fire-and-forget: when the trigger queue is full the request is
    /// dropped, because an equivalent pass is already pending.
    pub fn nudge(&self, trigger: Trigger) {
        if self.trigger_tx.try_send(trigger).is_err() {
            debug!(trigger = %trigger, "Trigger dropped, supervisor busy");
        }
    }

    /// Returns the current supervisor status.
    #[must_use]
    pub fn status(&self) -> SupervisorStatus {
        *self.status_rx.borrow()
    }

    /// Returns a watch receiver for status changes.
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<SupervisorStatus> {
        self.status_rx.clone()
    }

    /// Stops the supervising task.
    pub async fn shutdown(&self) {
        let _ = self.shutdown_tx.send(()).await;
        let handle = self.task.lock().take();
        if let Some(handle) = handle {
            let _ = handle.await;
        }
    }
}

impl std::fmt::Debug for Supervisor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Supervisor")
            .field("status", &self.status())
            .finish_non_exhaustive()
    }
}

struct SupervisorTask {
    client: Arc<WsClient>,
    credentials: Credentials,
    config: WsConfig,
    status_tx: watch::Sender<SupervisorStatus>,
    trigger_tx: mpsc::Sender<Trigger>,
}

impl SupervisorTask {
    async fn run(
        self,
        mut trigger_rx: mpsc::Receiver<Trigger>,
        mut shutdown_rx: mpsc::Receiver<()>,
        mut events_rx: broadcast::Receiver<ConnectionEvent>,
    ) {
        let mut liveness = interval(self.config.liveness_check_interval());
        liveness.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        liveness.tick().await;

        loop {
            tokio::select! {
                _ = shutdown_rx.recv() => {
                    debug!("Supervisor shutting down");
                    break;
                }

                event = events_rx.recv() => {
                    match event {
                        Ok(ConnectionEvent::Connected) => {
                            self.set_status(SupervisorStatus::Connected);
                        }
                        Ok(ConnectionEvent::Closed { code }) => {
                            if code == NORMAL_CLOSURE {
                                info!("Connection closed normally, not reconnecting");
                                self.set_status(SupervisorStatus::Idle);
                            } else if self.config.reconnect_enabled {
                                warn!(code = code, "Abnormal closure, scheduling reconnect");
                                if self.reconnect_cycle(true, &mut shutdown_rx).await {
                                    break;
                                }
                            } else {
                                self.set_status(SupervisorStatus::Idle);
                            }
                        }
                        // Transport errors alone never reconnect; a Closed
                        // event follows when the connection is actually dead.
                        Ok(ConnectionEvent::Error { .. }) => {}
                        Err(broadcast::error::RecvError::Lagged(missed)) => {
                            warn!(missed = missed, "Supervisor lagged on connection events");
                        }
                        Err(broadcast::error::RecvError::Closed) => {}
                    }
                }

                Some(trigger) = trigger_rx.recv() => {
                    if self.handle_trigger(trigger, &mut shutdown_rx).await {
                        break;
                    }
                }

                _ = liveness.tick() => {
                    if self.handle_trigger(Trigger::Interval, &mut shutdown_rx).await {
                        break;
                    }
                }
            }
        }
    }

    /// Processes one trigger. Returns true if a shutdown was observed.
    async fn handle_trigger(
        &self,
        trigger: Trigger,
        shutdown_rx: &mut mpsc::Receiver<()>,
    ) -> bool {
        if trigger == Trigger::Mount {
            self.schedule_mount_rechecks();
        }

        if self.client.is_connected() {
            return false;
        }

        if *self.status_tx.borrow() == SupervisorStatus::Exhausted {
            if !trigger.resets_exhaustion() {
                return false;
            }
            info!(trigger = %trigger, "Explicit trigger resets exhausted reconnect state");
            self.client.reset_reconnect_attempts();
        }

        debug!(trigger = %trigger, "Liveness trigger requests connection");
        self.reconnect_cycle(false, shutdown_rx).await
    }

    /// Runs connect attempts until connected, exhausted, or shut down.
    /// Returns true if a shutdown was observed.
    ///
    /// `delay_first` distinguishes closure-driven reconnects (which wait a
    /// full delay window before the first attempt) from trigger-driven
    /// ones (which try immediately).
    async fn reconnect_cycle(&self, delay_first: bool, shutdown_rx: &mut mpsc::Receiver<()>) -> bool {
        let mut first = true;

        loop {
            if self.client.is_connected() {
                self.set_status(SupervisorStatus::Connected);
                return false;
            }

            let attempts = self.client.reconnect_attempts();
            if !self.config.should_reconnect(attempts) {
                warn!(
                    attempts = attempts,
                    "Reconnect attempts exhausted, giving up until an explicit trigger"
                );
                self.set_status(SupervisorStatus::Exhausted);
                return false;
            }

            if delay_first || !first {
                let delay = self.config.reconnect_delay_for(attempts);
                tokio::select! {
                    _ = shutdown_rx.recv() => return true,
                    () = sleep(delay) => {}
                }
            }
            first = false;

            self.set_status(SupervisorStatus::Connecting);
            self.client.record_reconnect_attempt();

            match self.client.connect(&self.credentials).await {
                Ok(()) => {
                    info!("Reconnected");
                    self.set_status(SupervisorStatus::Connected);
                    return false;
                }
                Err(e) => {
                    warn!(
                        attempt = self.client.reconnect_attempts(),
                        max_attempts = self.config.max_reconnect_attempts,
                        error = %e,
                        "Connection attempt failed"
                    );
                }
            }
        }
    }

    /// Mount installs two delayed re-checks so a connect already in flight
    /// when the component mounted still gets verified.
    fn schedule_mount_rechecks(&self) {
        for delay in [MOUNT_RECHECK_SHORT, MOUNT_RECHECK_MEDIUM] {
            let trigger_tx = self.trigger_tx.clone();
            tokio::spawn(async move {
                sleep(delay).await;
                let _ = trigger_tx.try_send(Trigger::Interval);
            });
        }
    }

    fn set_status(&self, status: SupervisorStatus) {
        self.status_tx.send_if_modified(|current| {
            if *current == status {
                false
            } else {
                *current = status;
                true
            }
        });
    }
}
