//! WebSocket client with keepalive and dispatcher-backed fan-out.
//!
//! The client owns the single transport handle. Reconnection policy lives
//! in the [`super::supervisor`]; the client's job ends at reporting
//! closures through its event channel.

use futures::stream::{SplitSink, SplitStream};
use futures::{SinkExt, StreamExt};
use parking_lot::{Mutex, RwLock};
use std::sync::Arc;
use tokio::net::TcpStream;
use tokio::sync::{broadcast, mpsc};
use tokio::time::{interval, timeout};
use tokio_tungstenite::tungstenite::protocol::Message as TungsteniteMessage;
use tokio_tungstenite::{connect_async, MaybeTlsStream, WebSocketStream};
use tracing::{debug, error, info, warn};

use umami_core::error::NetworkError;
use umami_core::types::Timestamp;
use umami_telemetry::masking::SensitiveDataMasker;

use super::config::{Credentials, WsConfig};
use super::dispatcher::EventDispatcher;
use super::message::{event_type, Envelope};
use super::state::{ConnectionState, InternalState, ABNORMAL_CLOSURE, NORMAL_CLOSURE};

type WsStream = WebSocketStream<MaybeTlsStream<TcpStream>>;
type WsSink = SplitSink<WsStream, TungsteniteMessage>;
type WsSource = SplitStream<WsStream>;

/// Connection lifecycle events observable by the supervisor and bridges.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConnectionEvent {
    /// The transport opened successfully.
    Connected,
    /// The transport closed with the given close code.
    Closed {
        /// WebSocket close code (1000 = intentional).
        code: u16,
    },
    /// A transport-level error occurred. Errors alone never schedule
    /// reconnection; a `Closed` event follows when the connection is dead.
    Error {
        /// Error description.
        reason: String,
    },
}

/// WebSocket client for the realtime order channel.
///
/// # Features
///
/// - Single shared transport handle with explicit connect/disconnect
/// - Inbound frames decoded and fanned out through an [`EventDispatcher`]
/// - Keepalive pings on the configured interval
/// - Lifecycle events exposed on a broadcast channel
///
/// Cheap to share: wrap in an `Arc` and hand clones to the supervisor and
/// bridges.
pub struct WsClient {
    config: WsConfig,
    state: Arc<RwLock<InternalState>>,
    dispatcher: Arc<EventDispatcher>,
    send_tx: Mutex<Option<mpsc::Sender<Envelope>>>,
    shutdown_tx: Mutex<Option<mpsc::Sender<()>>>,
    events_tx: broadcast::Sender<ConnectionEvent>,
}

impl WsClient {
    /// Creates a new client with the given configuration.
    #[must_use]
    pub fn new(config: WsConfig) -> Self {
        let (events_tx, _) = broadcast::channel(32);
        Self {
            config,
            state: Arc::new(RwLock::new(InternalState::new())),
            dispatcher: Arc::new(EventDispatcher::new()),
            send_tx: Mutex::new(None),
            shutdown_tx: Mutex::new(None),
            events_tx,
        }
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &WsConfig {
        &self.config
    }

    /// Returns the dispatcher bridges subscribe through.
    #[must_use]
    pub fn dispatcher(&self) -> Arc<EventDispatcher> {
        Arc::clone(&self.dispatcher)
    }

    /// Subscribes to connection lifecycle events.
    #[must_use]
    pub fn subscribe_events(&self) -> broadcast::Receiver<ConnectionEvent> {
        self.events_tx.subscribe()
    }

    /// Returns the current connection state.
    #[must_use]
    pub fn state(&self) -> ConnectionState {
        self.state.read().state
    }

    /// Returns whether the client is connected.
    #[must_use]
    pub fn is_connected(&self) -> bool {
        self.state.read().state.is_connected()
    }

    /// Returns the number of reconnection attempts since the last open.
    #[must_use]
    pub fn reconnect_attempts(&self) -> u32 {
        self.state.read().reconnect_attempts
    }

    /// Marks the start of a reconnection attempt, incrementing the counter.
    pub(crate) fn record_reconnect_attempt(&self) {
        self.state.write().mark_reconnecting();
    }

    /// Resets the reconnect-attempt counter without opening a connection.
    pub(crate) fn reset_reconnect_attempts(&self) {
        self.state.write().reconnect_attempts = 0;
    }

    /// Connects to the realtime endpoint with the given credentials.
    ///
    /// A no-op when already connected. Any prior handle is replaced; the
    /// task serving it shuts down when its channels are dropped. On
    /// successful open the reconnect-attempt counter resets to zero.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the connection cannot be established
    /// within the configured timeout.
    pub async fn connect(&self, credentials: &Credentials) -> Result<(), NetworkError> {
        if self.is_connected() {
            return Ok(());
        }

        self.state.write().state = ConnectionState::Connecting;

        let url = credentials.apply_to(&self.config.endpoint);

        let connect_result = timeout(self.config.connect_timeout(), connect_async(&url)).await;

        let (ws_stream, _) = match connect_result {
            Err(_) => {
                self.state.write().mark_disconnected(ABNORMAL_CLOSURE);
                return Err(NetworkError::Timeout {
                    timeout_ms: self.config.connect_timeout_ms,
                });
            }
            Ok(Err(e)) => {
                self.state.write().mark_disconnected(ABNORMAL_CLOSURE);
                return Err(NetworkError::ConnectionFailed {
                    reason: e.to_string(),
                });
            }
            Ok(Ok(pair)) => pair,
        };

        self.setup_connection(ws_stream);
        self.state.write().mark_connected();
        let _ = self.events_tx.send(ConnectionEvent::Connected);

        info!(
            endpoint = %SensitiveDataMasker::new().mask_text(&url),
            "WebSocket connected"
        );

        Ok(())
    }

    /// Disconnects with a normal closure.
    ///
    /// When `clear_listeners_on_disconnect` is set (the default) this also
    /// wipes the listener registry, so every subscriber must re-register
    /// after a later connect.
    pub async fn disconnect(&self) {
        let shutdown_tx = self.shutdown_tx.lock().take();
        if let Some(shutdown_tx) = shutdown_tx {
            let _ = shutdown_tx.send(()).await;
        }

        *self.send_tx.lock() = None;
        self.state.write().mark_closed();

        if self.config.clear_listeners_on_disconnect {
            self.dispatcher.clear();
        }

        let _ = self.events_tx.send(ConnectionEvent::Closed {
            code: NORMAL_CLOSURE,
        });

        info!("WebSocket disconnected");
    }

    /// Sends a `{type, payload}` envelope to the server.
    ///
    /// Messages are transmitted only while the connection is open. There is
    /// no queuing: sending while closed returns `ConnectionClosed` and the
    /// message is dropped.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the connection is not open or the payload
    /// cannot be serialized.
    pub async fn send(
        &self,
        kind: &str,
        payload: impl serde::Serialize,
    ) -> Result<(), NetworkError> {
        if !self.is_connected() {
            warn!(event_type = %kind, "Dropping outbound message: not connected");
            return Err(NetworkError::ConnectionClosed {
                reason: "Not connected".to_string(),
            });
        }

        let send_tx = self.send_tx.lock().clone();
        let Some(send_tx) = send_tx else {
            warn!(event_type = %kind, "Dropping outbound message: no transport handle");
            return Err(NetworkError::ConnectionClosed {
                reason: "Not connected".to_string(),
            });
        };

        let envelope = Envelope::new(kind, payload).map_err(|e| NetworkError::WebSocket {
            reason: format!("Failed to serialize message: {e}"),
        })?;

        send_tx
            .send(envelope)
            .await
            .map_err(|_| NetworkError::ConnectionClosed {
                reason: "Send channel closed".to_string(),
            })
    }

    fn setup_connection(&self, ws_stream: WsStream) {
        let (sink, stream) = ws_stream.split();

        let (send_tx, send_rx) = mpsc::channel::<Envelope>(100);
        let (shutdown_tx, shutdown_rx) = mpsc::channel::<()>(1);

        // Replacing the old senders drops them; the previous connection
        // task observes its shutdown channel closing and exits.
        *self.send_tx.lock() = Some(send_tx);
        *self.shutdown_tx.lock() = Some(shutdown_tx);

        tokio::spawn(Self::run_connection(
            sink,
            stream,
            send_rx,
            shutdown_rx,
            Arc::clone(&self.state),
            Arc::clone(&self.dispatcher),
            self.events_tx.clone(),
            self.config.clone(),
        ));
    }

    #[allow(clippy::too_many_lines, clippy::too_many_arguments)]
    async fn run_connection(
        mut sink: WsSink,
        mut stream: WsSource,
        mut send_rx: mpsc::Receiver<Envelope>,
        mut shutdown_rx: mpsc::Receiver<()>,
        state: Arc<RwLock<InternalState>>,
        dispatcher: Arc<EventDispatcher>,
        events_tx: broadcast::Sender<ConnectionEvent>,
        config: WsConfig,
    ) {
        let mut heartbeat = interval(config.heartbeat_interval());
        heartbeat.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);
        // The first tick of a tokio interval fires immediately.
        heartbeat.tick().await;

        loop {
            tokio::select! {
                // Shutdown: an explicit disconnect, or the handle was
                // replaced and our sender side dropped.
                _ = shutdown_rx.recv() => {
                    debug!("Shutdown signal received");
                    let _ = sink.close().await;
                    break;
                }

                // Outbound messages
                Some(envelope) = send_rx.recv() => {
                    let text = match envelope.encode() {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode outbound message");
                            continue;
                        }
                    };
                    if let Err(e) = sink.send(TungsteniteMessage::Text(text)).await {
                        error!(error = %e, "Failed to send message");
                        let _ = events_tx.send(ConnectionEvent::Error {
                            reason: e.to_string(),
                        });
                    }
                }

                // Inbound frames
                frame = stream.next() => {
                    match frame {
                        Some(Ok(TungsteniteMessage::Text(text))) => {
                            state.write().record_message();
                            match Envelope::decode(&text) {
                                Ok(envelope) => {
                                    if envelope.kind == event_type::PONG {
                                        state.write().record_pong();
                                        debug!("Pong received");
                                    } else {
                                        dispatcher.dispatch(&envelope);
                                    }
                                }
                                Err(e) => {
                                    warn!(error = %e, "Dropping undecodable frame");
                                }
                            }
                        }
                        Some(Ok(TungsteniteMessage::Ping(data))) => {
                            if let Err(e) = sink.send(TungsteniteMessage::Pong(data)).await {
                                warn!(error = %e, "Failed to answer protocol ping");
                            }
                        }
                        Some(Ok(TungsteniteMessage::Pong(_))) => {
                            state.write().record_pong();
                        }
                        Some(Ok(TungsteniteMessage::Close(close_frame))) => {
                            let code = close_frame
                                .map_or(ABNORMAL_CLOSURE, |f| u16::from(f.code));
                            info!(code = code, "Server closed connection");
                            state.write().mark_disconnected(code);
                            let _ = events_tx.send(ConnectionEvent::Closed { code });
                            break;
                        }
                        Some(Ok(_)) => {
                            debug!("Ignoring non-text frame");
                        }
                        Some(Err(e)) => {
                            error!(error = %e, "WebSocket error");
                            state.write().mark_disconnected(ABNORMAL_CLOSURE);
                            let _ = events_tx.send(ConnectionEvent::Error {
                                reason: e.to_string(),
                            });
                            let _ = events_tx.send(ConnectionEvent::Closed {
                                code: ABNORMAL_CLOSURE,
                            });
                            break;
                        }
                        None => {
                            info!("Stream ended without close handshake");
                            state.write().mark_disconnected(ABNORMAL_CLOSURE);
                            let _ = events_tx.send(ConnectionEvent::Closed {
                                code: ABNORMAL_CLOSURE,
                            });
                            break;
                        }
                    }
                }

                // Keepalive: a failed ping is evidence of a dead connection.
                _ = heartbeat.tick() => {
                    if !config.auto_ping {
                        continue;
                    }
                    let ping = Envelope::ping(Timestamp::now());
                    let text = match ping.encode() {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(error = %e, "Failed to encode keepalive ping");
                            continue;
                        }
                    };
                    state.write().record_ping();
                    if let Err(e) = sink.send(TungsteniteMessage::Text(text)).await {
                        warn!(error = %e, "Keepalive ping failed, treating connection as dead");
                        state.write().mark_disconnected(ABNORMAL_CLOSURE);
                        let _ = events_tx.send(ConnectionEvent::Closed {
                            code: ABNORMAL_CLOSURE,
                        });
                        break;
                    }
                    debug!("Keepalive ping sent");
                }
            }
        }
    }
}

impl std::fmt::Debug for WsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WsClient")
            .field("endpoint", &self.config.endpoint)
            .field("state", &self.state())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> WsClient {
        WsClient::new(
            WsConfig::builder()
                .endpoint("ws://127.0.0.1:1/ws/orders/")
                .connect_timeout(std::time::Duration::from_millis(200))
                .build(),
        )
    }

    #[test]
    fn test_client_creation() {
        let client = test_client();
        assert!(!client.is_connected());
        assert_eq!(client.state(), ConnectionState::Disconnected);
        assert_eq!(client.reconnect_attempts(), 0);
    }

    #[tokio::test]
    async fn test_send_while_disconnected_never_transmits() {
        let client = test_client();
        let result = client
            .send(event_type::PING, serde_json::json!({"timestamp": 1}))
            .await;

        assert!(matches!(
            result,
            Err(NetworkError::ConnectionClosed { .. })
        ));
    }

    #[tokio::test]
    async fn test_connect_failure_surfaces_error() {
        let client = test_client();
        let credentials = Credentials::token("9c1185a5c5e9fc54").unwrap();

        let result = client.connect(&credentials).await;
        assert!(result.is_err());
        assert_eq!(client.state(), ConnectionState::Disconnected);
    }

    #[tokio::test]
    async fn test_disconnect_clears_listeners_by_default() {
        let client = test_client();
        client.dispatcher().on(event_type::NEW_ORDER, |_| Ok(()));
        assert_eq!(client.dispatcher().listener_count(event_type::NEW_ORDER), 1);

        client.disconnect().await;

        assert!(client.dispatcher().is_empty());
        assert_eq!(client.state(), ConnectionState::Closed);
    }

    #[tokio::test]
    async fn test_disconnect_keeps_listeners_when_policy_disabled() {
        let client = WsClient::new(
            WsConfig::builder()
                .endpoint("ws://127.0.0.1:1/ws/orders/")
                .clear_listeners_on_disconnect(false)
                .build(),
        );
        client.dispatcher().on(event_type::NEW_ORDER, |_| Ok(()));

        client.disconnect().await;

        assert_eq!(client.dispatcher().listener_count(event_type::NEW_ORDER), 1);
    }

    #[tokio::test]
    async fn test_disconnect_emits_normal_closure() {
        let client = test_client();
        let mut events = client.subscribe_events();

        client.disconnect().await;

        assert_eq!(
            events.recv().await.unwrap(),
            ConnectionEvent::Closed {
                code: NORMAL_CLOSURE
            }
        );
    }

    #[test]
    fn test_record_reconnect_attempt_increments() {
        let client = test_client();
        client.record_reconnect_attempt();
        client.record_reconnect_attempt();
        assert_eq!(client.reconnect_attempts(), 2);
        assert_eq!(client.state(), ConnectionState::Reconnecting);
    }
}
