//! WebSocket client configuration and credentials.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use umami_core::types::{AuthToken, TemporaryId, ValidationError};

/// Credentials for the realtime endpoint.
///
/// The endpoint authenticates through a query parameter: registered users
/// pass their session token, guests pass the tracking identifier issued
/// with their order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Credentials {
    /// Authenticated user session token (`?token=...`).
    Token(AuthToken),
    /// Guest order tracking identifier (`?temporary_id=...`).
    Guest(TemporaryId),
}

impl Credentials {
    /// Creates token credentials from a raw string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyAuthToken` if the string is empty.
    pub fn token(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Token(AuthToken::new(value)?))
    }

    /// Creates guest credentials from a raw string.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::EmptyTemporaryId` if the string is empty.
    pub fn guest(value: impl Into<String>) -> Result<Self, ValidationError> {
        Ok(Self::Guest(TemporaryId::new(value)?))
    }

    /// Returns the query parameter name for this credential kind.
    #[must_use]
    pub const fn query_key(&self) -> &'static str {
        match self {
            Self::Token(_) => "token",
            Self::Guest(_) => "temporary_id",
        }
    }

    /// Builds the connection URL for the given endpoint by appending the
    /// credential query parameter.
    #[must_use]
    pub fn apply_to(&self, endpoint: &str) -> String {
        let separator = if endpoint.contains('?') { '&' } else { '?' };
        let value = match self {
            Self::Token(token) => token.expose(),
            Self::Guest(id) => id.as_str(),
        };
        format!("{endpoint}{separator}{}={value}", self.query_key())
    }
}

/// Configuration for the WebSocket client.
///
/// Contains connection settings, reconnection parameters, and keepalive
/// configuration. Defaults reproduce the production behavior: a fixed 3
/// second reconnect interval bounded at 5 attempts, with backoff available
/// by raising `backoff_multiplier` above 1.0.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WsConfig {
    /// Realtime endpoint URL (credentials are appended at connect time).
    pub endpoint: String,

    /// Connection timeout in milliseconds.
    #[serde(default = "default_connect_timeout_ms")]
    pub connect_timeout_ms: u64,

    /// Whether automatic reconnection is enabled.
    #[serde(default = "default_reconnect_enabled")]
    pub reconnect_enabled: bool,

    /// Maximum number of reconnection attempts (0 = unlimited).
    #[serde(default = "default_max_reconnect_attempts")]
    pub max_reconnect_attempts: u32,

    /// Reconnection delay in milliseconds.
    #[serde(default = "default_reconnect_delay_ms")]
    pub reconnect_delay_ms: u64,

    /// Maximum reconnection delay in milliseconds (caps backoff growth).
    #[serde(default = "default_max_reconnect_delay_ms")]
    pub max_reconnect_delay_ms: u64,

    /// Backoff multiplier applied per attempt. 1.0 keeps the interval fixed.
    #[serde(default = "default_backoff_multiplier")]
    pub backoff_multiplier: f64,

    /// Keepalive ping interval in milliseconds.
    #[serde(default = "default_heartbeat_interval_ms")]
    pub heartbeat_interval_ms: u64,

    /// Whether to send keepalive pings automatically.
    #[serde(default = "default_auto_ping")]
    pub auto_ping: bool,

    /// Liveness check interval for the supervisor, in milliseconds.
    #[serde(default = "default_liveness_check_interval_ms")]
    pub liveness_check_interval_ms: u64,

    /// Whether `disconnect()` also clears the listener registry.
    ///
    /// Disconnecting has always wiped every subscription along with the
    /// transport; this flag keeps that behavior explicit and overridable.
    #[serde(default = "default_clear_listeners_on_disconnect")]
    pub clear_listeners_on_disconnect: bool,
}

fn default_connect_timeout_ms() -> u64 {
    10_000
}

fn default_reconnect_enabled() -> bool {
    true
}

fn default_max_reconnect_attempts() -> u32 {
    5
}

fn default_reconnect_delay_ms() -> u64 {
    3_000
}

fn default_max_reconnect_delay_ms() -> u64 {
    60_000
}

fn default_backoff_multiplier() -> f64 {
    1.0
}

fn default_heartbeat_interval_ms() -> u64 {
    30_000
}

fn default_auto_ping() -> bool {
    true
}

fn default_liveness_check_interval_ms() -> u64 {
    5_000
}

fn default_clear_listeners_on_disconnect() -> bool {
    true
}

impl Default for WsConfig {
    fn default() -> Self {
        Self {
            endpoint: String::new(),
            connect_timeout_ms: default_connect_timeout_ms(),
            reconnect_enabled: default_reconnect_enabled(),
            max_reconnect_attempts: default_max_reconnect_attempts(),
            reconnect_delay_ms: default_reconnect_delay_ms(),
            max_reconnect_delay_ms: default_max_reconnect_delay_ms(),
            backoff_multiplier: default_backoff_multiplier(),
            heartbeat_interval_ms: default_heartbeat_interval_ms(),
            auto_ping: default_auto_ping(),
            liveness_check_interval_ms: default_liveness_check_interval_ms(),
            clear_listeners_on_disconnect: default_clear_listeners_on_disconnect(),
        }
    }
}

impl WsConfig {
    /// Creates a new builder for `WsConfig`.
    #[must_use]
    pub fn builder() -> WsConfigBuilder {
        WsConfigBuilder::default()
    }

    /// Returns the connection timeout as a Duration.
    #[must_use]
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_millis(self.connect_timeout_ms)
    }

    /// Returns the base reconnect delay as a Duration.
    #[must_use]
    pub fn reconnect_delay(&self) -> Duration {
        Duration::from_millis(self.reconnect_delay_ms)
    }

    /// Returns the keepalive interval as a Duration.
    #[must_use]
    pub fn heartbeat_interval(&self) -> Duration {
        Duration::from_millis(self.heartbeat_interval_ms)
    }

    /// Returns the supervisor liveness check interval as a Duration.
    #[must_use]
    pub fn liveness_check_interval(&self) -> Duration {
        Duration::from_millis(self.liveness_check_interval_ms)
    }

    /// Calculates the reconnect delay for a given attempt (0-indexed).
    ///
    /// With the default multiplier of 1.0 this is a fixed interval; larger
    /// multipliers grow exponentially, capped at `max_reconnect_delay_ms`.
    #[must_use]
    #[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn reconnect_delay_for(&self, attempt: u32) -> Duration {
        let delay = self.reconnect_delay_ms as f64 * self.backoff_multiplier.powi(attempt as i32);
        let capped = delay.min(self.max_reconnect_delay_ms as f64) as u64;
        Duration::from_millis(capped)
    }

    /// Returns whether another reconnection attempt should be made.
    #[must_use]
    pub fn should_reconnect(&self, attempt: u32) -> bool {
        self.reconnect_enabled
            && (self.max_reconnect_attempts == 0 || attempt < self.max_reconnect_attempts)
    }
}

/// Builder for `WsConfig`.
#[derive(Debug, Default)]
pub struct WsConfigBuilder {
    endpoint: Option<String>,
    connect_timeout_ms: Option<u64>,
    reconnect_enabled: Option<bool>,
    max_reconnect_attempts: Option<u32>,
    reconnect_delay_ms: Option<u64>,
    max_reconnect_delay_ms: Option<u64>,
    backoff_multiplier: Option<f64>,
    heartbeat_interval_ms: Option<u64>,
    auto_ping: Option<bool>,
    liveness_check_interval_ms: Option<u64>,
    clear_listeners_on_disconnect: Option<bool>,
}

impl WsConfigBuilder {
    /// Sets the realtime endpoint URL.
    #[must_use]
    pub fn endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    /// Sets the connection timeout.
    #[must_use]
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout_ms = Some(timeout.as_millis() as u64);
        self
    }

    /// Sets whether reconnection is enabled.
    #[must_use]
    pub fn reconnect_enabled(mut self, enabled: bool) -> Self {
        self.reconnect_enabled = Some(enabled);
        self
    }

    /// Sets the maximum reconnection attempts.
    #[must_use]
    pub fn max_reconnect_attempts(mut self, attempts: u32) -> Self {
        self.max_reconnect_attempts = Some(attempts);
        self
    }

    /// Sets the reconnection delay.
    #[must_use]
    pub fn reconnect_delay(mut self, delay: Duration) -> Self {
        self.reconnect_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    /// Sets the maximum reconnection delay.
    #[must_use]
    pub fn max_reconnect_delay(mut self, delay: Duration) -> Self {
        self.max_reconnect_delay_ms = Some(delay.as_millis() as u64);
        self
    }

    /// Sets the backoff multiplier.
    #[must_use]
    pub fn backoff_multiplier(mut self, multiplier: f64) -> Self {
        self.backoff_multiplier = Some(multiplier);
        self
    }

    /// Sets the keepalive interval.
    #[must_use]
    pub fn heartbeat_interval(mut self, interval: Duration) -> Self {
        self.heartbeat_interval_ms = Some(interval.as_millis() as u64);
        self
    }

    /// Sets whether keepalive pings are sent automatically.
    #[must_use]
    pub fn auto_ping(mut self, enabled: bool) -> Self {
        self.auto_ping = Some(enabled);
        self
    }

    /// Sets the supervisor liveness check interval.
    #[must_use]
    pub fn liveness_check_interval(mut self, interval: Duration) -> Self {
        self.liveness_check_interval_ms = Some(interval.as_millis() as u64);
        self
    }

    /// Sets whether `disconnect()` clears the listener registry.
    #[must_use]
    pub fn clear_listeners_on_disconnect(mut self, clear: bool) -> Self {
        self.clear_listeners_on_disconnect = Some(clear);
        self
    }

    /// Builds the `WsConfig`.
    #[must_use]
    pub fn build(self) -> WsConfig {
        WsConfig {
            endpoint: self.endpoint.unwrap_or_default(),
            connect_timeout_ms: self
                .connect_timeout_ms
                .unwrap_or_else(default_connect_timeout_ms),
            reconnect_enabled: self
                .reconnect_enabled
                .unwrap_or_else(default_reconnect_enabled),
            max_reconnect_attempts: self
                .max_reconnect_attempts
                .unwrap_or_else(default_max_reconnect_attempts),
            reconnect_delay_ms: self
                .reconnect_delay_ms
                .unwrap_or_else(default_reconnect_delay_ms),
            max_reconnect_delay_ms: self
                .max_reconnect_delay_ms
                .unwrap_or_else(default_max_reconnect_delay_ms),
            backoff_multiplier: self
                .backoff_multiplier
                .unwrap_or_else(default_backoff_multiplier),
            heartbeat_interval_ms: self
                .heartbeat_interval_ms
                .unwrap_or_else(default_heartbeat_interval_ms),
            auto_ping: self.auto_ping.unwrap_or_else(default_auto_ping),
            liveness_check_interval_ms: self
                .liveness_check_interval_ms
                .unwrap_or_else(default_liveness_check_interval_ms),
            clear_listeners_on_disconnect: self
                .clear_listeners_on_disconnect
                .unwrap_or_else(default_clear_listeners_on_disconnect),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_builder() {
        let config = WsConfig::builder()
            .endpoint("wss://umami.example/ws/orders/")
            .connect_timeout(Duration::from_secs(15))
            .reconnect_enabled(true)
            .max_reconnect_attempts(5)
            .build();

        assert_eq!(config.endpoint, "wss://umami.example/ws/orders/");
        assert_eq!(config.connect_timeout(), Duration::from_secs(15));
        assert!(config.reconnect_enabled);
        assert_eq!(config.max_reconnect_attempts, 5);
    }

    #[test]
    fn test_config_defaults() {
        let config = WsConfig::default();

        assert!(config.endpoint.is_empty());
        assert_eq!(config.connect_timeout_ms, 10_000);
        assert!(config.reconnect_enabled);
        assert_eq!(config.max_reconnect_attempts, 5);
        assert_eq!(config.reconnect_delay_ms, 3_000);
        assert!((config.backoff_multiplier - 1.0).abs() < f64::EPSILON);
        assert!(config.auto_ping);
        assert!(config.clear_listeners_on_disconnect);
    }

    #[test]
    fn test_fixed_interval_delay() {
        let config = WsConfig::default();

        // Multiplier 1.0 keeps every attempt at the base delay.
        assert_eq!(config.reconnect_delay_for(0), Duration::from_secs(3));
        assert_eq!(config.reconnect_delay_for(1), Duration::from_secs(3));
        assert_eq!(config.reconnect_delay_for(4), Duration::from_secs(3));
    }

    #[test]
    fn test_exponential_backoff_opt_in() {
        let config = WsConfig::builder()
            .reconnect_delay(Duration::from_secs(1))
            .max_reconnect_delay(Duration::from_secs(60))
            .backoff_multiplier(2.0)
            .build();

        assert_eq!(config.reconnect_delay_for(0), Duration::from_secs(1));
        assert_eq!(config.reconnect_delay_for(1), Duration::from_secs(2));
        assert_eq!(config.reconnect_delay_for(2), Duration::from_secs(4));
        // Capped at max
        assert_eq!(config.reconnect_delay_for(10), Duration::from_secs(60));
    }

    #[test]
    fn test_should_reconnect() {
        let config = WsConfig::builder()
            .reconnect_enabled(true)
            .max_reconnect_attempts(3)
            .build();

        assert!(config.should_reconnect(0));
        assert!(config.should_reconnect(2));
        assert!(!config.should_reconnect(3));

        let unlimited = WsConfig::builder().max_reconnect_attempts(0).build();
        assert!(unlimited.should_reconnect(100));

        let disabled = WsConfig::builder().reconnect_enabled(false).build();
        assert!(!disabled.should_reconnect(0));
    }

    #[test]
    fn test_credentials_apply_to() {
        let creds = Credentials::token("9c1185a5c5e9fc54").unwrap();
        assert_eq!(
            creds.apply_to("ws://127.0.0.1:8000/ws/orders/"),
            "ws://127.0.0.1:8000/ws/orders/?token=9c1185a5c5e9fc54"
        );

        let guest = Credentials::guest("guest-8f3a").unwrap();
        assert_eq!(
            guest.apply_to("ws://h/ws/guest-orders/?v=2"),
            "ws://h/ws/guest-orders/?v=2&temporary_id=guest-8f3a"
        );
    }

    #[test]
    fn test_credentials_validation() {
        assert!(Credentials::token("").is_err());
        assert!(Credentials::guest("").is_err());
    }

    #[test]
    fn test_config_serde_roundtrip() {
        let config = WsConfig::builder()
            .endpoint("wss://umami.example/ws/orders/")
            .reconnect_delay(Duration::from_secs(2))
            .build();

        let json = serde_json::to_string(&config).unwrap();
        let parsed: WsConfig = serde_json::from_str(&json).unwrap();

        assert_eq!(config.endpoint, parsed.endpoint);
        assert_eq!(config.reconnect_delay_ms, parsed.reconnect_delay_ms);
    }
}
