//! Configuration for the notification subsystem, plus the top-level
//! application configuration document.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use umami_gateway::rest::RestConfig;
use umami_gateway::ws::WsConfig;
use umami_telemetry::logging::LogConfig;

/// Configuration for the notification bridges.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NotifyConfig {
    /// How long a new-order alert stays on screen before auto-dismissal.
    #[serde(default = "default_display_duration", with = "humantime_serde")]
    pub display_duration: Duration,

    /// How long a dismissed alert lingers in the exiting state for its
    /// exit transition.
    #[serde(default = "default_exit_duration", with = "humantime_serde")]
    pub exit_duration: Duration,

    /// Interval of the unread-count polling fallback.
    #[serde(default = "default_unread_poll_interval", with = "humantime_serde")]
    pub unread_poll_interval: Duration,

    /// How many unread notifications to fetch when resolving an alert to
    /// its notification record.
    #[serde(default = "default_alert_lookup_limit")]
    pub alert_lookup_limit: u32,

    /// Vibration pattern for new-order feedback, in milliseconds.
    #[serde(default = "default_vibration_pattern")]
    pub vibration_pattern: Vec<u64>,
}

fn default_display_duration() -> Duration {
    Duration::from_secs(5)
}

fn default_exit_duration() -> Duration {
    Duration::from_millis(500)
}

fn default_unread_poll_interval() -> Duration {
    Duration::from_secs(30)
}

fn default_alert_lookup_limit() -> u32 {
    20
}

fn default_vibration_pattern() -> Vec<u64> {
    vec![200, 100, 200]
}

impl Default for NotifyConfig {
    fn default() -> Self {
        Self {
            display_duration: default_display_duration(),
            exit_duration: default_exit_duration(),
            unread_poll_interval: default_unread_poll_interval(),
            alert_lookup_limit: default_alert_lookup_limit(),
            vibration_pattern: default_vibration_pattern(),
        }
    }
}

/// Top-level configuration document for the realtime client.
///
/// Loadable from one YAML/TOML/JSON file through
/// `umami_core::config::ConfigLoader`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UmamiConfig {
    /// WebSocket transport and reconnection settings.
    #[serde(default)]
    pub ws: WsConfig,

    /// REST API settings.
    #[serde(default)]
    pub rest: RestConfig,

    /// Notification bridge settings.
    #[serde(default)]
    pub notify: NotifyConfig,

    /// Logging settings.
    #[serde(default)]
    pub log: LogConfig,
}

#[cfg(test)]
mod tests {
    use super::*;
    use umami_core::config::{ConfigFormat, ConfigLoader};

    #[test]
    fn test_notify_defaults() {
        let config = NotifyConfig::default();
        assert_eq!(config.display_duration, Duration::from_secs(5));
        assert_eq!(config.exit_duration, Duration::from_millis(500));
        assert_eq!(config.alert_lookup_limit, 20);
        assert_eq!(config.vibration_pattern, vec![200, 100, 200]);
    }

    #[test]
    fn test_humantime_durations() {
        let yaml = r"
display_duration: 8s
exit_duration: 250ms
unread_poll_interval: 1m
";
        let loader = ConfigLoader::new();
        let config: NotifyConfig = loader.load_str(yaml, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.display_duration, Duration::from_secs(8));
        assert_eq!(config.exit_duration, Duration::from_millis(250));
        assert_eq!(config.unread_poll_interval, Duration::from_secs(60));
    }

    #[test]
    fn test_full_document() {
        let yaml = r"
ws:
  endpoint: wss://umami.example/ws/orders/
  reconnect_delay_ms: 3000
rest:
  base_url: https://umami.example/api
notify:
  display_duration: 5s
log:
  level: debug
";
        let loader = ConfigLoader::new();
        let config: UmamiConfig = loader.load_str(yaml, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.ws.endpoint, "wss://umami.example/ws/orders/");
        assert_eq!(config.rest.base_url, "https://umami.example/api");
        assert_eq!(config.log.level, "debug");
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let loader = ConfigLoader::new();
        let config: UmamiConfig = loader.load_str("{}", ConfigFormat::Json).unwrap();
        assert!(config.ws.endpoint.is_empty());
        assert_eq!(config.notify.display_duration, Duration::from_secs(5));
    }
}
