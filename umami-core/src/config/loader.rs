//! Configuration loader supporting YAML, TOML, and JSON formats.

use crate::error::ConfigError;
use serde::de::DeserializeOwned;
use std::path::Path;

/// Supported configuration file formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ConfigFormat {
    /// YAML format (.yaml, .yml)
    #[default]
    Yaml,
    /// TOML format (.toml)
    Toml,
    /// JSON format (.json)
    Json,
}

impl ConfigFormat {
    /// Detects the format from a file extension.
    ///
    /// Returns `None` if the extension is not recognized.
    #[must_use]
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|ext| ext.to_str())
            .and_then(|ext| match ext.to_lowercase().as_str() {
                "yaml" | "yml" => Some(Self::Yaml),
                "toml" => Some(Self::Toml),
                "json" => Some(Self::Json),
                _ => None,
            })
    }

    /// Returns the file extension for this format.
    #[must_use]
    pub const fn extension(&self) -> &'static str {
        match self {
            Self::Yaml => "yaml",
            Self::Toml => "toml",
            Self::Json => "json",
        }
    }
}

/// Configuration loader with support for multiple formats and environment
/// overrides.
///
/// # Example
///
/// ```rust,ignore
/// use umami_core::config::ConfigLoader;
///
/// let config: UmamiConfig = ConfigLoader::new()
///     .with_env_prefix("UMAMI")
///     .load_file("umami.yaml")?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct ConfigLoader {
    /// Environment variable prefix for overrides.
    env_prefix: Option<String>,
}

impl ConfigLoader {
    /// Creates a new configuration loader.
    #[must_use]
    pub fn new() -> Self {
        Self { env_prefix: None }
    }

    /// Sets the environment variable prefix for overrides.
    #[must_use]
    pub fn with_env_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.env_prefix = Some(prefix.into());
        self
    }

    /// Returns the environment variable prefix, if set.
    #[must_use]
    pub fn env_prefix(&self) -> Option<&str> {
        self.env_prefix.as_deref()
    }

    /// Loads configuration from a file.
    ///
    /// The format is automatically detected from the file extension.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, the extension is not
    /// recognized, or the content cannot be parsed.
    pub fn load_file<T, P>(&self, path: P) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
        P: AsRef<Path>,
    {
        let path = path.as_ref();
        let format = ConfigFormat::from_path(path).ok_or_else(|| ConfigError::InvalidFormat {
            path: path.display().to_string(),
            reason: "Unrecognized file extension. Supported: .yaml, .yml, .toml, .json".to_string(),
        })?;

        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::FileReadError {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;

        self.load_str(&content, format)
    }

    /// Loads configuration from a string with the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if the content cannot be parsed.
    pub fn load_str<T>(&self, content: &str, format: ConfigFormat) -> Result<T, ConfigError>
    where
        T: DeserializeOwned,
    {
        let config: T = match format {
            ConfigFormat::Yaml => {
                serde_yaml::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("YAML parse error: {e}"),
                })?
            }
            ConfigFormat::Toml => {
                toml::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("TOML parse error: {e}"),
                })?
            }
            ConfigFormat::Json => {
                serde_json::from_str(content).map_err(|e| ConfigError::InvalidFormat {
                    path: "<string>".to_string(),
                    reason: format!("JSON parse error: {e}"),
                })?
            }
        };

        Ok(config)
    }

    /// Serializes a configuration to a string in the specified format.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn serialize<T>(config: &T, format: ConfigFormat) -> Result<String, ConfigError>
    where
        T: serde::Serialize,
    {
        match format {
            ConfigFormat::Yaml => {
                serde_yaml::to_string(config).map_err(|e| ConfigError::InvalidFormat {
                    path: "<serialize>".to_string(),
                    reason: format!("YAML serialization error: {e}"),
                })
            }
            ConfigFormat::Toml => {
                toml::to_string_pretty(config).map_err(|e| ConfigError::InvalidFormat {
                    path: "<serialize>".to_string(),
                    reason: format!("TOML serialization error: {e}"),
                })
            }
            ConfigFormat::Json => {
                serde_json::to_string_pretty(config).map_err(|e| ConfigError::InvalidFormat {
                    path: "<serialize>".to_string(),
                    reason: format!("JSON serialization error: {e}"),
                })
            }
        }
    }
}

/// Merges two configurations, with the second taking precedence.
///
/// Useful for layered configuration (defaults + user config + overrides).
pub fn merge_configs<T>(base: T, overlay: T) -> T
where
    T: serde::Serialize + DeserializeOwned,
{
    let base_value = serde_json::to_value(&base).unwrap_or(serde_json::Value::Null);
    let overlay_value = serde_json::to_value(&overlay).unwrap_or(serde_json::Value::Null);

    let merged = merge_json_values(base_value, overlay_value);

    serde_json::from_value(merged).unwrap_or(base)
}

/// Recursively merges two JSON values.
fn merge_json_values(base: serde_json::Value, overlay: serde_json::Value) -> serde_json::Value {
    use serde_json::Value;

    match (base, overlay) {
        (Value::Object(mut base_map), Value::Object(overlay_map)) => {
            for (key, overlay_val) in overlay_map {
                let merged_val = if let Some(base_val) = base_map.remove(&key) {
                    merge_json_values(base_val, overlay_val)
                } else {
                    overlay_val
                };
                base_map.insert(key, merged_val);
            }
            Value::Object(base_map)
        }
        (_, overlay) => overlay,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::{Deserialize, Serialize};

    #[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
    struct TestConfig {
        endpoint: String,
        #[serde(default)]
        reconnect_delay_ms: u64,
        #[serde(skip_serializing_if = "Option::is_none")]
        token: Option<String>,
    }

    #[test]
    fn test_format_detection() {
        assert_eq!(
            ConfigFormat::from_path(Path::new("umami.yaml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("umami.yml")),
            Some(ConfigFormat::Yaml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("umami.toml")),
            Some(ConfigFormat::Toml)
        );
        assert_eq!(
            ConfigFormat::from_path(Path::new("umami.json")),
            Some(ConfigFormat::Json)
        );
        assert_eq!(ConfigFormat::from_path(Path::new("umami.txt")), None);
        assert_eq!(ConfigFormat::from_path(Path::new("umami")), None);
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r"
endpoint: ws://127.0.0.1:8000/ws/orders/
reconnect_delay_ms: 3000
";
        let loader = ConfigLoader::new();
        let config: TestConfig = loader.load_str(yaml, ConfigFormat::Yaml).unwrap();

        assert_eq!(config.endpoint, "ws://127.0.0.1:8000/ws/orders/");
        assert_eq!(config.reconnect_delay_ms, 3000);
    }

    #[test]
    fn test_load_toml() {
        let toml = r#"
endpoint = "ws://127.0.0.1:8000/ws/orders/"
reconnect_delay_ms = 3000
"#;
        let loader = ConfigLoader::new();
        let config: TestConfig = loader.load_str(toml, ConfigFormat::Toml).unwrap();

        assert_eq!(config.endpoint, "ws://127.0.0.1:8000/ws/orders/");
        assert_eq!(config.reconnect_delay_ms, 3000);
    }

    #[test]
    fn test_load_json() {
        let json = r#"{"endpoint": "wss://umami.example/ws/orders/", "reconnect_delay_ms": 1500}"#;
        let loader = ConfigLoader::new();
        let config: TestConfig = loader.load_str(json, ConfigFormat::Json).unwrap();

        assert_eq!(config.endpoint, "wss://umami.example/ws/orders/");
        assert_eq!(config.reconnect_delay_ms, 1500);
    }

    #[test]
    fn test_invalid_yaml() {
        let invalid = "endpoint: [invalid";
        let loader = ConfigLoader::new();
        let result: Result<TestConfig, _> = loader.load_str(invalid, ConfigFormat::Yaml);

        assert!(result.is_err());
        let err = result.unwrap_err();
        assert!(matches!(err, ConfigError::InvalidFormat { .. }));
        assert!(err.to_string().contains("YAML parse error"));
    }

    #[test]
    fn test_serialize_roundtrip() {
        let original = TestConfig {
            endpoint: "wss://umami.example/ws/orders/".to_string(),
            reconnect_delay_ms: 3000,
            token: Some("secret".to_string()),
        };

        for format in [ConfigFormat::Yaml, ConfigFormat::Toml, ConfigFormat::Json] {
            let text = ConfigLoader::serialize(&original, format).unwrap();
            let loader = ConfigLoader::new();
            let parsed: TestConfig = loader.load_str(&text, format).unwrap();
            assert_eq!(original, parsed);
        }
    }

    #[test]
    fn test_merge_configs() {
        let base = TestConfig {
            endpoint: "ws://127.0.0.1:8000/ws/orders/".to_string(),
            reconnect_delay_ms: 3000,
            token: None,
        };

        let overlay = TestConfig {
            endpoint: "wss://umami.example/ws/orders/".to_string(),
            reconnect_delay_ms: 1000,
            token: Some("tok".to_string()),
        };

        let merged = merge_configs(base, overlay.clone());
        assert_eq!(merged, overlay);
    }

    #[test]
    fn test_env_prefix() {
        let loader = ConfigLoader::new().with_env_prefix("UMAMI");
        assert_eq!(loader.env_prefix(), Some("UMAMI"));
        assert_eq!(ConfigLoader::new().env_prefix(), None);
    }

    #[test]
    fn test_file_not_found() {
        let loader = ConfigLoader::new();
        let result: Result<TestConfig, _> = loader.load_file("/nonexistent/umami.yaml");

        assert!(result.is_err());
        assert!(matches!(
            result.unwrap_err(),
            ConfigError::FileReadError { .. }
        ));
    }

    #[test]
    fn test_save_and_load_file() {
        let dir = std::env::temp_dir();
        let path = dir.join("umami_loader_test.yaml");

        let original = TestConfig {
            endpoint: "ws://localhost/ws/orders/".to_string(),
            reconnect_delay_ms: 500,
            token: None,
        };

        let text = ConfigLoader::serialize(&original, ConfigFormat::Yaml).unwrap();
        std::fs::write(&path, text).unwrap();

        let loader = ConfigLoader::new();
        let loaded: TestConfig = loader.load_file(&path).unwrap();
        assert_eq!(original, loaded);

        std::fs::remove_file(&path).ok();
    }
}
