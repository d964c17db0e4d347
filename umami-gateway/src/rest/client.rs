//! REST client with token authentication.

use reqwest::{header, Client, Method, RequestBuilder, Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;

use umami_core::error::{ApiError, NetworkError, UmamiError};

use super::config::RestConfig;

/// REST client for the platform API.
///
/// Wraps `reqwest` with the session-token header, request timeout, and
/// uniform error mapping. Resource modules (`notifications`, `orders`,
/// `settings`, `users`) layer typed calls on top.
///
/// # Example
///
/// ```ignore
/// use umami_gateway::rest::{RestClient, RestConfig};
///
/// let config = RestConfig::builder()
///     .base_url("https://umami.example/api")
///     .build();
///
/// let client = RestClient::new(config)?;
/// let count: UnreadCount = client.get_json("/notifications/unread-count/", &[]).await?;
/// ```
pub struct RestClient {
    config: RestConfig,
    http_client: Client,
}

impl RestClient {
    /// Creates a new REST client.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the HTTP client cannot be created.
    pub fn new(config: RestConfig) -> Result<Self, NetworkError> {
        let mut headers = header::HeaderMap::new();

        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| NetworkError::ConnectionFailed {
                    reason: "Invalid user agent".to_string(),
                })?,
        );

        if let Some(token) = &config.auth_token {
            headers.insert(
                header::AUTHORIZATION,
                format!("Token {}", token.expose()).parse().map_err(|_| {
                    NetworkError::ConnectionFailed {
                        reason: "Invalid auth token".to_string(),
                    }
                })?,
            );
        }

        for (key, value) in &config.headers {
            headers.insert(
                header::HeaderName::try_from(key.as_str()).map_err(|_| {
                    NetworkError::ConnectionFailed {
                        reason: format!("Invalid header name: {key}"),
                    }
                })?,
                value.parse().map_err(|_| NetworkError::ConnectionFailed {
                    reason: format!("Invalid header value for {key}"),
                })?,
            );
        }

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            http_client,
        })
    }

    /// Returns the client configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Builds the absolute URL for a resource path.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        format!("{}{path}", self.config.base_url.trim_end_matches('/'))
    }

    /// Sends a GET request and decodes the JSON response.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport failure, non-success status, or a
    /// body that does not decode.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, UmamiError> {
        let request = self
            .http_client
            .request(Method::GET, self.url(path))
            .query(query);
        self.execute_json(path, request).await
    }

    /// Sends a POST request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport failure, non-success status, or a
    /// body that does not decode.
    pub async fn post_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, UmamiError> {
        let request = self
            .http_client
            .request(Method::POST, self.url(path))
            .json(body);
        self.execute_json(path, request).await
    }

    /// Sends a bodyless POST request (action endpoints) and decodes the
    /// response.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport failure, non-success status, or a
    /// body that does not decode.
    pub async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, UmamiError> {
        let request = self.http_client.request(Method::POST, self.url(path));
        self.execute_json(path, request).await
    }

    /// Sends a PATCH request with a JSON body and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport failure, non-success status, or a
    /// body that does not decode.
    pub async fn patch_json<T: DeserializeOwned>(
        &self,
        path: &str,
        body: &impl serde::Serialize,
    ) -> Result<T, UmamiError> {
        let request = self
            .http_client
            .request(Method::PATCH, self.url(path))
            .json(body);
        self.execute_json(path, request).await
    }

    /// Sends a PATCH request with a multipart form (file-bearing fields)
    /// and decodes the response.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport failure, non-success status, or a
    /// body that does not decode.
    pub async fn patch_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        form: reqwest::multipart::Form,
    ) -> Result<T, UmamiError> {
        let request = self
            .http_client
            .request(Method::PATCH, self.url(path))
            .multipart(form);
        self.execute_json(path, request).await
    }

    async fn execute_json<T: DeserializeOwned>(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<T, UmamiError> {
        let response = self.execute(path, request).await?;

        response
            .json::<T>()
            .await
            .map_err(|e| ApiError::Decode {
                reason: e.to_string(),
            })
            .map_err(UmamiError::from)
    }

    async fn execute(&self, path: &str, request: RequestBuilder) -> Result<Response, UmamiError> {
        let response = request.send().await.map_err(|e| self.map_transport(&e))?;

        let status = response.status();
        debug!(path = %path, status = %status, "API request");

        if status.is_success() {
            return Ok(response);
        }

        let error = match status {
            StatusCode::UNAUTHORIZED => ApiError::Unauthorized,
            StatusCode::NOT_FOUND => ApiError::NotFound {
                resource: path.to_string(),
            },
            _ => {
                let reason = response.text().await.unwrap_or_default();
                ApiError::Status {
                    status_code: status.as_u16(),
                    reason,
                }
            }
        };

        Err(error.into())
    }

    fn map_transport(&self, error: &reqwest::Error) -> UmamiError {
        let network = if error.is_timeout() {
            NetworkError::Timeout {
                timeout_ms: self.config.timeout_ms,
            }
        } else if let Some(status) = error.status() {
            NetworkError::Http {
                status_code: status.as_u16(),
                reason: error.to_string(),
            }
        } else {
            NetworkError::ConnectionFailed {
                reason: error.to_string(),
            }
        };
        network.into()
    }
}

impl std::fmt::Debug for RestClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RestClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joining() {
        let client = RestClient::new(
            RestConfig::builder()
                .base_url("https://umami.example/api/")
                .build(),
        )
        .unwrap();

        assert_eq!(
            client.url("/notifications/unread-count/"),
            "https://umami.example/api/notifications/unread-count/"
        );
    }

    #[test]
    fn test_invalid_header_rejected() {
        let result = RestClient::new(
            RestConfig::builder()
                .base_url("https://umami.example/api")
                .header("bad header name", "x")
                .build(),
        );
        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_unreachable_host_is_network_error() {
        let client = RestClient::new(
            RestConfig::builder()
                .base_url("http://127.0.0.1:1/api")
                .timeout(std::time::Duration::from_millis(200))
                .build(),
        )
        .unwrap();

        let result: Result<serde_json::Value, _> =
            client.get_json("/notifications/unread-count/", &[]).await;

        let err = result.unwrap_err();
        assert!(err.as_network_error().is_some());
    }
}
