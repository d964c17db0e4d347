//! App settings resource client.
//!
//! The settings record drives the public storefront (branding, contact
//! details, maintenance banner). Reads of the public subset need no
//! session; writes are admin-only and go through PATCH, with a multipart
//! variant for the image fields.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::sync::Arc;

use umami_core::error::UmamiError;

use crate::rest::{Page, RestClient};

/// The application settings record.
///
/// Only the fields the client reads are typed; everything else rides in
/// `extra` so an evolving backend never breaks decoding.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppSettings {
    /// Record identifier.
    #[serde(default)]
    pub id: Option<i64>,
    /// Application display name.
    #[serde(default)]
    pub app_name: Option<String>,
    /// Application description.
    #[serde(default)]
    pub app_description: Option<String>,
    /// Logo image URL.
    #[serde(default)]
    pub app_logo: Option<String>,
    /// Banner image URL.
    #[serde(default)]
    pub app_banner: Option<String>,
    /// Support email.
    #[serde(default)]
    pub contact_email: Option<String>,
    /// Support phone number.
    #[serde(default)]
    pub contact_phone: Option<String>,
    /// Whether the platform is in maintenance mode.
    #[serde(default)]
    pub maintenance_mode: bool,
    /// Maintenance banner text.
    #[serde(default)]
    pub maintenance_message: Option<String>,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: serde_json::Map<String, Value>,
}

/// Typed client for the app-settings resource.
#[derive(Debug, Clone)]
pub struct SettingsApi {
    client: Arc<RestClient>,
}

impl SettingsApi {
    /// Creates the settings client.
    #[must_use]
    pub fn new(client: Arc<RestClient>) -> Self {
        Self { client }
    }

    /// Fetches the public settings subset (no session required).
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn get_public(&self) -> Result<AppSettings, UmamiError> {
        self.client.get_json("/app-settings/public/", &[]).await
    }

    /// Lists settings records (admin only; in practice there is one).
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn list(&self) -> Result<Vec<AppSettings>, UmamiError> {
        let page: Page<AppSettings> = self.client.get_json("/app-settings/", &[]).await?;
        Ok(page.into_items())
    }

    /// Fetches a settings record by id (admin only).
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn get(&self, id: i64) -> Result<AppSettings, UmamiError> {
        self.client
            .get_json(&format!("/app-settings/{id}/"), &[])
            .await
    }

    /// Patches scalar settings fields (admin only).
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn patch(&self, id: i64, fields: &Value) -> Result<AppSettings, UmamiError> {
        self.client
            .patch_json(&format!("/app-settings/{id}/"), fields)
            .await
    }

    /// Patches an image field (logo, banner) through a multipart form.
    ///
    /// # Errors
    ///
    /// Returns `UmamiError` on transport or API failure.
    pub async fn patch_image(
        &self,
        id: i64,
        field: &str,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<AppSettings, UmamiError> {
        let part = reqwest::multipart::Part::bytes(bytes).file_name(file_name.to_string());
        let form = reqwest::multipart::Form::new().part(field.to_string(), part);

        self.client
            .patch_multipart(&format!("/app-settings/{id}/"), form)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_settings_decoding() {
        let json = r#"{
            "id": 1,
            "app_name": "Umami",
            "contact_email": "support@umami.example",
            "maintenance_mode": false,
            "hero_title": "Order food easily",
            "currency": "THB"
        }"#;

        let settings: AppSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.app_name.as_deref(), Some("Umami"));
        assert!(!settings.maintenance_mode);
        // Untyped fields are preserved.
        assert_eq!(settings.extra["currency"], "THB");
        assert_eq!(settings.extra["hero_title"], "Order food easily");
    }

    #[test]
    fn test_settings_roundtrip_keeps_extra() {
        let json = r#"{"id": 1, "app_name": "Umami", "timezone": "Asia/Bangkok"}"#;
        let settings: AppSettings = serde_json::from_str(json).unwrap();
        let back = serde_json::to_value(&settings).unwrap();
        assert_eq!(back["timezone"], "Asia/Bangkok");
    }
}
