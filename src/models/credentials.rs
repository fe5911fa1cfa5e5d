//! Credential types: the in-memory record, the persisted file format, and the
//! request/response bodies of the credential endpoints.

use serde::{Deserialize, Serialize};

/// The single active credential record guarding the API.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
    /// Wi-Fi provisioning captured by the config page, if any.
    pub wifi_ssid: Option<String>,
    pub wifi_password: Option<String>,
}

impl Default for Credentials {
    fn default() -> Self {
        Self {
            username: DEFAULT_USERNAME.to_string(),
            password: DEFAULT_PASSWORD.to_string(),
            wifi_ssid: None,
            wifi_password: None,
        }
    }
}

/// Built-in credentials used until the operator changes them.
pub const DEFAULT_USERNAME: &str = "admin";
pub const DEFAULT_PASSWORD: &str = "admin123";

/// On-disk shape of `credentials.json`.
///
/// Missing username/password keys fall back to the built-in defaults, matching
/// the device firmware's tolerant reader.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CredentialRecord {
    #[serde(default = "default_username")]
    pub username: String,
    #[serde(default = "default_password")]
    pub password: String,
    /// `YYYY-MM-DD HH:MM:SS`, local time.
    pub updated_at: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_ssid: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wifi_password: Option<String>,
}

fn default_username() -> String {
    DEFAULT_USERNAME.to_string()
}

fn default_password() -> String {
    DEFAULT_PASSWORD.to_string()
}

impl From<CredentialRecord> for Credentials {
    fn from(record: CredentialRecord) -> Self {
        Self {
            username: record.username,
            password: record.password,
            wifi_ssid: record.wifi_ssid.filter(|s| !s.is_empty()),
            wifi_password: record.wifi_password.filter(|s| !s.is_empty()),
        }
    }
}

/// Request body for `POST /api/credentials`.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateCredentialsRequest {
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default)]
    pub current_password: Option<String>,
    #[serde(default)]
    pub wifi_ssid: Option<String>,
    #[serde(default)]
    pub wifi_password: Option<String>,
}

/// Success body for `POST /api/credentials`.
#[derive(Debug, Serialize, Deserialize)]
pub struct UpdateCredentialsResponse {
    pub success: bool,
    pub message: String,
    pub username: String,
}

/// Body for `GET /api/credentials`. Passwords are never echoed back.
#[derive(Debug, Serialize, Deserialize)]
pub struct CurrentCredentialsResponse {
    pub username: String,
    pub wifi_ssid: Option<String>,
    pub has_wifi_password: bool,
}
