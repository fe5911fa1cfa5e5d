//! Integration tests for the inverter mock backend.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use once_cell::sync::Lazy;
use reqwest::Client;
use serde_json::{json, Value};
use tempfile::TempDir;

use crate::config::Config;
use crate::store::CredentialStore;
use crate::{create_router, AppState};

static TRACING: Lazy<()> = Lazy::new(|| {
    let _ = tracing_subscriber::fmt().with_env_filter("warn").try_init();
});

/// Test fixture for integration tests.
struct TestFixture {
    client: Client,
    base_url: String,
    credentials_path: PathBuf,
    _temp_dir: TempDir,
}

impl TestFixture {
    async fn new() -> Self {
        Lazy::force(&TRACING);

        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        // Minimal stand-in for the dashboard asset tree
        let static_dir = temp_dir.path().join("data");
        std::fs::create_dir_all(static_dir.join("css")).unwrap();
        std::fs::create_dir_all(static_dir.join("js")).unwrap();
        std::fs::write(static_dir.join("index.html"), "<html>dashboard</html>").unwrap();
        std::fs::write(static_dir.join("settings.html"), "<html>settings</html>").unwrap();
        std::fs::write(static_dir.join("config.html"), "<html>config</html>").unwrap();
        std::fs::write(static_dir.join("css").join("style.css"), "body { margin: 0 }").unwrap();
        std::fs::write(static_dir.join("js").join("app.js"), "void 0;").unwrap();

        let credentials_path = temp_dir.path().join("credentials.json");

        let config = Config {
            bind_addr: "127.0.0.1:0".parse().unwrap(),
            credentials_path: credentials_path.clone(),
            static_dir,
            log_level: "warn".to_string(),
        };

        let store = Arc::new(CredentialStore::load(&credentials_path));

        let state = AppState {
            store,
            config: Arc::new(config),
            started: Instant::now(),
        };

        let app = create_router(state);

        // Bind to random port
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("Failed to bind");
        let addr = listener.local_addr().expect("Failed to get addr");
        let base_url = format!("http://{}", addr);

        // Spawn server
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        TestFixture {
            client: Client::new(),
            base_url,
            credentials_path,
            _temp_dir: temp_dir,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[tokio::test]
async fn test_sensors_requires_auth() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let challenge = resp
        .headers()
        .get("www-authenticate")
        .expect("challenge header missing")
        .to_str()
        .unwrap();
    assert!(challenge.starts_with("Basic"));

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Authentication required");
}

#[tokio::test]
async fn test_sensors_rejects_wrong_password() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("wrong"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
}

#[tokio::test]
async fn test_sensors_snapshot_shape() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();

    assert!(body["charger"]["voltage"].is_number());
    assert!(body["charger"]["accumulated_power"].is_number());
    assert!(body["pv"]["power"].is_number());
    assert!(body["battery"]["soc"].is_number());
    assert_eq!(body["inverter"]["mode"], "Off-Grid");
    assert_eq!(body["inverter"]["mode_id"], 3);
    assert_eq!(body["inverter"]["max_charge_current"], 60);
    assert!(body["totals"]["total_charged"].is_number());
    assert!(body["last_update"].is_number());
    assert!(body["uptime"].is_number());
    assert_eq!(body["modbus_error"], false);
    assert_eq!(body["demo_mode"], true);
}

#[tokio::test]
async fn test_status_endpoint() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/status"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["device_name"], "MUST Inverter API (Dev Server)");
    assert_eq!(body["wifi_ssid"], "Development");
    assert!(body["uptime_seconds"].is_number());
    assert_eq!(body["modbus_connected"], false);
}

#[tokio::test]
async fn test_reset_endpoint() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/reset"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_get_credentials_hides_password() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["username"], "admin");
    assert_eq!(body["has_wifi_password"], false);
    assert!(body.get("password").is_none());
}

#[tokio::test]
async fn test_wifi_scan() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/api/wifi/scan"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 6);

    let networks = body["networks"].as_array().unwrap();
    // Strongest signal first
    assert_eq!(networks[0]["rssi"], -45);
    assert_eq!(networks.last().unwrap()["encryption"], "Open");
}

#[tokio::test]
async fn test_update_credentials_wrong_current_password() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "username": "operator",
            "current_password": "nope"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Current password is incorrect");

    // Nothing was persisted
    assert!(!fixture.credentials_path.exists());
}

#[tokio::test]
async fn test_update_credentials_empty_change_set() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({ "current_password": "admin123" }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "No changes provided");
}

#[tokio::test]
async fn test_update_credentials_short_password() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "password": "abc",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 400);

    // Store unchanged, old credentials still authenticate
    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_update_credentials_username_only() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "username": "operator",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["username"], "operator");

    // New pair authenticates, old username no longer does
    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("operator", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    // A fresh store over the same file sees the persisted record
    let reloaded = CredentialStore::load(&fixture.credentials_path);
    assert_eq!(reloaded.current().username, "operator");
    assert_eq!(reloaded.current().password, "admin123");
}

#[tokio::test]
async fn test_update_credentials_password_round_trip() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "password": "hunter22",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .get(fixture.url("/api/sensors"))
        .basic_auth("admin", Some("hunter22"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_update_wifi_validation_and_round_trip() {
    let fixture = TestFixture::new().await;

    // SSID without a password is rejected
    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "wifi_ssid": "HomeNetwork",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Too-short Wi-Fi password is rejected
    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "wifi_ssid": "HomeNetwork",
            "wifi_password": "short",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 400);

    // Valid provisioning is accepted and visible afterwards
    let resp = fixture
        .client
        .post(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .json(&json!({
            "wifi_ssid": "HomeNetwork",
            "wifi_password": "wifipass123",
            "current_password": "admin123"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/api/credentials"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["wifi_ssid"], "HomeNetwork");
    assert_eq!(body["has_wifi_password"], true);

    // Status now reports the stored SSID instead of the fallback
    let resp = fixture
        .client
        .get(fixture.url("/api/status"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["wifi_ssid"], "HomeNetwork");
}

#[tokio::test]
async fn test_index_requires_auth() {
    let fixture = TestFixture::new().await;

    let resp = fixture.client.get(fixture.url("/")).send().await.unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .get(fixture.url("/"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("dashboard"));
}

#[tokio::test]
async fn test_settings_page_requires_auth() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/settings.html"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 401);

    let resp = fixture
        .client
        .get(fixture.url("/settings.html"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);
}

#[tokio::test]
async fn test_config_page_is_open() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/config.html"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 200);
    assert!(resp.text().await.unwrap().contains("config"));
}

#[tokio::test]
async fn test_logout_returns_challenge() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/logout"))
        .basic_auth("admin", Some("admin123"))
        .send()
        .await
        .unwrap();

    assert_eq!(resp.status(), 401);
    assert!(resp.headers().get("www-authenticate").is_some());
}

#[tokio::test]
async fn test_static_assets_are_open() {
    let fixture = TestFixture::new().await;

    let resp = fixture
        .client
        .get(fixture.url("/css/style.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/js/app.js"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let resp = fixture
        .client
        .get(fixture.url("/css/missing.css"))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);
}
