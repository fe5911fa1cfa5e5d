//! Device status and reset endpoints.

use axum::{extract::State, Json};

use crate::models::{DeviceStatus, ResetResponse};
use crate::AppState;

/// GET /api/status - Device identity, network and resource info. Mocked
/// values except for the real uptime and the stored Wi-Fi SSID.
pub async fn get_status(State(state): State<AppState>) -> Json<DeviceStatus> {
    let wifi_ssid = state
        .store
        .current()
        .wifi_ssid
        .unwrap_or_else(|| "Development".to_string());

    Json(DeviceStatus {
        device_name: "MUST Inverter API (Dev Server)".to_string(),
        ip_address: "127.0.0.1".to_string(),
        mac_address: "00:00:00:00:00:00".to_string(),
        wifi_ssid,
        wifi_rssi: -42,
        uptime_seconds: state.started.elapsed().as_secs(),
        free_heap: 200_000,
        modbus_connected: false,
    })
}

/// POST /api/reset - Configuration reset. A no-op in this environment; the
/// real firmware reboots into its captive config portal here.
pub async fn post_reset() -> Json<ResetResponse> {
    tracing::info!("Reset requested, ignored by the mock server");
    Json(ResetResponse {
        message: "Reset is not available on the mock server".to_string(),
    })
}
