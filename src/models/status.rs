//! Device status and Wi-Fi scan types.

use serde::{Deserialize, Serialize};

/// Body for `GET /api/status`. Everything except `uptime_seconds` and
/// `wifi_ssid` is a fixed mock value in this environment.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeviceStatus {
    pub device_name: String,
    pub ip_address: String,
    pub mac_address: String,
    pub wifi_ssid: String,
    pub wifi_rssi: i32,
    pub uptime_seconds: u64,
    pub free_heap: u64,
    pub modbus_connected: bool,
}

/// One entry of the simulated Wi-Fi scan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WifiNetwork {
    pub ssid: String,
    pub rssi: i32,
    pub encryption: String,
    pub channel: u8,
}

/// Body for `GET /api/wifi/scan`.
#[derive(Debug, Serialize, Deserialize)]
pub struct WifiScanResponse {
    pub success: bool,
    pub networks: Vec<WifiNetwork>,
    pub count: usize,
    pub note: String,
}

/// Body for `POST /api/reset`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ResetResponse {
    pub message: String,
}
