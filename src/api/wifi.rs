//! Simulated Wi-Fi scan endpoint.

use axum::Json;

use crate::models::{WifiNetwork, WifiScanResponse};

/// GET /api/wifi/scan - Fixed list of nearby 2.4 GHz networks, strongest
/// signal first. The real device filters out 5 GHz networks the radio cannot
/// join.
pub async fn scan_networks() -> Json<WifiScanResponse> {
    tracing::debug!("Simulating a 2.4 GHz Wi-Fi scan");

    let mut networks = vec![
        network("CasteloAlto", -45, "WPA2", 6),
        network("NET_2G_123456", -55, "WPA2", 11),
        network("Vivo-Fibra-2.4G", -65, "WPA2", 1),
        network("Claro_WiFi", -72, "WPA2", 3),
        network("TIM-FIBRA-2.4G", -78, "WPA2", 9),
        network("WiFi-Guest", -85, "Open", 7),
    ];
    networks.sort_by_key(|n| std::cmp::Reverse(n.rssi));

    let count = networks.len();
    Json(WifiScanResponse {
        success: true,
        networks,
        count,
        note: "Only 2.4 GHz networks (ESP32 compatible)".to_string(),
    })
}

fn network(ssid: &str, rssi: i32, encryption: &str, channel: u8) -> WifiNetwork {
    WifiNetwork {
        ssid: ssid.to_string(),
        rssi,
        encryption: encryption.to_string(),
        channel,
    }
}
