//! Configuration module for the inverter mock backend.
//!
//! All configuration is loaded from environment variables with sensible defaults.

use std::env;
use std::net::SocketAddr;
use std::path::PathBuf;

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address to bind the server to (all interfaces on the dev port, so the
    /// dashboard is reachable from other devices on the network)
    pub bind_addr: SocketAddr,
    /// Path to the persisted credential file
    pub credentials_path: PathBuf,
    /// Directory holding the dashboard HTML/CSS/JS assets
    pub static_dir: PathBuf,
    /// Log level (trace, debug, info, warn, error)
    pub log_level: String,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let bind_addr = env::var("INVERTER_BIND_ADDR")
            .unwrap_or_else(|_| "0.0.0.0:5000".to_string())
            .parse()
            .expect("Invalid INVERTER_BIND_ADDR format");

        let credentials_path = env::var("INVERTER_CREDENTIALS_PATH")
            .unwrap_or_else(|_| "./credentials.json".to_string())
            .into();

        let static_dir = env::var("INVERTER_STATIC_DIR")
            .unwrap_or_else(|_| "./data".to_string())
            .into();

        let log_level = env::var("INVERTER_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Self {
            bind_addr,
            credentials_path,
            static_dir,
            log_level,
        }
    }
}
