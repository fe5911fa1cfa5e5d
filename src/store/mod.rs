//! Credential store with JSON file persistence.
//!
//! Holds the single active (username, password) record behind a lock and
//! mirrors every accepted change to `credentials.json`. A failed write leaves
//! the in-memory record untouched, so the previous credentials stay
//! authoritative.

use std::fs;
use std::io;
use std::path::PathBuf;

use parking_lot::RwLock;

use crate::models::{CredentialRecord, Credentials};

/// Fields to change on the active record. `None` keeps the current value.
#[derive(Debug, Default, Clone)]
pub struct CredentialUpdate {
    pub username: Option<String>,
    pub password: Option<String>,
    pub wifi_ssid: Option<String>,
    pub wifi_password: Option<String>,
}

/// Exclusive owner of the active credential record.
pub struct CredentialStore {
    path: PathBuf,
    active: RwLock<Credentials>,
}

impl CredentialStore {
    /// Load the store from `path`. A missing or malformed file falls back to
    /// the built-in defaults with a diagnostic; this never fails.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let active = match fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str::<CredentialRecord>(&raw) {
                Ok(record) => {
                    tracing::info!(
                        username = %record.username,
                        "Loaded credentials from {}",
                        path.display()
                    );
                    record.into()
                }
                Err(e) => {
                    tracing::warn!(
                        "Malformed credential file {}, using defaults: {}",
                        path.display(),
                        e
                    );
                    Credentials::default()
                }
            },
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                tracing::info!("No credential file at {}, using defaults", path.display());
                Credentials::default()
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to read credential file {}, using defaults: {}",
                    path.display(),
                    e
                );
                Credentials::default()
            }
        };

        Self {
            path,
            active: RwLock::new(active),
        }
    }

    /// Snapshot of the active record. Lock-free readers would observe the
    /// record replaced wholesale, never mutated in place.
    pub fn current(&self) -> Credentials {
        self.active.read().clone()
    }

    /// Apply the change set and persist it. The write lock is held across the
    /// read-modify-write so concurrent updates cannot interleave; the active
    /// record is only replaced once the file write succeeded.
    pub fn update(&self, change: CredentialUpdate) -> io::Result<Credentials> {
        let mut active = self.active.write();

        let mut next = active.clone();
        if let Some(username) = change.username.filter(|s| !s.is_empty()) {
            next.username = username;
        }
        if let Some(password) = change.password.filter(|s| !s.is_empty()) {
            next.password = password;
        }
        if let Some(ssid) = change.wifi_ssid.filter(|s| !s.is_empty()) {
            next.wifi_ssid = Some(ssid);
            if let Some(wifi_password) = change.wifi_password.filter(|s| !s.is_empty()) {
                next.wifi_password = Some(wifi_password);
            }
        }

        self.persist(&next)?;
        *active = next.clone();
        Ok(next)
    }

    /// Write the record to disk via a temp sibling and rename, so readers
    /// never observe a partially written file.
    fn persist(&self, credentials: &Credentials) -> io::Result<()> {
        let record = CredentialRecord {
            username: credentials.username.clone(),
            password: credentials.password.clone(),
            updated_at: chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string(),
            wifi_ssid: credentials.wifi_ssid.clone(),
            wifi_password: credentials.wifi_password.clone(),
        };

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }

        let json = serde_json::to_string_pretty(&record)?;
        let temp_path = self.path.with_extension("tmp");
        fs::write(&temp_path, json)?;
        fs::rename(&temp_path, &self.path)?;

        tracing::info!("Saved credentials to {}", self.path.display());
        Ok(())
    }
}
