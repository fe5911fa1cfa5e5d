//! Credential endpoints.

use axum::{extract::State, Json};

use crate::auth;
use crate::errors::AppError;
use crate::models::{
    CurrentCredentialsResponse, UpdateCredentialsRequest, UpdateCredentialsResponse,
};
use crate::store::CredentialUpdate;
use crate::AppState;

/// GET /api/credentials - Active username and Wi-Fi provisioning state.
/// Passwords are never echoed back.
pub async fn get_credentials(State(state): State<AppState>) -> Json<CurrentCredentialsResponse> {
    let current = state.store.current();
    Json(CurrentCredentialsResponse {
        username: current.username,
        has_wifi_password: current
            .wifi_password
            .as_ref()
            .is_some_and(|p| !p.is_empty()),
        wifi_ssid: current.wifi_ssid,
    })
}

/// POST /api/credentials - Change the API credentials and/or the stored
/// Wi-Fi provisioning.
///
/// Validation order: current password first, then a non-empty change set,
/// then the per-field length rules. Only after everything passes does the
/// store persist; a failed write leaves the previous credentials in force.
pub async fn update_credentials(
    State(state): State<AppState>,
    Json(request): Json<UpdateCredentialsRequest>,
) -> Result<Json<UpdateCredentialsResponse>, AppError> {
    let active = state.store.current();

    let current_password = request.current_password.as_deref().unwrap_or_default();
    if !auth::constant_time_compare(current_password, &active.password) {
        return Err(AppError::Unauthorized(
            "Current password is incorrect".to_string(),
        ));
    }

    // Empty strings count as "not provided", matching the device firmware.
    let username = request.username.filter(|s| !s.is_empty());
    let password = request.password.filter(|s| !s.is_empty());
    let wifi_ssid = request.wifi_ssid.filter(|s| !s.is_empty());
    let wifi_password = request.wifi_password.filter(|s| !s.is_empty());

    if username.is_none() && password.is_none() && wifi_ssid.is_none() {
        return Err(AppError::Validation("No changes provided".to_string()));
    }

    if password.as_ref().is_some_and(|p| p.len() < 6) {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }

    if wifi_ssid.is_some() && wifi_password.is_none() {
        return Err(AppError::Validation(
            "WiFi password is required when SSID is provided".to_string(),
        ));
    }

    if wifi_password.as_ref().is_some_and(|p| p.len() < 8) {
        return Err(AppError::Validation(
            "WiFi password must be at least 8 characters".to_string(),
        ));
    }

    tracing::info!(
        username = username.as_deref().unwrap_or("(unchanged)"),
        password_changed = password.is_some(),
        wifi_changed = wifi_ssid.is_some(),
        "Credential change requested"
    );

    match state.store.update(CredentialUpdate {
        username,
        password,
        wifi_ssid,
        wifi_password,
    }) {
        Ok(updated) => Ok(Json(UpdateCredentialsResponse {
            success: true,
            message: "Credentials updated successfully".to_string(),
            username: updated.username,
        })),
        Err(e) => {
            tracing::error!("Failed to save credentials: {}", e);
            Err(AppError::Persistence(
                "Failed to save credentials".to_string(),
            ))
        }
    }
}
