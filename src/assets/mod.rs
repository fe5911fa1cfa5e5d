//! Dashboard page routes.
//!
//! The HTML/CSS/JS content itself is an external collaborator; these handlers
//! just hand files out of the configured static directory. Which pages sit
//! behind the auth gate is decided in the router.

use std::path::Path;

use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
};

use crate::auth;
use crate::errors::AppError;
use crate::AppState;

/// GET / and /index.html - The main dashboard.
pub async fn index(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_page(&state.config.static_dir, "index.html").await
}

/// GET /settings.html - Credential and Wi-Fi settings page.
pub async fn settings_page(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_page(&state.config.static_dir, "settings.html").await
}

/// GET /config.html - Initial provisioning page, served without auth because
/// it is how the operator reaches a device whose credentials are not yet
/// known (AP mode on real hardware).
pub async fn config_page(State(state): State<AppState>) -> Result<Response, AppError> {
    serve_page(&state.config.static_dir, "config.html").await
}

/// GET /logout - Always answers 401 with the Basic challenge so browsers
/// drop their cached credentials.
pub async fn logout() -> Response {
    auth::challenge_response()
}

async fn serve_page(dir: &Path, name: &str) -> Result<Response, AppError> {
    let path = dir.join(name);
    match tokio::fs::read(&path).await {
        Ok(bytes) => {
            Ok(([(header::CONTENT_TYPE, "text/html; charset=utf-8")], bytes).into_response())
        }
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            Err(AppError::NotFound(format!("{} not found", name)))
        }
        Err(e) => Err(AppError::Internal(format!(
            "Failed to read {}: {}",
            name, e
        ))),
    }
}
