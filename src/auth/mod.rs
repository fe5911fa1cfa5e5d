//! HTTP Basic authentication module.
//!
//! Implements constant-time comparison to mitigate timing attacks.

use std::sync::Arc;

use axum::{
    extract::Request,
    http::{header, HeaderMap, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use subtle::ConstantTimeEq;

use crate::errors::ErrorBody;
use crate::store::CredentialStore;

/// Challenge sent with every 401 so browsers prompt for Basic credentials.
pub const CHALLENGE: &str = "Basic realm=\"Login Required\"";

/// Basic auth layer function guarding the protected routes.
pub async fn basic_auth_layer(
    store: Arc<CredentialStore>,
    request: Request,
    next: Next,
) -> Response {
    match parse_basic_auth(request.headers()) {
        Some((username, password)) if check(&store, &username, &password) => {
            next.run(request).await
        }
        _ => challenge_response(),
    }
}

/// True iff the presented pair matches the active credential record exactly.
pub fn check(store: &CredentialStore, username: &str, password: &str) -> bool {
    let current = store.current();
    let user_ok = constant_time_compare(username, &current.username);
    let pass_ok = constant_time_compare(password, &current.password);
    user_ok && pass_ok
}

/// Extract (username, password) from an `Authorization: Basic` header.
fn parse_basic_auth(headers: &HeaderMap) -> Option<(String, String)> {
    let value = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let encoded = value.strip_prefix("Basic ")?;
    let decoded = BASE64.decode(encoded.trim()).ok()?;
    let decoded = String::from_utf8(decoded).ok()?;
    let (username, password) = decoded.split_once(':')?;
    Some((username.to_string(), password.to_string()))
}

/// Perform constant-time string comparison.
pub(crate) fn constant_time_compare(a: &str, b: &str) -> bool {
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Create the 401 response carrying the Basic challenge.
pub fn challenge_response() -> Response {
    let body = ErrorBody {
        error: "Authentication required".to_string(),
    };

    let mut response = (StatusCode::UNAUTHORIZED, Json(body)).into_response();
    response
        .headers_mut()
        .insert(header::WWW_AUTHENTICATE, HeaderValue::from_static(CHALLENGE));
    response
}
