//! MUST Inverter Mock Backend
//!
//! A local stand-in for the inverter's embedded HTTP API, so the dashboard
//! front end can be developed without physical hardware. Telemetry is
//! simulated; credentials behave like the real device, including persistence.

mod api;
mod assets;
mod auth;
mod config;
mod errors;
mod models;
mod sim;
mod store;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use models::Credentials;
use store::CredentialStore;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub store: Arc<CredentialStore>,
    pub config: Arc<Config>,
    /// Process start, the fixed origin for every uptime reading.
    pub started: Instant,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting MUST Inverter mock backend");
    tracing::info!("Bind address: {}", config.bind_addr);
    tracing::info!("Static assets: {:?}", config.static_dir);
    tracing::info!("Credential file: {:?}", config.credentials_path);

    let store = Arc::new(CredentialStore::load(&config.credentials_path));
    let active = store.current();
    tracing::info!(username = %active.username, "HTTP Basic authentication enabled");
    if active == Credentials::default() {
        tracing::warn!("Using built-in default credentials (admin/admin123)");
    }

    // Create application state
    let state = AppState {
        store,
        config: Arc::new(config.clone()),
        started: Instant::now(),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!(
        "Server listening on {} (demo mode, simulated data)",
        config.bind_addr
    );

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration for local front-end development
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Guarded API routes
    let store = state.store.clone();
    let api_routes = Router::new()
        .route("/sensors", get(api::get_sensors))
        .route("/status", get(api::get_status))
        .route("/reset", post(api::post_reset))
        .route(
            "/credentials",
            get(api::get_credentials).post(api::update_credentials),
        )
        .route("/wifi/scan", get(api::scan_networks))
        .layer(middleware::from_fn(move |req, next| {
            auth::basic_auth_layer(store.clone(), req, next)
        }));

    // Dashboard pages behind the same gate
    let store = state.store.clone();
    let page_routes = Router::new()
        .route("/", get(assets::index))
        .route("/index.html", get(assets::index))
        .route("/settings.html", get(assets::settings_page))
        .layer(middleware::from_fn(move |req, next| {
            auth::basic_auth_layer(store.clone(), req, next)
        }));

    // The config page stays open: it is how the operator reaches a device
    // whose credentials are not yet known. CSS/JS must load on it too.
    let open_routes = Router::new()
        .route("/config.html", get(assets::config_page))
        .route("/logout", get(assets::logout));

    Router::new()
        .nest("/api", api_routes)
        .merge(page_routes)
        .merge(open_routes)
        .nest_service("/css", ServeDir::new(state.config.static_dir.join("css")))
        .nest_service("/js", ServeDir::new(state.config.static_dir.join("js")))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[cfg(test)]
mod tests;
