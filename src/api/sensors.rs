//! Sensor telemetry endpoint.

use axum::{extract::State, Json};

use crate::models::TelemetrySnapshot;
use crate::sim;
use crate::AppState;

/// GET /api/sensors - Current telemetry snapshot, synthesized fresh on every
/// request.
pub async fn get_sensors(State(state): State<AppState>) -> Json<TelemetrySnapshot> {
    let snapshot = sim::snapshot_at(sim::epoch_now(), state.started.elapsed().as_secs());
    Json(snapshot)
}
