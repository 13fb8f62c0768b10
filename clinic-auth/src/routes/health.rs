use axum::extract::State;
use axum::Json;
use std::sync::Arc;

use clinic_shared::types::api::HealthResponse;

use crate::AppState;

pub async fn health_check() -> Json<HealthResponse> {
    Json(HealthResponse::healthy("clinic-auth", env!("CARGO_PKG_VERSION")))
}

/// Prometheus exposition endpoint.
pub async fn metrics(State(state): State<Arc<AppState>>) -> String {
    state.metrics_handle.render()
}
