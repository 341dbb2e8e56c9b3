//! Health check endpoint.

use axum::Json;
use axum::extract::State;
use tracing::warn;

use crate::AppState;
use crate::models::HealthResponse;

/// `GET /health` — reports version and store connectivity.
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let store_connected = match state.store.ping().await {
        Ok(()) => true,
        Err(e) => {
            warn!("store ping failed: {e}");
            false
        }
    };
    Json(HealthResponse {
        status: if store_connected { "ok" } else { "degraded" },
        version: clinic_core::version(),
        store_connected,
    })
}
