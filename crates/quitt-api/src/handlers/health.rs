//! Status and liveness handlers.

use axum::{extract::State, Json};
use chrono::Utc;
use serde_json::{json, Value};

use crate::AppState;

/// Status document served at the root path.
pub async fn index(State(state): State<AppState>) -> Json<Value> {
    Json(json!({
        "status": "OK",
        "version": env!("CARGO_PKG_VERSION"),
        "queue_enabled": state.config.queue_enabled,
    }))
}

/// Liveness probe.
///
/// Minimal check that the HTTP server is responding; tests no external
/// dependencies.
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "alive",
        "timestamp": Utc::now(),
        "service": "quitt-api",
    }))
}
