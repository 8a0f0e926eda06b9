//! Health endpoint handler.

use axum::Json;
use serde_json::{json, Value};

/// `GET /health` -- liveness check for orchestrators and monitors.
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
