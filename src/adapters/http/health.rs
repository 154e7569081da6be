//! Liveness endpoint shared by every service.

use axum::Json;
use serde_json::{json, Value};

/// GET / or GET /health - `{"status": "ok"}`
pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
