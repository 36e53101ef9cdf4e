// --- File: crates/courtbook_common/src/handlers.rs ---

// HTTP request handlers shared across the application.

use axum::Json;
use serde_json::{json, Value};

/// Liveness probe used by deployment checks.
pub async fn health_handler() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
