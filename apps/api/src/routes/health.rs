use axum::Json;
use serde_json::{json, Value};

/// GET /
pub async fn root_handler() -> Json<Value> {
    Json(json!({ "message": "GitHub Job Matcher API is running" }))
}

/// GET /test
/// Liveness probe kept for existing clients.
pub async fn test_handler() -> Json<Value> {
    Json(json!({
        "status": "success",
        "message": "Server is running!"
    }))
}

/// GET /health
/// Returns a simple status object with service version.
pub async fn health_handler() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
        "service": "jobmatch-api"
    }))
}
