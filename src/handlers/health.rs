use axum::{response::IntoResponse, Json};
use serde_json::json;

/// Liveness probe. Returns 200 as long as the process is serving requests.
pub async fn health_check() -> impl IntoResponse {
    Json(json!({ "status": "OK" }))
}
