use axum::response::Json;
use serde_json::{json, Value};

pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Fallback for unknown routes, rendered as the standard failure envelope.
pub async fn not_found(uri: axum::http::Uri) -> modkit::ApiFailure {
    modkit::ApiFailure::not_found("Route not found", format!("no route for {}", uri.path()))
}
