use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use tracing::debug;

use crate::handlers::AppState;

/// Health check endpoint
pub async fn health_handler(State(state): State<AppState>) -> Json<Value> {
    debug!("Health check requested");

    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "provider": {
            "endpoint": state.client.endpoint(),
            "model": state.client.model()
        },
        "strict_schema": state.config.strict_schema
    }))
}

/// Readiness check endpoint (for container platforms)
pub async fn ready_handler() -> StatusCode {
    StatusCode::OK
}
