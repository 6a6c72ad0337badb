pub mod extract;
pub mod health;

pub use extract::*;
pub use health::*;

use std::sync::Arc;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::middleware::{cors_middleware, logging_middleware};
use crate::services::ClaudeClient;

/// Shared, read-only state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub client: ClaudeClient,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let client = ClaudeClient::new(&config)?;
        Ok(Self {
            config: Arc::new(config),
            client,
        })
    }
}

pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.max_body_size_bytes();

    Router::new()
        .route("/health", get(health_handler))
        .route("/ready", get(ready_handler))
        .route(
            "/api/extract",
            post(extract_handler)
                .options(preflight_handler)
                .fallback(method_not_allowed_handler),
        )
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(axum::middleware::from_fn(logging_middleware))
                .layer(axum::middleware::from_fn(cors_middleware))
                .layer(DefaultBodyLimit::max(body_limit)),
        )
        .with_state(state)
}
