//! Mill sheet extraction service
//!
//! Forwards a base64-encoded steel mill inspection certificate to the
//! Anthropic Messages API and reduces the model's reply to six fields:
//! date, spec, size, charge number, project and maker.

pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod models;
pub mod services;

pub use config::Config;
pub use error::{AppError, AppResult};
pub use handlers::{create_router, AppState};
