use axum::{
    extract::rejection::BytesRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::models::ErrorResponse;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Missing pdfBase64 or apiKey")]
    MissingFields,

    #[error("Invalid request body: {message}")]
    InvalidBody { message: String },

    #[error("Request body rejected: {message}")]
    BodyRejected { status: StatusCode, message: String },

    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Claude API error: status {status}")]
    Provider { status: StatusCode, body: String },

    #[error("No text content in response")]
    NoTextContent,

    #[error("JSON parse error: {message}")]
    JsonParse { message: String },

    #[error("Schema mismatch: missing fields: {}", missing.join(", "))]
    SchemaMismatch { missing: Vec<String> },

    #[error("Internal server error: {message}")]
    Internal { message: String },
}

impl AppError {
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::MissingFields => "MISSING_FIELDS",
            AppError::InvalidBody { .. } => "INVALID_BODY",
            AppError::BodyRejected { .. } => "BODY_REJECTED",
            AppError::MethodNotAllowed => "METHOD_NOT_ALLOWED",
            AppError::Provider { .. } => "PROVIDER_ERROR",
            AppError::NoTextContent => "NO_TEXT_CONTENT",
            AppError::JsonParse { .. } => "JSON_PARSE_ERROR",
            AppError::SchemaMismatch { .. } => "SCHEMA_MISMATCH",
            AppError::Internal { .. } => "INTERNAL_ERROR",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingFields => StatusCode::BAD_REQUEST,
            AppError::InvalidBody { .. } => StatusCode::BAD_REQUEST,
            AppError::BodyRejected { status, .. } => *status,
            AppError::MethodNotAllowed => StatusCode::METHOD_NOT_ALLOWED,
            AppError::Provider { status, .. } => *status,
            AppError::NoTextContent => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::JsonParse { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::SchemaMismatch { .. } => StatusCode::BAD_GATEWAY,
            AppError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Short label placed in the `error` field of the response envelope.
    pub fn label(&self) -> &'static str {
        match self {
            AppError::MissingFields => "Missing pdfBase64 or apiKey",
            AppError::InvalidBody { .. } | AppError::BodyRejected { .. } => "Invalid request body",
            AppError::MethodNotAllowed => "Method not allowed",
            AppError::Provider { .. } => "Claude API error",
            AppError::NoTextContent => "No text content in response",
            AppError::JsonParse { .. } => "JSON parse error",
            AppError::SchemaMismatch { .. } => "Schema mismatch",
            AppError::Internal { .. } => "Internal server error",
        }
    }

    /// Free-form detail placed in the `details` field, when the variant has one.
    pub fn details(&self) -> Option<String> {
        match self {
            AppError::InvalidBody { message }
            | AppError::BodyRejected { message, .. }
            | AppError::JsonParse { message }
            | AppError::Internal { message } => Some(message.clone()),
            AppError::Provider { body, .. } => Some(body.clone()),
            AppError::SchemaMismatch { missing } => {
                Some(format!("missing fields: {}", missing.join(", ")))
            }
            AppError::MissingFields | AppError::MethodNotAllowed | AppError::NoTextContent => None,
        }
    }

    pub fn to_response_body(&self) -> ErrorResponse {
        ErrorResponse {
            error: self.label().to_string(),
            details: self.details(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();
        let message = self.to_string();

        if status.is_server_error() {
            tracing::error!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "API error occurred"
            );
        } else {
            tracing::warn!(
                error_code = error_code,
                status_code = %status,
                error_message = %message,
                "Request rejected"
            );
        }

        (status, Json(self.to_response_body())).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Internal {
            message: err.to_string(),
        }
    }
}

impl From<BytesRejection> for AppError {
    fn from(rejection: BytesRejection) -> Self {
        AppError::BodyRejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl AppError {
    pub fn invalid_body(message: impl Into<String>) -> Self {
        AppError::InvalidBody {
            message: message.into(),
        }
    }

    pub fn json_parse(message: impl Into<String>) -> Self {
        AppError::JsonParse {
            message: message.into(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        AppError::Internal {
            message: message.into(),
        }
    }
}
