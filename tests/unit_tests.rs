//! Unit tests for individual components

use axum::http::StatusCode;
use axum::response::IntoResponse;
use millsheet::{
    config::Config,
    error::AppError,
    models::{ErrorResponse, ExtractionResult},
    services::reduce_reply_text,
};
use serde_json::json;
use std::env;

#[test]
fn test_config_from_env() {
    // Only test in this binary touching the environment.
    env::set_var("SERVER_HOST", "127.0.0.1");
    env::set_var("SERVER_PORT", "9090");
    env::set_var("MAX_BODY_SIZE_MB", "not-a-number");
    env::set_var("ANTHROPIC_MODEL", "claude-test");
    env::set_var("STRICT_SCHEMA", "true");
    env::remove_var("ANTHROPIC_API_URL");
    env::remove_var("ANTHROPIC_MAX_TOKENS");

    let config = Config::from_env().unwrap();
    assert_eq!(config.server_host, "127.0.0.1");
    assert_eq!(config.server_port, 9090);
    assert_eq!(config.max_body_size_mb, 32);
    assert_eq!(config.max_body_size_bytes(), 32 * 1024 * 1024);
    assert_eq!(config.anthropic_model, "claude-test");
    assert_eq!(config.anthropic_api_url, "https://api.anthropic.com/v1/messages");
    assert_eq!(config.anthropic_max_tokens, 1000);
    assert!(config.strict_schema);

    env::set_var("ANTHROPIC_API_URL", "ftp://example.com");
    assert!(Config::from_env().is_err());

    for var in [
        "SERVER_HOST",
        "SERVER_PORT",
        "MAX_BODY_SIZE_MB",
        "ANTHROPIC_MODEL",
        "STRICT_SCHEMA",
        "ANTHROPIC_API_URL",
    ] {
        env::remove_var(var);
    }
}

#[test]
fn test_error_codes() {
    assert_eq!(AppError::MissingFields.error_code(), "MISSING_FIELDS");
    assert_eq!(AppError::MethodNotAllowed.error_code(), "METHOD_NOT_ALLOWED");
    assert_eq!(AppError::NoTextContent.error_code(), "NO_TEXT_CONTENT");
    assert_eq!(AppError::json_parse("x").error_code(), "JSON_PARSE_ERROR");
    assert_eq!(AppError::internal("x").error_code(), "INTERNAL_ERROR");
}

#[test]
fn test_error_status_codes() {
    assert_eq!(AppError::MissingFields.status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::invalid_body("x").status_code(), StatusCode::BAD_REQUEST);
    assert_eq!(AppError::MethodNotAllowed.status_code(), StatusCode::METHOD_NOT_ALLOWED);
    assert_eq!(AppError::NoTextContent.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(AppError::json_parse("x").status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        AppError::SchemaMismatch { missing: vec!["date".into()] }.status_code(),
        StatusCode::BAD_GATEWAY
    );

    let provider = AppError::Provider {
        status: StatusCode::TOO_MANY_REQUESTS,
        body: "{}".into(),
    };
    assert_eq!(provider.status_code(), StatusCode::TOO_MANY_REQUESTS);
}

#[test]
fn test_error_envelopes() {
    assert_eq!(
        AppError::MissingFields.to_response_body(),
        ErrorResponse {
            error: "Missing pdfBase64 or apiKey".into(),
            details: None
        }
    );
    assert_eq!(
        serde_json::to_value(AppError::MethodNotAllowed.to_response_body()).unwrap(),
        json!({ "error": "Method not allowed" })
    );
    assert_eq!(
        serde_json::to_value(AppError::internal("connection reset").to_response_body()).unwrap(),
        json!({ "error": "Internal server error", "details": "connection reset" })
    );
}

#[test]
fn test_error_into_response_keeps_relayed_status() {
    let response = AppError::Provider {
        status: StatusCode::from_u16(529).unwrap(),
        body: "overloaded".into(),
    }
    .into_response();
    assert_eq!(response.status().as_u16(), 529);
}

#[test]
fn test_error_conversions() {
    let app_error: AppError = anyhow::anyhow!("Test error").into();
    match app_error {
        AppError::Internal { message } => assert!(message.contains("Test error")),
        _ => panic!("Expected Internal error"),
    }
}

#[test]
fn test_reduced_answer_to_typed_result() {
    let value = reduce_reply_text(
        "```json\n{\"date\":\"251125\",\"spec\":\"SS400\",\"size\":\"19.00x1540xCOIL\",\"charge_no\":\"AE4652\",\"project\":\"ほぼゼロ\",\"maker\":\"東京製鉄\"}\n```",
    )
    .unwrap();

    let result = ExtractionResult::from_value(&value);
    assert!(result.missing_fields().is_empty());
    assert_eq!(result.charge_no.as_deref(), Some("AE4652"));
}
