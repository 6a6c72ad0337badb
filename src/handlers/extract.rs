use axum::{
    body::Bytes,
    extract::{rejection::BytesRejection, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Json, Response},
};
use std::time::Instant;
use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::handlers::AppState;
use crate::middleware::request_id;
use crate::models::{ExtractRequest, ExtractionResult};

/// `POST /api/extract`: one mill sheet in, six fields out.
///
/// Failures are logged once, by `AppError`'s response conversion.
pub async fn extract_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Bytes, BytesRejection>,
) -> AppResult<Response> {
    let start = Instant::now();
    let request_id = request_id(&headers);
    let body = body?;

    info!(request_id = %request_id, body_size = body.len(), "Starting mill sheet extraction request");

    let (pdf_base64, api_key) = parse_request(&body)?.into_parts()?;

    debug!(
        request_id = %request_id,
        document_length = pdf_base64.len(),
        "Request validated, calling provider"
    );

    let value = state.client.extract(pdf_base64, &api_key).await?;

    let response = if state.config.strict_schema {
        let result = ExtractionResult::from_value(&value);
        let missing = result.missing_fields();
        if !missing.is_empty() {
            return Err(AppError::SchemaMismatch { missing });
        }
        Json(result).into_response()
    } else {
        Json(value).into_response()
    };

    info!(
        request_id = %request_id,
        total_time_ms = start.elapsed().as_millis() as u64,
        "Request completed successfully"
    );

    Ok(response)
}

/// An empty body counts as a request with no fields.
fn parse_request(body: &[u8]) -> AppResult<ExtractRequest> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(ExtractRequest::default());
    }

    let parsed: Option<ExtractRequest> =
        serde_json::from_slice(body).map_err(|e| AppError::invalid_body(e.to_string()))?;

    Ok(parsed.unwrap_or_default())
}

/// Pre-flight discovery: empty success, CORS headers come from the middleware.
pub async fn preflight_handler() -> StatusCode {
    StatusCode::OK
}

pub async fn method_not_allowed_handler() -> AppError {
    AppError::MethodNotAllowed
}
