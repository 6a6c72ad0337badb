use std::time::Instant;

use anyhow::Context;
use serde_json::Value;

use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::models::{MessagesRequest, MessagesResponse, ProviderReply};
use crate::services::prompt::EXTRACTION_PROMPT;
use crate::services::reducer::reduce_reply_text;

/// Client for the Anthropic Messages API.
///
/// Holds no credential: the caller's key is attached per request.
#[derive(Debug, Clone)]
pub struct ClaudeClient {
    http: reqwest::Client,
    endpoint: String,
    model: String,
    api_version: String,
    max_tokens: u32,
}

impl ClaudeClient {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            http,
            endpoint: config.anthropic_api_url.clone(),
            model: config.anthropic_model.clone(),
            api_version: config.anthropic_version.clone(),
            max_tokens: config.anthropic_max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn build_query(&self, pdf_base64: String) -> MessagesRequest {
        MessagesRequest::for_pdf(&self.model, self.max_tokens, pdf_base64, EXTRACTION_PROMPT)
    }

    /// Issues the query and buffers the whole reply body.
    pub async fn send(&self, query: &MessagesRequest, api_key: &str) -> AppResult<ProviderReply> {
        let start = Instant::now();

        let response = self
            .http
            .post(&self.endpoint)
            .header("x-api-key", api_key)
            .header("anthropic-version", &self.api_version)
            .json(query)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        tracing::info!(
            status = %status,
            body_length = body.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "Provider call completed"
        );

        Ok(ProviderReply { status, body })
    }

    /// Runs one extraction round trip and reduces the reply to JSON.
    pub async fn extract(&self, pdf_base64: String, api_key: &str) -> AppResult<Value> {
        tracing::debug!(
            model = %self.model,
            document_length = pdf_base64.len(),
            "Building provider query"
        );

        let query = self.build_query(pdf_base64);
        let reply = self.send(&query, api_key).await?;

        reduce_reply(reply)
    }
}

/// Turns a buffered provider reply into the extracted JSON value.
pub fn reduce_reply(reply: ProviderReply) -> AppResult<Value> {
    if !reply.status.is_success() {
        tracing::debug!(status = %reply.status, "Provider returned an error status");
        return Err(AppError::Provider {
            status: reply.status,
            body: reply.body,
        });
    }

    let parsed: MessagesResponse = serde_json::from_str(&reply.body)
        .map_err(|e| AppError::internal(format!("Failed to decode provider reply: {}", e)))?;

    let text = parsed.first_text().ok_or(AppError::NoTextContent)?;

    reduce_reply_text(text)
}
