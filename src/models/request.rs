use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Inbound body of `POST /api/extract`.
#[derive(Debug, Default, Deserialize)]
pub struct ExtractRequest {
    #[serde(rename = "pdfBase64")]
    pub pdf_base64: Option<String>,
    #[serde(rename = "apiKey")]
    pub api_key: Option<String>,
}

impl ExtractRequest {
    /// Returns `(pdf_base64, api_key)` when both are present and non-empty.
    pub fn into_parts(self) -> AppResult<(String, String)> {
        match (self.pdf_base64, self.api_key) {
            (Some(pdf), Some(key)) if !pdf.is_empty() && !key.is_empty() => Ok((pdf, key)),
            _ => Err(AppError::MissingFields),
        }
    }
}

// The Messages API request: one user turn holding a document and the prompt.

#[derive(Debug, Clone, Serialize)]
pub struct MessagesRequest {
    pub model: String,
    pub max_tokens: u32,
    pub messages: Vec<Message>,
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: &'static str,
    pub content: Vec<ContentBlock>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ContentBlock {
    Document { source: DocumentSource },
    Text { text: String },
}

#[derive(Debug, Clone, Serialize)]
pub struct DocumentSource {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub media_type: &'static str,
    pub data: String,
}

impl MessagesRequest {
    pub fn for_pdf(model: &str, max_tokens: u32, pdf_base64: String, prompt: &str) -> Self {
        Self {
            model: model.to_string(),
            max_tokens,
            messages: vec![Message {
                role: "user",
                content: vec![
                    ContentBlock::Document {
                        source: DocumentSource {
                            kind: "base64",
                            media_type: "application/pdf",
                            data: pdf_base64,
                        },
                    },
                    ContentBlock::Text {
                        text: prompt.to_string(),
                    },
                ],
            }],
        }
    }
}
