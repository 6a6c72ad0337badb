//! Reduces the model's reply text to a JSON value.
//!
//! The prompt asks for bare JSON, but models still wrap answers in
//! ```` ```json ```` fences or pad them with whitespace. The first fenced
//! block wins; without one the whole text is parsed.

use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use crate::error::{AppError, AppResult};

static RE_FENCED_BLOCK: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?s)```(?:json)?\s*(.*?)\s*```").expect("fence pattern compiles"));

/// Returns the inner text of the first fenced block, or the input unchanged.
pub fn strip_code_fence(text: &str) -> &str {
    RE_FENCED_BLOCK
        .captures(text)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
        .unwrap_or(text)
}

/// Parses the reply text as JSON, unwrapping a code fence first.
///
/// The parsed value is returned as-is; field presence is not checked here.
pub fn reduce_reply_text(text: &str) -> AppResult<Value> {
    let candidate = strip_code_fence(text).trim();

    serde_json::from_str(candidate).map_err(|e| {
        tracing::debug!(error = %e, text_length = text.len(), "Reply text is not valid JSON");
        AppError::json_parse(e.to_string())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const FULL_ANSWER: &str = r#"{"date":"251125","spec":"SS400","size":"19.00x1540xCOIL","charge_no":"AE4652","project":"ほぼゼロ","maker":"東京製鉄"}"#;

    #[test]
    fn bare_json_passes_through() {
        let value = reduce_reply_text(FULL_ANSWER).unwrap();
        assert_eq!(
            value,
            json!({
                "date": "251125",
                "spec": "SS400",
                "size": "19.00x1540xCOIL",
                "charge_no": "AE4652",
                "project": "ほぼゼロ",
                "maker": "東京製鉄"
            })
        );
    }

    #[test]
    fn key_order_is_kept() {
        let value = reduce_reply_text(FULL_ANSWER).unwrap();
        assert_eq!(serde_json::to_string(&value).unwrap(), FULL_ANSWER);

        let fenced = reduce_reply_text("```json\n{\"maker\":\"東京製鉄\",\"date\":\"251125\"}\n```").unwrap();
        assert_eq!(
            serde_json::to_string(&fenced).unwrap(),
            r#"{"maker":"東京製鉄","date":"251125"}"#
        );
    }

    #[test]
    fn json_fence_is_stripped() {
        let value = reduce_reply_text("```json\n{\"date\":\"250101\"}\n```").unwrap();
        assert_eq!(value, json!({ "date": "250101" }));
    }

    #[test]
    fn untagged_fence_is_stripped() {
        let value = reduce_reply_text("```\n{\"maker\":\"JFEスチール\"}\n```").unwrap();
        assert_eq!(value, json!({ "maker": "JFEスチール" }));
    }

    #[test]
    fn surrounding_prose_is_ignored_when_fenced() {
        let text = "Here is the result:\n```json\n{\"spec\": \"SS400\"}\n```\nLet me know if you need more.";
        assert_eq!(reduce_reply_text(text).unwrap(), json!({ "spec": "SS400" }));
    }

    #[test]
    fn first_fence_wins() {
        let text = "```json\n{\"a\":1}\n```\n```json\n{\"b\":2}\n```";
        assert_eq!(reduce_reply_text(text).unwrap(), json!({ "a": 1 }));
    }

    #[test]
    fn whitespace_is_trimmed() {
        let text = format!("\n\n   {FULL_ANSWER}   \n");
        assert!(reduce_reply_text(&text).is_ok());
    }

    #[test]
    fn refusal_is_a_parse_error() {
        match reduce_reply_text("Sorry, I cannot process this.") {
            Err(AppError::JsonParse { message }) => assert!(!message.is_empty()),
            other => panic!("expected JsonParse error, got {:?}", other),
        }
    }

    #[test]
    fn non_object_json_is_returned_verbatim() {
        assert_eq!(reduce_reply_text("[1, 2]").unwrap(), json!([1, 2]));
    }

    #[test]
    fn reducing_twice_is_identical() {
        let text = "```json\n{\"date\":\"250101\",\"size\":\"9.00x1219x2438\"}\n```";
        let first = serde_json::to_string(&reduce_reply_text(text).unwrap()).unwrap();
        let second = serde_json::to_string(&reduce_reply_text(text).unwrap()).unwrap();
        assert_eq!(first, second);
    }
}
