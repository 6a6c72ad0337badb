use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Keys of the six extracted fields, in prompt order.
pub const FIELD_NAMES: [&str; 6] = ["date", "spec", "size", "charge_no", "project", "maker"];

/// The normalized mill sheet fields.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ExtractionResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spec: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub charge_no: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub maker: Option<String>,
}

impl ExtractionResult {
    /// Coerces whatever the model emitted into the six fields.
    ///
    /// Strings are kept, numbers and booleans are rendered as strings, anything
    /// else (null, arrays, objects, absent keys) becomes `None`. A non-object
    /// value yields an empty result.
    pub fn from_value(value: &Value) -> Self {
        let field = |name: &str| value.get(name).and_then(coerce_string);

        Self {
            date: field("date"),
            spec: field("spec"),
            size: field("size"),
            charge_no: field("charge_no"),
            project: field("project"),
            maker: field("maker"),
        }
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        let slot = match name {
            "date" => &self.date,
            "spec" => &self.spec,
            "size" => &self.size,
            "charge_no" => &self.charge_no,
            "project" => &self.project,
            "maker" => &self.maker,
            _ => return None,
        };
        slot.as_deref()
    }

    /// Names of the fields that carry no value.
    pub fn missing_fields(&self) -> Vec<String> {
        FIELD_NAMES
            .iter()
            .filter(|name| self.get(name).is_none())
            .map(|name| name.to_string())
            .collect()
    }
}

fn coerce_string(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Error envelope returned to callers.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct ErrorResponse {
    pub error: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

/// Raw provider answer: status code plus the fully buffered body.
#[derive(Debug, Clone)]
pub struct ProviderReply {
    pub status: axum::http::StatusCode,
    pub body: String,
}

/// The part of a Messages API response body the service reads.
#[derive(Debug, Default, Deserialize)]
pub struct MessagesResponse {
    #[serde(default)]
    pub content: Vec<ResponseBlock>,
}

#[derive(Debug, Deserialize)]
pub struct ResponseBlock {
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    #[serde(default)]
    pub text: Option<String>,
}

impl MessagesResponse {
    /// Text of the first `text` block, if any.
    pub fn first_text(&self) -> Option<&str> {
        self.content
            .iter()
            .find(|block| block.kind.as_deref() == Some("text"))
            .map(|block| block.text.as_deref().unwrap_or(""))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn coerces_numbers_and_drops_nulls() {
        let value = json!({
            "date": 251125,
            "spec": "SS400",
            "size": null,
            "charge_no": ["AE4652"],
            "maker": "東京製鉄"
        });

        let result = ExtractionResult::from_value(&value);
        assert_eq!(result.date.as_deref(), Some("251125"));
        assert_eq!(result.spec.as_deref(), Some("SS400"));
        assert_eq!(result.size, None);
        assert_eq!(result.charge_no, None);
        assert_eq!(result.maker.as_deref(), Some("東京製鉄"));
        assert_eq!(result.missing_fields(), vec!["size", "charge_no", "project"]);
    }

    #[test]
    fn non_object_is_empty() {
        let result = ExtractionResult::from_value(&json!(["date"]));
        assert_eq!(result, ExtractionResult::default());
        assert_eq!(result.missing_fields().len(), 6);
    }

    #[test]
    fn first_text_skips_other_blocks() {
        let reply: MessagesResponse = serde_json::from_value(json!({
            "id": "msg_01",
            "content": [
                { "type": "thinking", "thinking": "..." },
                { "type": "text", "text": "{\"date\":\"250101\"}" },
                { "type": "text", "text": "second" }
            ]
        }))
        .unwrap();

        assert_eq!(reply.first_text(), Some("{\"date\":\"250101\"}"));
    }

    #[test]
    fn untyped_blocks_are_skipped() {
        let reply: MessagesResponse = serde_json::from_value(json!({
            "content": [
                { "text": "x" },
                { "type": "text", "text": "{}" }
            ]
        }))
        .unwrap();

        assert_eq!(reply.first_text(), Some("{}"));
    }

    #[test]
    fn missing_content_has_no_text() {
        let reply: MessagesResponse = serde_json::from_value(json!({ "id": "msg_01" })).unwrap();
        assert_eq!(reply.first_text(), None);
    }
}
