//! Shared wire structures and HTTP helpers for chat-completion backends.
//!
//! The self-hosted gateway, OpenAI, and the hosted public gateway all speak
//! the same `choices[0].message.content` chat-completion shape; the
//! structures here are reused by those adapters.

use crate::error::{GenError, GenResult};
use crate::provider::Message;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

/// Chat-completion request body.
#[derive(Debug, Clone, Serialize)]
pub(crate) struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f64>,
}

/// Chat-completion response body.
#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatChoice {
    pub message: ChatResponseMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatResponseMessage {
    #[serde(default)]
    pub content: String,
}

impl ChatResponse {
    /// Text of the first choice.
    pub(crate) fn first_content(self) -> GenResult<String> {
        self.choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| GenError::response_parsing_error("no choices in response"))
    }
}

/// Model catalog response (`GET /models` shape).
#[derive(Debug, Deserialize)]
pub(crate) struct ModelList {
    #[serde(default)]
    pub data: Vec<ModelEntry>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ModelEntry {
    pub id: String,
}

/// JSON content type plus a bearer token when `api_key` is non-empty.
pub(crate) fn bearer_headers(api_key: &str) -> GenResult<HeaderMap> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    if !api_key.is_empty() {
        let value = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|e| {
            GenError::configuration_error(format!("Invalid API key format: {e}"))
        })?;
        headers.insert(AUTHORIZATION, value);
    }
    Ok(headers)
}

/// Canonical status text for a non-2xx response (`"Not Found"`).
pub(crate) fn status_detail(status: reqwest::StatusCode) -> String {
    status
        .canonical_reason()
        .map(str::to_owned)
        .unwrap_or_else(|| status.to_string())
}

/// Best-effort `error.message` extraction from a JSON error body.
pub(crate) fn error_message_from_body(body: &str) -> Option<String> {
    serde_json::from_str::<serde_json::Value>(body)
        .ok()?
        .get("error")?
        .get("message")?
        .as_str()
        .map(str::to_owned)
}

/// Race an in-flight request against the caller's cancellation token.
///
/// Dropping the reqwest future closes the underlying connection, so the
/// transport itself aborts as soon as cancellation is observed.
pub(crate) async fn send_cancellable(
    request: reqwest::RequestBuilder,
    cancel: &CancellationToken,
) -> GenResult<reqwest::Response> {
    if cancel.is_cancelled() {
        return Err(GenError::cancelled());
    }
    tokio::select! {
        () = cancel.cancelled() => Err(GenError::cancelled()),
        result = request.send() => result.map_err(|e| {
            GenError::request_failed(format!("request failed: {e}"), Some(Box::new(e)))
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_error_message_field() {
        let body = r#"{"error":{"message":"model not found","type":"invalid_request_error"}}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("model not found")
        );
    }

    #[test]
    fn falls_back_when_error_field_absent() {
        assert_eq!(error_message_from_body(r#"{"detail":"nope"}"#), None);
        assert_eq!(error_message_from_body("not json"), None);
    }

    #[test]
    fn bearer_header_omitted_for_empty_key() {
        let headers = bearer_headers("").unwrap();
        assert!(!headers.contains_key(AUTHORIZATION));
        let headers = bearer_headers("sk-test").unwrap();
        assert_eq!(headers.get(AUTHORIZATION).unwrap(), "Bearer sk-test");
    }

    #[test]
    fn chat_request_omits_absent_temperature() {
        let request = ChatRequest {
            model: "m".to_string(),
            messages: Vec::new(),
            temperature: None,
        };
        let json = serde_json::to_value(&request).unwrap();
        assert!(json.get("temperature").is_none());
    }
}
