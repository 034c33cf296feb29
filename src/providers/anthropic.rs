//! Anthropic Messages API adapter.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::{AiProvider, Message};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

const ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com/v1";
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Fixed model catalog; the Messages API has no discovery endpoint this
/// adapter uses.
const MODEL_CATALOG: [&str; 5] = [
    "claude-3-5-sonnet-20241022",
    "claude-3-5-haiku-20241022",
    "claude-3-opus-20240229",
    "claude-3-sonnet-20240229",
    "claude-3-haiku-20240307",
];

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    system: &'a str,
    messages: Vec<Message>,
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(default)]
    text: String,
}

/// Adapter for the Anthropic Messages API. Auth is an `x-api-key` header
/// plus a fixed `anthropic-version` header.
#[derive(Debug)]
pub struct AnthropicProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl AnthropicProvider {
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the API key is missing.
    pub fn new(config: ProviderConfig) -> GenResult<Self> {
        Self::with_base_url(config, ANTHROPIC_BASE_URL)
    }

    /// Construct against a non-default endpoint. Used by tests.
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> GenResult<Self> {
        if config.api_key.is_empty() {
            return Err(GenError::configuration_error(
                "Anthropic API key is required",
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        })
    }

    fn auth_headers(&self) -> GenResult<HeaderMap> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(
            "x-api-key",
            HeaderValue::from_str(&self.config.api_key).map_err(|e| {
                GenError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        headers.insert(
            "anthropic-version",
            HeaderValue::from_static(ANTHROPIC_VERSION),
        );
        Ok(headers)
    }
}

#[async_trait]
impl AiProvider for AnthropicProvider {
    fn name(&self) -> &'static str {
        "Anthropic"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!("{}/messages", self.base_url);
        let headers = self.auth_headers()?;
        let body = MessagesRequest {
            model: &self.config.model,
            max_tokens: 1024,
            system: &self.config.system_prompt,
            messages: vec![Message::user(build_prompt(diff))],
            temperature: 0.2,
        };

        log_debug!(provider = "anthropic", model = %self.config.model, "Generating commit message");

        let response =
            wire::send_cancellable(self.client.post(&url).headers(headers).json(&body), cancel)
                .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = wire::error_message_from_body(&text)
                .unwrap_or_else(|| wire::status_detail(status));
            return Err(GenError::request_failed(detail, None));
        }

        let parsed: MessagesResponse = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid response body: {e}")))?;
        let text = parsed
            .content
            .into_iter()
            .next()
            .map(|block| block.text)
            .ok_or_else(|| GenError::response_parsing_error("no content blocks in response"))?;
        Ok(clean_message(&text))
    }

    async fn test_connection(&self) -> bool {
        // Minimal 1-message probe; the Messages API has no cheap GET.
        let url = format!("{}/messages", self.base_url);
        let Ok(headers) = self.auth_headers() else {
            return false;
        };
        let model = if self.config.model.is_empty() {
            "claude-3-5-sonnet-20241022"
        } else {
            &self.config.model
        };
        let body = serde_json::json!({
            "model": model,
            "max_tokens": 10,
            "messages": [{ "role": "user", "content": "test" }]
        });
        match self.client.post(&url).headers(headers).json(&body).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> GenResult<Vec<String>> {
        Ok(MODEL_CATALOG.iter().map(|m| (*m).to_string()).collect())
    }
}
