//! Hosted public gateway adapter.
//!
//! Credential-less from the user's point of view: the API key comes from
//! the secret store (see the dispatcher) and the endpoint is fixed here,
//! never taken from user configuration.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::{AiProvider, Message};
use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue};
use tokio_util::sync::CancellationToken;

/// Fixed endpoint of the hosted gateway.
pub const PUBLIC_BASE_URL: &str = "https://llm.shortn.cloud/v1";

const API_KEY_HEADER: &str = "x-litellm-api-key";

/// Adapter for the hosted LiteLLM gateway. Chat-completion wire shape with
/// a gateway-specific key header alongside the bearer token.
#[derive(Debug)]
pub struct PublicProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl PublicProvider {
    pub fn new(config: ProviderConfig) -> Self {
        Self::with_base_url(config, PUBLIC_BASE_URL)
    }

    /// Construct against a non-default endpoint. Used by tests.
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        }
    }

    fn gateway_headers(&self) -> GenResult<HeaderMap> {
        let mut headers = wire::bearer_headers(&self.config.api_key)?;
        headers.insert(
            API_KEY_HEADER,
            HeaderValue::from_str(&self.config.api_key).map_err(|e| {
                GenError::configuration_error(format!("Invalid API key format: {e}"))
            })?,
        );
        Ok(headers)
    }
}

#[async_trait]
impl AiProvider for PublicProvider {
    fn name(&self) -> &'static str {
        "LiteLLM (Public)"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let headers = self.gateway_headers()?;
        let body = wire::ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(&self.config.system_prompt),
                Message::user(build_prompt(diff)),
            ],
            temperature: Some(0.2),
        };

        log_debug!(provider = "public", model = %body.model, "Generating commit message");

        let response =
            wire::send_cancellable(self.client.post(&url).headers(headers).json(&body), cancel)
                .await?;

        if !response.status().is_success() {
            // The gateway reports errors as plain text; pass the body through.
            let text = response.text().await.unwrap_or_default();
            return Err(GenError::request_failed(text, None));
        }

        let parsed: wire::ChatResponse = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid response body: {e}")))?;
        Ok(clean_message(&parsed.first_content()?))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        let Ok(headers) = wire::bearer_headers(&self.config.api_key) else {
            return false;
        };
        match self.client.get(&url).headers(headers).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> GenResult<Vec<String>> {
        let url = format!("{}/models", self.base_url);
        let headers = self.gateway_headers()?;
        let response = self
            .client
            .get(&url)
            .headers(headers)
            .send()
            .await
            .map_err(|e| {
                GenError::request_failed(format!("failed to load models: {e}"), Some(Box::new(e)))
            })?;

        if !response.status().is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenError::request_failed(
                format!("failed to load models: {text}"),
                None,
            ));
        }

        let parsed: wire::ModelList = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid model list: {e}")))?;
        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }
}
