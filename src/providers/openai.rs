//! OpenAI chat-completion adapter.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::{AiProvider, Message};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

const OPENAI_BASE_URL: &str = "https://api.openai.com/v1";

/// The reasoning-model subfamily rejects an explicit `temperature`.
fn supports_temperature(model: &str) -> bool {
    !(model.starts_with("o1") || model.starts_with("o3") || model.ends_with("-nano"))
}

/// Adapter for the OpenAI chat completions API.
#[derive(Debug)]
pub struct OpenAiProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl OpenAiProvider {
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the API key is missing.
    pub fn new(config: ProviderConfig) -> GenResult<Self> {
        Self::with_base_url(config, OPENAI_BASE_URL)
    }

    /// Construct against a non-default endpoint. Used by tests.
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> GenResult<Self> {
        if config.api_key.is_empty() {
            return Err(GenError::configuration_error("OpenAI API key is required"));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        })
    }
}

#[async_trait]
impl AiProvider for OpenAiProvider {
    fn name(&self) -> &'static str {
        "OpenAI"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!("{}/chat/completions", self.base_url);
        let headers = wire::bearer_headers(&self.config.api_key)?;
        let body = wire::ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(&self.config.system_prompt),
                Message::user(build_prompt(diff)),
            ],
            temperature: supports_temperature(&self.config.model).then_some(0.2),
        };

        log_debug!(provider = "openai", model = %body.model, "Generating commit message");

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
        let headers = wire::bearer_headers(&self.config.api_key)?;
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
            return Err(GenError::request_failed(
                format!(
                    "failed to load models: {}",
                    wire::status_detail(response.status())
                ),
                None,
            ));
        }

        let parsed: wire::ModelList = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid model list: {e}")))?;

        let mut models: Vec<String> = parsed
            .data
            .into_iter()
            .map(|m| m.id)
            .filter(|id| id.starts_with("gpt-") || id.starts_with("o1"))
            .collect();
        models.sort();
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reasoning_subfamily_has_no_temperature() {
        assert!(!supports_temperature("o1-mini"));
        assert!(!supports_temperature("o3"));
        assert!(!supports_temperature("gpt-4.1-nano"));
        assert!(supports_temperature("gpt-4"));
        assert!(supports_temperature("gpt-4o-mini"));
    }
}
