//! Self-hosted OpenWebUI gateway adapter.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::{AiProvider, Message};
use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

/// Adapter for a self-hosted OpenWebUI instance.
///
/// Speaks the chat-completion shape at `{apiUrl}/api/chat/completions` with
/// an optional bearer token.
#[derive(Debug)]
pub struct OpenWebUiProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl OpenWebUiProvider {
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the base URL is missing.
    pub fn new(config: ProviderConfig) -> GenResult<Self> {
        let base_url = config
            .api_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GenError::configuration_error("OpenWebUI base URL is required"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            config,
        })
    }
}

#[async_trait]
impl AiProvider for OpenWebUiProvider {
    fn name(&self) -> &'static str {
        "OpenWebUI"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!("{}/api/chat/completions", self.base_url);
        let headers = wire::bearer_headers(&self.config.api_key)?;
        let body = wire::ChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(&self.config.system_prompt),
                Message::user(build_prompt(diff)),
            ],
            temperature: Some(0.2),
        };

        log_debug!(provider = "openwebui", url = %url, model = %body.model, "Generating commit message");

        let response =
            wire::send_cancellable(self.client.post(&url).headers(headers).json(&body), cancel)
                .await?;

        if !response.status().is_success() {
            return Err(GenError::request_failed(
                wire::status_detail(response.status()),
                None,
            ));
        }

        let parsed: wire::ChatResponse = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid response body: {e}")))?;
        Ok(clean_message(&parsed.first_content()?))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/api/models", self.base_url);
        let Ok(headers) = wire::bearer_headers(&self.config.api_key) else {
            return false;
        };
        match self.client.get(&url).headers(headers).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> GenResult<Vec<String>> {
        let url = format!("{}/api/models", self.base_url);
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
        Ok(parsed.data.into_iter().map(|m| m.id).collect())
    }
}
