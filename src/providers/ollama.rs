//! Local Ollama inference server adapter.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::{AiProvider, Message};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio_util::sync::CancellationToken;

#[derive(Debug, Serialize)]
struct OllamaChatRequest {
    model: String,
    messages: Vec<Message>,
    stream: bool,
    options: OllamaOptions,
}

#[derive(Debug, Serialize)]
struct OllamaOptions {
    temperature: f64,
}

#[derive(Debug, Deserialize)]
struct OllamaChatResponse {
    message: OllamaResponseMessage,
}

#[derive(Debug, Deserialize)]
struct OllamaResponseMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct OllamaTags {
    #[serde(default)]
    models: Vec<OllamaModel>,
}

#[derive(Debug, Deserialize)]
struct OllamaModel {
    name: String,
}

/// Adapter for a local Ollama instance. No auth; streaming is disabled
/// explicitly since Ollama streams by default.
#[derive(Debug)]
pub struct OllamaProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl OllamaProvider {
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the base URL is missing.
    pub fn new(config: ProviderConfig) -> GenResult<Self> {
        let base_url = config
            .api_url
            .clone()
            .filter(|url| !url.is_empty())
            .ok_or_else(|| GenError::configuration_error("Ollama base URL is required"))?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
            config,
        })
    }
}

#[async_trait]
impl AiProvider for OllamaProvider {
    fn name(&self) -> &'static str {
        "Ollama"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!("{}/api/chat", self.base_url);
        let body = OllamaChatRequest {
            model: self.config.model.clone(),
            messages: vec![
                Message::system(&self.config.system_prompt),
                Message::user(build_prompt(diff)),
            ],
            stream: false,
            options: OllamaOptions { temperature: 0.2 },
        };

        log_debug!(provider = "ollama", url = %url, model = %body.model, "Generating commit message");

        let response = wire::send_cancellable(self.client.post(&url).json(&body), cancel).await?;

        if !response.status().is_success() {
            return Err(GenError::request_failed(
                wire::status_detail(response.status()),
                None,
            ));
        }

        let parsed: OllamaChatResponse = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid response body: {e}")))?;
        Ok(clean_message(&parsed.message.content))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/api/tags", self.base_url);
        match self.client.get(&url).send().await {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> GenResult<Vec<String>> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self.client.get(&url).send().await.map_err(|e| {
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

        let tags: OllamaTags = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid model list: {e}")))?;

        let mut models: Vec<String> = tags.models.into_iter().map(|m| m.name).collect();
        models.sort();
        Ok(models)
    }
}
