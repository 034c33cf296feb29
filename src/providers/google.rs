//! Google generative content API adapter.

use super::wire;
use crate::cleaner::clean_message;
use crate::config::ProviderConfig;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use crate::prompt::build_prompt;
use crate::provider::AiProvider;
use async_trait::async_trait;
use serde::Deserialize;
use tokio_util::sync::CancellationToken;

const GOOGLE_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

#[derive(Debug, Deserialize)]
struct ModelCatalog {
    #[serde(default)]
    models: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
struct CatalogEntry {
    name: String,
}

/// Extract the generated text from a generateContent response.
///
/// The upstream API has shipped two response shapes for the same endpoint:
/// `candidates[0].content.parts[*].text` and a direct
/// `candidates[0].content.text`. Both paths are honored, parts first.
fn extract_candidate_text(data: &serde_json::Value) -> GenResult<String> {
    let candidate = data
        .get("candidates")
        .and_then(|c| c.get(0))
        .ok_or_else(|| GenError::response_parsing_error("Google AI returned no candidates"))?;
    let content = candidate.get("content");

    if let Some(text) = content
        .and_then(|c| c.get("parts"))
        .and_then(|p| p.as_array())
        .and_then(|parts| {
            parts
                .iter()
                .find_map(|part| part.get("text").and_then(|t| t.as_str()))
        })
    {
        return Ok(text.to_string());
    }

    if let Some(text) = content.and_then(|c| c.get("text")).and_then(|t| t.as_str()) {
        return Ok(text.to_string());
    }

    Err(GenError::response_parsing_error(
        "Google AI returned no textual content",
    ))
}

/// Adapter for the Google generative content API. Auth is a query-string
/// key on every request.
#[derive(Debug)]
pub struct GoogleProvider {
    client: reqwest::Client,
    base_url: String,
    config: ProviderConfig,
}

impl GoogleProvider {
    /// # Errors
    ///
    /// Returns [`GenError::ConfigurationError`] if the API key is missing.
    pub fn new(config: ProviderConfig) -> GenResult<Self> {
        Self::with_base_url(config, GOOGLE_BASE_URL)
    }

    /// Construct against a non-default endpoint. Used by tests.
    pub fn with_base_url(config: ProviderConfig, base_url: impl Into<String>) -> GenResult<Self> {
        if config.api_key.is_empty() {
            return Err(GenError::configuration_error(
                "Google AI API key is required",
            ));
        }
        Ok(Self {
            client: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        })
    }
}

#[async_trait]
impl AiProvider for GoogleProvider {
    fn name(&self) -> &'static str {
        "Google AI"
    }

    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let url = format!(
            "{}/models/{}:generateContent",
            self.base_url, self.config.model
        );
        let body = serde_json::json!({
            "system_instruction": {
                "parts": [{ "text": self.config.system_prompt }]
            },
            "contents": [
                { "parts": [{ "text": build_prompt(diff) }] }
            ],
            "generationConfig": {
                "temperature": 0.2,
                "maxOutputTokens": 1024
            }
        });

        log_debug!(provider = "google", model = %self.config.model, "Generating commit message");

        let request = self
            .client
            .post(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&body);
        let response = wire::send_cancellable(request, cancel).await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let detail = wire::error_message_from_body(&text)
                .unwrap_or_else(|| wire::status_detail(status));
            return Err(GenError::request_failed(detail, None));
        }

        let data: serde_json::Value = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid response body: {e}")))?;
        Ok(clean_message(&extract_candidate_text(&data)?))
    }

    async fn test_connection(&self) -> bool {
        let url = format!("{}/models", self.base_url);
        match self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await
        {
            Ok(response) => response.status().is_success(),
            Err(_) => false,
        }
    }

    async fn list_models(&self) -> GenResult<Vec<String>> {
        let url = format!("{}/models", self.base_url);
        let response = self
            .client
            .get(&url)
            .query(&[("key", self.config.api_key.as_str())])
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

        let catalog: ModelCatalog = response
            .json()
            .await
            .map_err(|e| GenError::response_parsing_error(format!("invalid model list: {e}")))?;

        let mut models: Vec<String> = catalog
            .models
            .into_iter()
            .map(|m| {
                m.name
                    .strip_prefix("models/")
                    .unwrap_or(&m.name)
                    .to_string()
            })
            .filter(|name| name.starts_with("gemini"))
            .collect();
        models.sort();
        Ok(models)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_text_from_parts() {
        let data = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "text": "feat: parts path" }] }
            }]
        });
        assert_eq!(extract_candidate_text(&data).unwrap(), "feat: parts path");
    }

    #[test]
    fn falls_back_to_direct_content_text() {
        let data = serde_json::json!({
            "candidates": [{
                "content": { "text": "feat: direct path" }
            }]
        });
        assert_eq!(extract_candidate_text(&data).unwrap(), "feat: direct path");
    }

    #[test]
    fn skips_non_text_parts() {
        let data = serde_json::json!({
            "candidates": [{
                "content": { "parts": [{ "thought": true }, { "text": "fix: second part" }] }
            }]
        });
        assert_eq!(extract_candidate_text(&data).unwrap(), "fix: second part");
    }

    #[test]
    fn missing_candidates_is_a_parsing_error() {
        let err = extract_candidate_text(&serde_json::json!({})).unwrap_err();
        assert!(err.to_string().contains("no candidates"));
    }

    #[test]
    fn missing_text_is_a_parsing_error() {
        let data = serde_json::json!({ "candidates": [{ "content": { "parts": [] } }] });
        let err = extract_candidate_text(&data).unwrap_err();
        assert!(err.to_string().contains("no textual content"));
    }
}
