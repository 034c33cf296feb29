//! Dispatcher: resolves configuration, constructs a provider, invokes the
//! requested operation, and normalizes errors.
//!
//! The client itself is stateless between operations: every call reads a
//! fresh settings snapshot and builds a fresh provider instance. The
//! cancellation token is owned by the caller and scoped to one generation
//! request.

use crate::config::{
    settings_keys, ProviderConfig, ProviderKind, SecretStore, SettingsStore,
};
use crate::error::{GenError, GenResult};
use crate::factory;
use crate::logging::log_debug;
use crate::prompt::DEFAULT_SYSTEM_PROMPT;
use crate::public_key::PUBLIC_API_KEY_SECRET;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

/// Entry point for commit message generation, connection probing, and model
/// discovery over the configured provider.
pub struct CommitMessageClient {
    settings: Arc<dyn SettingsStore>,
    secrets: Option<Arc<dyn SecretStore>>,
}

impl CommitMessageClient {
    /// Client without a secret store; the public variant will report
    /// "credential store not initialized".
    pub fn new(settings: Arc<dyn SettingsStore>) -> Self {
        Self {
            settings,
            secrets: None,
        }
    }

    /// Client with the secret store the public variant draws its API key
    /// from.
    pub fn with_secret_store(settings: Arc<dyn SettingsStore>, secrets: Arc<dyn SecretStore>) -> Self {
        Self {
            settings,
            secrets: Some(secrets),
        }
    }

    /// Snapshot the settings store into a provider kind and configuration.
    ///
    /// The public variant's key is replaced with the secret-store value and
    /// its URL cleared, regardless of what the settings store holds.
    fn resolve(&self, require_key: bool) -> GenResult<(ProviderKind, ProviderConfig)> {
        let kind = match self.settings.get(settings_keys::PROVIDER) {
            Some(value) if !value.is_empty() => value.parse::<ProviderKind>()?,
            _ => ProviderKind::OpenWebUi,
        };

        let mut api_url = self
            .settings
            .get(settings_keys::API_URL)
            .filter(|url| !url.is_empty());
        let mut api_key = self
            .settings
            .get(settings_keys::API_KEY)
            .unwrap_or_default();
        let model = self.settings.get(settings_keys::MODEL).unwrap_or_default();
        let system_prompt = self
            .settings
            .get(settings_keys::SYSTEM_PROMPT)
            .map(|prompt| prompt.trim().to_string())
            .filter(|prompt| !prompt.is_empty())
            .unwrap_or_else(|| DEFAULT_SYSTEM_PROMPT.to_string());

        if kind == ProviderKind::Public {
            let secrets = self.secrets.as_ref().ok_or_else(|| {
                GenError::configuration_error("credential store not initialized")
            })?;
            // The public gateway owns its endpoint; a stored URL never applies.
            api_url = None;
            api_key = match secrets.get(PUBLIC_API_KEY_SECRET) {
                Some(key) if !key.is_empty() => key,
                _ if require_key => {
                    return Err(GenError::configuration_error("public API key missing"))
                }
                _ => String::new(),
            };
        }

        log_debug!(
            provider = kind.as_str(),
            has_api_url = api_url.is_some(),
            has_api_key = !api_key.is_empty(),
            has_model = !model.is_empty(),
            "Resolved provider configuration"
        );

        Ok((
            kind,
            ProviderConfig {
                api_url,
                api_key,
                model,
                system_prompt,
            },
        ))
    }

    /// Generate a commit message for the given diff.
    ///
    /// Fails fast with a "no model selected" error when the resolved model
    /// is empty, before any provider is constructed. Provider failures are
    /// attributed by display name; cancellation passes through unwrapped.
    pub async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String> {
        let (kind, config) = self.resolve(true)?;

        if config.model.is_empty() {
            return Err(GenError::configuration_error(
                "No model selected. Please configure a model in settings.",
            ));
        }

        let provider = factory::create_provider(kind, config)?;
        provider
            .generate_commit_message(diff, cancel)
            .await
            .map_err(|err| GenError::provider_error(provider.name(), err))
    }

    /// Probe the configured backend. Never errors: construction or
    /// transport failure of any sort is `false`.
    pub async fn test_connection(&self) -> bool {
        let Ok((kind, config)) = self.resolve(false) else {
            return false;
        };
        let Ok(provider) = factory::create_provider(kind, config) else {
            return false;
        };
        provider.test_connection().await
    }

    /// List the configured backend's models. Empty for variants without
    /// discovery; errors propagate unchanged (no provider-name prefix).
    pub async fn list_models(&self) -> GenResult<Vec<String>> {
        let (kind, config) = self.resolve(true)?;
        let provider = factory::create_provider(kind, config)?;
        provider.list_models().await
    }
}
