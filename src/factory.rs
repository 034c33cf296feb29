//! Construction of provider instances and static variant metadata.

use crate::config::{ProviderConfig, ProviderKind};
use crate::error::GenResult;
use crate::provider::{AiProvider, ProviderDescriptor};
use crate::providers::{
    AnthropicProvider, GoogleProvider, OllamaProvider, OpenAiProvider, OpenWebUiProvider,
    PublicProvider,
};

/// Construct the provider variant matching `kind` with the given
/// configuration.
///
/// Total over [`ProviderKind`]; unknown discriminators are rejected earlier,
/// when the configuration string is parsed.
///
/// # Errors
///
/// Returns [`GenError::ConfigurationError`](crate::GenError::ConfigurationError)
/// when the variant's required fields (base URL or API key) are missing.
pub fn create_provider(
    kind: ProviderKind,
    config: ProviderConfig,
) -> GenResult<Box<dyn AiProvider>> {
    let provider: Box<dyn AiProvider> = match kind {
        ProviderKind::OpenWebUi => Box::new(OpenWebUiProvider::new(config)?),
        ProviderKind::Public => Box::new(PublicProvider::new(config)),
        ProviderKind::OpenAi => Box::new(OpenAiProvider::new(config)?),
        ProviderKind::Anthropic => Box::new(AnthropicProvider::new(config)?),
        ProviderKind::Google => Box::new(GoogleProvider::new(config)?),
        ProviderKind::Ollama => Box::new(OllamaProvider::new(config)?),
    };
    Ok(provider)
}

/// Static descriptive metadata for every variant, in a stable order.
///
/// Pure and deterministic; used by configuration UIs for display and
/// validation only.
pub fn provider_info() -> &'static [ProviderDescriptor] {
    const INFO: [ProviderDescriptor; 6] = [
        ProviderDescriptor {
            id: ProviderKind::OpenWebUi,
            display_name: "OpenWebUI",
            requires_url: true,
            requires_api_key: false,
            default_url: Some("http://localhost:8080"),
            description: "Self-hosted OpenWebUI instance",
        },
        ProviderDescriptor {
            id: ProviderKind::OpenAi,
            display_name: "OpenAI",
            requires_url: false,
            requires_api_key: true,
            default_url: None,
            description: "OpenAI GPT models (GPT-4, GPT-3.5, etc.)",
        },
        ProviderDescriptor {
            id: ProviderKind::Anthropic,
            display_name: "Anthropic",
            requires_url: false,
            requires_api_key: true,
            default_url: None,
            description: "Anthropic Claude models",
        },
        ProviderDescriptor {
            id: ProviderKind::Google,
            display_name: "Google AI",
            requires_url: false,
            requires_api_key: true,
            default_url: None,
            description: "Google Gemini models",
        },
        ProviderDescriptor {
            id: ProviderKind::Ollama,
            display_name: "Ollama",
            requires_url: true,
            requires_api_key: false,
            default_url: Some("http://localhost:11434"),
            description: "Local Ollama instance",
        },
        ProviderDescriptor {
            id: ProviderKind::Public,
            display_name: "LiteLLM (Public)",
            requires_url: false,
            requires_api_key: false,
            default_url: None,
            description: "Hosted public gateway, no credentials required",
        },
    ];
    &INFO
}
