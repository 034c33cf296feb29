//! Provider discriminators, per-operation configuration, and the injected
//! settings/secret stores the dispatcher reads from.

use crate::error::{GenError, GenResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::Mutex;

/// Recognized settings keys, read afresh at the start of every operation.
pub mod settings_keys {
    pub const PROVIDER: &str = "provider";
    pub const API_URL: &str = "apiUrl";
    pub const API_KEY: &str = "apiKey";
    pub const MODEL: &str = "model";
    pub const SYSTEM_PROMPT: &str = "systemPrompt";
}

/// Closed set of supported provider backends.
///
/// Parsing an unknown discriminator is the one place an invalid
/// configuration value becomes a hard error; dispatch over the enum itself
/// is exhaustive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    OpenWebUi,
    Public,
    OpenAi,
    Anthropic,
    Google,
    Ollama,
}

impl ProviderKind {
    /// All supported kinds, in descriptor order.
    pub const ALL: [ProviderKind; 6] = [
        ProviderKind::OpenWebUi,
        ProviderKind::OpenAi,
        ProviderKind::Anthropic,
        ProviderKind::Google,
        ProviderKind::Ollama,
        ProviderKind::Public,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ProviderKind::OpenWebUi => "openwebui",
            ProviderKind::Public => "public",
            ProviderKind::OpenAi => "openai",
            ProviderKind::Anthropic => "anthropic",
            ProviderKind::Google => "google",
            ProviderKind::Ollama => "ollama",
        }
    }
}

impl std::fmt::Display for ProviderKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderKind {
    type Err = GenError;

    fn from_str(s: &str) -> GenResult<Self> {
        match s.to_lowercase().as_str() {
            "openwebui" => Ok(ProviderKind::OpenWebUi),
            "public" => Ok(ProviderKind::Public),
            "openai" => Ok(ProviderKind::OpenAi),
            "anthropic" => Ok(ProviderKind::Anthropic),
            "google" => Ok(ProviderKind::Google),
            "ollama" => Ok(ProviderKind::Ollama),
            _ => Err(GenError::unsupported_provider(s)),
        }
    }
}

/// Per-operation provider configuration.
///
/// Built fresh by the dispatcher for each call and owned by the provider
/// instance for its lifetime; never mutated after construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Base URL for self-hosted backends; `None` for backends with a fixed
    /// upstream endpoint.
    pub api_url: Option<String>,
    /// API key; empty when the backend needs none.
    pub api_key: String,
    /// Model identifier. Required (non-empty) for generation.
    pub model: String,
    /// System prompt sent with every generation request.
    pub system_prompt: String,
}

/// Flat key/value configuration source, read at the start of every
/// operation.
pub trait SettingsStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
}

impl SettingsStore for HashMap<String, String> {
    fn get(&self, key: &str) -> Option<String> {
        HashMap::get(self, key).cloned()
    }
}

/// External secret storage, used only for the public variant's API key.
///
/// Lookups are synchronous and side-effect-free.
pub trait SecretStore: Send + Sync {
    fn get(&self, key: &str) -> Option<String>;
    fn store(&self, key: &str, value: &str);
}

/// In-memory [`SecretStore`] for embedding and tests.
#[derive(Debug, Default)]
pub struct MemorySecretStore {
    secrets: Mutex<HashMap<String, String>>,
}

impl MemorySecretStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SecretStore for MemorySecretStore {
    fn get(&self, key: &str) -> Option<String> {
        self.secrets
            .lock()
            .expect("secret store lock poisoned")
            .get(key)
            .cloned()
    }

    fn store(&self, key: &str, value: &str) {
        self.secrets
            .lock()
            .expect("secret store lock poisoned")
            .insert(key.to_string(), value.to_string());
    }
}
