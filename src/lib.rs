//! # commitgen
//!
//! Generates conventional commit messages from git diffs by delegating to
//! one of several interchangeable LLM backends.
//!
//! ## Key Features
//!
//! - **Multiple Providers**: OpenWebUI, OpenAI, Anthropic, Google, Ollama,
//!   and a hosted credential-less public gateway behind one trait
//! - **Uniform Dispatch**: configuration resolution, provider construction,
//!   and error attribution in one place
//! - **Cooperative Cancellation**: the in-flight HTTP request aborts as soon
//!   as the caller's token is cancelled
//! - **Response Cleaning**: raw model output is stripped of code fences and
//!   narrative preambles before it reaches the caller
//!
//! ## Example
//!
//! ```rust,no_run
//! use commitgen::{CancellationToken, CommitMessageClient};
//! use std::collections::HashMap;
//! use std::sync::Arc;
//!
//! # async fn example() -> commitgen::GenResult<()> {
//! let settings: HashMap<String, String> = [
//!     ("provider".to_string(), "ollama".to_string()),
//!     ("apiUrl".to_string(), "http://localhost:11434".to_string()),
//!     ("model".to_string(), "llama3".to_string()),
//! ]
//! .into();
//!
//! let client = CommitMessageClient::new(Arc::new(settings));
//! let cancel = CancellationToken::new();
//! let message = client
//!     .generate_commit_message("diff --git a/src/main.rs ...", &cancel)
//!     .await?;
//! println!("{message}");
//! # Ok(())
//! # }
//! ```

pub mod cleaner;
pub mod client;
pub mod config;
pub mod error;
pub mod factory;
pub mod prompt;
pub mod provider;
pub mod providers;
pub mod public_key;

// Logging utilities (re-exports tracing with log_* naming) - internal only
pub(crate) mod logging;

// Re-export main types
pub use cleaner::clean_message;
pub use client::CommitMessageClient;
pub use config::{
    settings_keys, MemorySecretStore, ProviderConfig, ProviderKind, SecretStore, SettingsStore,
};
pub use error::{GenError, GenResult};
pub use factory::{create_provider, provider_info};
pub use prompt::{build_prompt, DEFAULT_SYSTEM_PROMPT};
pub use provider::{AiProvider, Message, MessageRole, ProviderDescriptor};
pub use public_key::{
    ensure_public_api_key, regenerate_public_api_key, request_new_public_api_key,
    PUBLIC_API_KEY_SECRET, PUBLIC_REGISTRATION_URL,
};

// Caller-owned cancellation token, re-exported so callers need not depend on
// tokio-util directly.
pub use tokio_util::sync::CancellationToken;
