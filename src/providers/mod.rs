//! Provider implementations
//!
//! One wire adapter per backend:
//!
//! - **openwebui**: self-hosted OpenWebUI gateway (chat-completion shape)
//! - **openai**: OpenAI chat completions
//! - **anthropic**: Anthropic Messages API (native format)
//! - **google**: Google generative content API
//! - **ollama**: local Ollama inference server
//! - **public**: hosted credential-less gateway (chat-completion shape)
//!
//! ## Architecture
//!
//! ```text
//! wire.rs                      <- shared chat-completion structures and HTTP helpers
//!    |          |         |
//! openwebui.rs openai.rs public.rs   <- all speak choices[0].message.content
//!
//! anthropic.rs  google.rs  ollama.rs <- native wire formats
//! ```

pub mod anthropic;
pub mod google;
pub mod ollama;
pub mod openai;
pub mod openwebui;
pub mod public;

pub(crate) mod wire;

// Re-export the provider structs
pub use anthropic::AnthropicProvider;
pub use google::GoogleProvider;
pub use ollama::OllamaProvider;
pub use openai::OpenAiProvider;
pub use openwebui::OpenWebUiProvider;
pub use public::{PublicProvider, PUBLIC_BASE_URL};
