//! Provider capability contract and shared request types.
//!
//! Every backend implements [`AiProvider`]; variants differ only in wire
//! mapping, auth scheme, and the JSON path used to extract generated text.
//! The dispatch layer never needs to know which variant it is talking to.

use crate::config::ProviderKind;
use crate::error::GenResult;
use async_trait::async_trait;
use serde::Serialize;
use tokio_util::sync::CancellationToken;

/// Role of a chat message. Within a request list the system message, when
/// present, precedes the user message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    System,
    User,
    Assistant,
}

/// One unit of the chat-style request payload.
#[derive(Debug, Clone, Serialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Capability contract satisfied by every provider variant.
///
/// Instances are stateless, own their configuration, and live for a single
/// operation.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Display name used to attribute failures.
    fn name(&self) -> &'static str;

    /// Generate a cleaned commit message for the given diff.
    ///
    /// Observes `cancel`: when cancellation is signaled before or during the
    /// network call, the transport aborts and the operation reports
    /// [`GenError::Cancelled`](crate::GenError::Cancelled).
    async fn generate_commit_message(
        &self,
        diff: &str,
        cancel: &CancellationToken,
    ) -> GenResult<String>;

    /// Minimal, side-effect-free probe against the backend. Returns `true`
    /// only on a 2xx response; any transport or protocol failure is `false`.
    /// Never errors.
    async fn test_connection(&self) -> bool;

    /// Model identifiers offered by the backend. Variants without a
    /// discovery endpoint keep this default empty catalog or return a
    /// literal list.
    async fn list_models(&self) -> GenResult<Vec<String>> {
        Ok(Vec::new())
    }
}

/// Static descriptive metadata for one provider variant, used by
/// configuration UIs and validation. Carries no behavior.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: ProviderKind,
    pub display_name: &'static str,
    pub requires_url: bool,
    pub requires_api_key: bool,
    pub default_url: Option<&'static str>,
    pub description: &'static str,
}
