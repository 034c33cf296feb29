//! Error types for commit message generation.
//!
//! The main error type is [`GenError`], which covers all failure modes:
//! - Configuration errors (missing model, missing credentials, unknown provider)
//! - Request failures (network issues, non-2xx provider responses)
//! - Malformed responses (an expected field is absent)
//! - User-initiated cancellation, kept distinguishable from real failures
//!
//! Use [`GenResult<T>`] as a convenient alias for `Result<T, GenError>`.

use crate::logging::{log_debug, log_error, log_warn};
use thiserror::Error;

/// Convenient result type for generation operations.
pub type GenResult<T> = std::result::Result<T, GenError>;

/// Errors that can occur while resolving configuration, talking to a
/// provider, or interpreting its response.
///
/// Constructor methods log automatically; prefer them over building
/// variants directly.
#[derive(Error, Debug)]
pub enum GenError {
    /// The configured provider discriminator is not recognized.
    #[error("Unsupported provider type: {provider}")]
    UnsupportedProvider {
        /// The provider name that was requested.
        provider: String,
    },

    /// Configuration is invalid or incomplete (missing model, missing
    /// public credential, uninitialized credential store).
    #[error("Provider configuration error: {message}")]
    ConfigurationError {
        /// Description of the configuration problem.
        message: String,
    },

    /// The HTTP request to the provider failed, or the provider returned a
    /// non-2xx status. The message carries the best-effort detail extracted
    /// from the response body (or the HTTP status text).
    #[error("Request failed: {message}")]
    RequestFailed {
        /// Description of the failure.
        message: String,
        /// The underlying error, if available.
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// The provider responded, but an expected structure was absent.
    #[error("Response parsing failed: {message}")]
    ResponseParsingError {
        /// Details about the missing or malformed structure.
        message: String,
    },

    /// A provider operation failed; the dispatcher attributes the failure to
    /// the provider by display name so callers need not know wire details.
    #[error("{provider} error: {}", .source.detail())]
    Provider {
        /// Display name of the provider that failed.
        provider: &'static str,
        /// The underlying failure.
        #[source]
        source: Box<GenError>,
    },

    /// The caller cancelled the in-flight generation. Benign; never wrapped
    /// with a provider prefix.
    #[error("Generation cancelled")]
    Cancelled,
}

impl GenError {
    /// Human-readable detail without the variant preamble, used when this
    /// error is attributed to a provider.
    pub fn detail(&self) -> String {
        match self {
            Self::UnsupportedProvider { provider } => {
                format!("unsupported provider type: {provider}")
            }
            Self::ConfigurationError { message }
            | Self::RequestFailed { message, .. }
            | Self::ResponseParsingError { message } => message.clone(),
            Self::Provider { source, .. } => source.detail(),
            Self::Cancelled => "generation cancelled".to_string(),
        }
    }

    /// Whether this error represents a user-initiated cancellation.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }

    // =========================================================================
    // Constructor methods with automatic logging
    // =========================================================================

    /// Create an unsupported provider error (logs at ERROR level).
    pub fn unsupported_provider(provider: impl Into<String>) -> Self {
        let provider = provider.into();
        log_error!(
            provider = %provider,
            error_type = "unsupported_provider",
            "Unsupported provider type requested"
        );
        Self::UnsupportedProvider { provider }
    }

    pub fn configuration_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_error!(
            error_type = "configuration_error",
            message = %message,
            "Configuration validation failed"
        );
        Self::ConfigurationError { message }
    }

    pub fn request_failed(
        message: impl Into<String>,
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    ) -> Self {
        let message = message.into();
        log_error!(
            error_type = "request_failed",
            message = %message,
            has_source = source.is_some(),
            "Provider request failed"
        );
        Self::RequestFailed { message, source }
    }

    pub fn response_parsing_error(message: impl Into<String>) -> Self {
        let message = message.into();
        log_warn!(
            error_type = "response_parsing_error",
            message = %message,
            "Provider response format invalid"
        );
        Self::ResponseParsingError { message }
    }

    /// Attribute a provider failure by display name. Cancellation is never
    /// wrapped; it passes through unchanged.
    pub fn provider_error(provider: &'static str, source: GenError) -> Self {
        if source.is_cancelled() {
            return source;
        }
        Self::Provider {
            provider,
            source: Box::new(source),
        }
    }

    pub fn cancelled() -> Self {
        log_debug!(error_type = "cancelled", "Generation cancelled by caller");
        Self::Cancelled
    }
}
