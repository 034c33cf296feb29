//! Registration of the public gateway's API key.
//!
//! The hosted variant is credential-less from the user's point of view: a
//! key is obtained once from the registration endpoint and kept in the
//! secret store under [`PUBLIC_API_KEY_SECRET`].

use crate::config::SecretStore;
use crate::error::{GenError, GenResult};
use crate::logging::log_debug;
use serde::Deserialize;

/// Secret-store key under which the public API key is kept.
pub const PUBLIC_API_KEY_SECRET: &str = "publicApiKey";

/// Registration endpoint of the hosted gateway.
pub const PUBLIC_REGISTRATION_URL: &str = "https://ws.shortn.cloud/public/register";

#[derive(Debug, Deserialize)]
struct RegisterResponse {
    #[serde(rename = "apiKey")]
    api_key: Option<String>,
}

/// Request a fresh public API key from the registration endpoint.
///
/// # Errors
///
/// Returns [`GenError::RequestFailed`] on a non-2xx response (carrying the
/// response body) and [`GenError::ResponseParsingError`] when the body has
/// no usable `apiKey` field.
pub async fn request_new_public_api_key(registration_url: &str) -> GenResult<String> {
    let response = reqwest::Client::new()
        .post(registration_url)
        .send()
        .await
        .map_err(|e| {
            GenError::request_failed(format!("key registration failed: {e}"), Some(Box::new(e)))
        })?;

    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    if !status.is_success() {
        return Err(GenError::request_failed(
            format!("key registration failed: {text}"),
            None,
        ));
    }

    let parsed: RegisterResponse = serde_json::from_str(&text).map_err(|_| {
        GenError::response_parsing_error("invalid API key response from registration endpoint")
    })?;

    match parsed.api_key {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(GenError::response_parsing_error(
            "invalid API key response from registration endpoint",
        )),
    }
}

/// Return the stored public API key, registering a new one first if the
/// store has none.
pub async fn ensure_public_api_key(
    secrets: &dyn SecretStore,
    registration_url: &str,
) -> GenResult<String> {
    if let Some(key) = secrets.get(PUBLIC_API_KEY_SECRET) {
        if !key.is_empty() {
            return Ok(key);
        }
    }

    log_debug!("No stored public API key, registering a new one");
    let key = request_new_public_api_key(registration_url).await?;
    secrets.store(PUBLIC_API_KEY_SECRET, &key);
    Ok(key)
}

/// Replace the stored public API key with a freshly registered one. The old
/// key becomes invalid on the gateway side.
pub async fn regenerate_public_api_key(
    secrets: &dyn SecretStore,
    registration_url: &str,
) -> GenResult<String> {
    let key = request_new_public_api_key(registration_url).await?;
    secrets.store(PUBLIC_API_KEY_SECRET, &key);
    Ok(key)
}
