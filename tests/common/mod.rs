//! Shared helpers for provider integration tests.

#![allow(dead_code)]

use commitgen::ProviderConfig;

pub const TEST_SYSTEM_PROMPT: &str = "You write commit messages.";

pub fn provider_config(api_url: Option<&str>) -> ProviderConfig {
    ProviderConfig {
        api_url: api_url.map(str::to_string),
        api_key: "test-key".to_string(),
        model: "test-model".to_string(),
        system_prompt: TEST_SYSTEM_PROMPT.to_string(),
    }
}

/// Chat-completion success payload (`choices[0].message.content`).
pub fn chat_success_body(content: &str) -> serde_json::Value {
    serde_json::json!({
        "choices": [{
            "message": {
                "role": "assistant",
                "content": content
            },
            "finish_reason": "stop"
        }]
    })
}

/// A port nothing listens on, for connection-failure cases.
pub const UNREACHABLE_URL: &str = "http://127.0.0.1:9";
