//! Integration tests for the Ollama provider wire mapping.
//!
//! UNIT UNDER TEST: OllamaProvider HTTP request handling
//!
//! BUSINESS RESPONSIBILITY:
//!   - POST `/api/chat` unauthenticated with streaming disabled
//!   - Carry the temperature inside the `options` object
//!   - Discover models via `GET /api/tags`, sorted

mod common;

use commitgen::providers::OllamaProvider;
use commitgen::{AiProvider, CancellationToken};
use common::provider_config;
use wiremock::matchers::{body_partial_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn ollama_at(server: &MockServer) -> OllamaProvider {
    OllamaProvider::new(provider_config(Some(&server.uri()))).unwrap()
}

#[tokio::test]
async fn generate_disables_streaming_and_nests_temperature() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "stream": false,
            "options": { "temperature": 0.2 }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": { "role": "assistant", "content": "```\nfeat: ollama\n```" },
            "done": true
        })))
        .mount(&server)
        .await;

    let message = ollama_at(&server)
        .generate_commit_message("diff", &CancellationToken::new())
        .await
        .unwrap();

    assert_eq!(message, "feat: ollama");
}

#[tokio::test]
async fn generate_maps_http_failure_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let err = ollama_at(&server)
        .generate_commit_message("diff", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(err.detail().contains("Not Found"), "got: {err}");
}

#[tokio::test]
async fn list_models_returns_local_tags() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                { "name": "llama3", "size": 4661224676u64 },
                { "name": "mistral", "size": 4109865159u64 }
            ]
        })))
        .mount(&server)
        .await;

    let models = ollama_at(&server).list_models().await.unwrap();
    assert_eq!(models, vec!["llama3", "mistral"]);
}

#[tokio::test]
async fn list_models_sorts_tag_names() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "models": [
                { "name": "qwen2:7b" },
                { "name": "codellama:13b" },
                { "name": "llama3:latest" }
            ]
        })))
        .mount(&server)
        .await;

    let models = ollama_at(&server).list_models().await.unwrap();
    assert_eq!(models, vec!["codellama:13b", "llama3:latest", "qwen2:7b"]);
}

#[tokio::test]
async fn test_connection_probes_tags_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/tags"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({ "models": [] })))
        .mount(&server)
        .await;

    assert!(ollama_at(&server).test_connection().await);
}

#[tokio::test]
async fn no_authorization_header_is_sent() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "message": { "content": "ok" }
        })))
        .mount(&server)
        .await;

    ollama_at(&server)
        .generate_commit_message("diff", &CancellationToken::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert!(!requests[0].headers.contains_key("authorization"));
}

#[test]
fn constructor_requires_base_url() {
    assert!(OllamaProvider::new(provider_config(None)).is_err());
}
