//! Integration tests for the OpenWebUI provider wire mapping.
//!
//! UNIT UNDER TEST: OpenWebUiProvider HTTP request handling
//!
//! BUSINESS RESPONSIBILITY:
//!   - POST chat completions to `{apiUrl}/api/chat/completions` with an
//!     optional bearer token
//!   - Extract and clean `choices[0].message.content`
//!   - Map non-2xx responses to the HTTP status text
//!   - Abort the transport on caller cancellation
//!   - Discover models via `GET /api/models`, unfiltered and unsorted

mod common;

use commitgen::providers::OpenWebUiProvider;
use commitgen::{AiProvider, CancellationToken, GenError};
use common::{chat_success_body, provider_config, TEST_SYSTEM_PROMPT, UNREACHABLE_URL};
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn generate_returns_cleaned_message() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/completions"))
        .and(header("authorization", "Bearer test-key"))
        .and(body_partial_json(serde_json::json!({
            "model": "test-model",
            "temperature": 0.2
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_success_body("```commit\nfeat: test\n```")),
        )
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    let cancel = CancellationToken::new();
    let message = provider
        .generate_commit_message("diff", &cancel)
        .await
        .unwrap();

    assert_eq!(message, "feat: test");
}

#[tokio::test]
async fn generate_sends_system_message_before_user_prompt() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(chat_success_body("fix: ordering")),
        )
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    provider
        .generate_commit_message("+added line", &CancellationToken::new())
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0]["role"], "system");
    assert_eq!(messages[0]["content"], TEST_SYSTEM_PROMPT);
    assert_eq!(messages[1]["role"], "user");
    assert_eq!(messages[1]["content"], "Git diff:\n+added line");
}

#[tokio::test]
async fn generate_maps_http_failure_to_status_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/completions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    let err = provider
        .generate_commit_message("diff", &CancellationToken::new())
        .await
        .unwrap_err();

    assert!(
        err.detail().contains("Internal Server Error"),
        "got: {err}"
    );
}

#[tokio::test]
async fn generate_observes_pre_cancelled_token() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(chat_success_body("unused")))
        .expect(0)
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    let cancel = CancellationToken::new();
    cancel.cancel();

    let err = provider
        .generate_commit_message("diff", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, GenError::Cancelled));
}

#[tokio::test]
async fn generate_aborts_in_flight_request_on_cancellation() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/chat/completions"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(chat_success_body("too late"))
                .set_delay(Duration::from_secs(30)),
        )
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        canceller.cancel();
    });

    let err = provider
        .generate_commit_message("diff", &cancel)
        .await
        .unwrap_err();
    assert!(matches!(err, GenError::Cancelled));
}

#[tokio::test]
async fn test_connection_reflects_probe_status() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .and(header("authorization", "Bearer test-key"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    assert!(provider.test_connection().await);
}

#[tokio::test]
async fn test_connection_is_false_on_error_status_and_unreachable_host() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    assert!(!provider.test_connection().await);

    let provider = OpenWebUiProvider::new(provider_config(Some(UNREACHABLE_URL))).unwrap();
    assert!(!provider.test_connection().await);
}

#[tokio::test]
async fn list_models_is_unfiltered_and_keeps_gateway_order() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/api/models"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "data": [
                { "id": "zeta" },
                { "id": "alpha" },
                { "id": "custom:latest" }
            ]
        })))
        .mount(&server)
        .await;

    let provider = OpenWebUiProvider::new(provider_config(Some(&server.uri()))).unwrap();
    let models = provider.list_models().await.unwrap();
    assert_eq!(models, vec!["zeta", "alpha", "custom:latest"]);
}

#[test]
fn constructor_requires_base_url() {
    assert!(OpenWebUiProvider::new(provider_config(None)).is_err());
}
