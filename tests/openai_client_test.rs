use std::time::Duration;

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use carecompanion::application::ports::{LlmClient, LlmClientError};
use carecompanion::infrastructure::llm::{OpenAiClient, OpenAiClientConfig};

fn client_for(base_url: &str) -> OpenAiClient {
    let mut config = OpenAiClientConfig::new("sk-test-key");
    config.base_url = base_url.to_string();
    config.timeout = Duration::from_secs(2);
    OpenAiClient::new(config).unwrap()
}

fn completion(content: &str) -> serde_json::Value {
    json!({
        "id": "chatcmpl-123",
        "choices": [{"index": 0, "message": {"role": "assistant", "content": content}}]
    })
}

#[tokio::test]
async fn given_successful_completion_when_completing_then_returns_message_content() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test-key"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 800,
            "messages": [
                {"role": "system", "content": "system text"},
                {"role": "user", "content": "user text"}
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("  {\"dates\": []}  ")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server.uri());

    let content = client.complete("system text", "user text").await.unwrap();

    assert_eq!(content, "{\"dates\": []}");
}

#[tokio::test]
async fn given_base_url_with_trailing_slash_when_completing_then_builds_single_slash_path() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("{}")))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&format!("{}/v1/", server.uri()));

    let content = client.complete("s", "u").await.unwrap();

    assert_eq!(content, "{}");
}

#[tokio::test]
async fn given_server_error_when_completing_then_returns_api_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());

    let result = client.complete("s", "u").await;

    match result {
        Err(LlmClientError::ApiRequestFailed(msg)) => {
            assert!(msg.contains("500"));
            assert!(msg.contains("upstream exploded"));
        }
        other => panic!("expected ApiRequestFailed, got {other:?}"),
    }
}

#[tokio::test]
async fn given_too_many_requests_when_completing_then_returns_rate_limited() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());

    let result = client.complete("s", "u").await;

    assert!(matches!(result, Err(LlmClientError::RateLimited)));
}

#[tokio::test]
async fn given_empty_choices_when_completing_then_returns_invalid_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"choices": []})))
        .mount(&server)
        .await;

    let client = client_for(&server.uri());

    let result = client.complete("s", "u").await;

    assert!(matches!(result, Err(LlmClientError::InvalidResponse(_))));
}

#[tokio::test]
async fn given_slow_endpoint_when_completing_then_times_out_with_api_request_failed() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion("{}"))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let client = client_for(&server.uri());

    let result = client.complete("s", "u").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}

#[tokio::test]
async fn given_unreachable_endpoint_when_completing_then_returns_api_request_failed() {
    let client = client_for("http://127.0.0.1:9");

    let result = client.complete("s", "u").await;

    assert!(matches!(result, Err(LlmClientError::ApiRequestFailed(_))));
}
