//! HTTP mock tests for the LLM providers.
//!
//! Uses wiremock to simulate OpenAI-compatible and Anthropic responses.

use serde_json::json;
use termagent_core::{
    AnthropicProvider, ChatMessage, CompletionRequest, FinishReason, LlmProvider,
    OpenAIProvider, ProviderConfig, ProviderError, ResponseFormat,
};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai_provider(server: &MockServer) -> OpenAIProvider {
    let config = ProviderConfig::gemini("test-api-key").with_base_url(server.uri());
    OpenAIProvider::new(config).unwrap()
}

fn anthropic_provider(server: &MockServer) -> AnthropicProvider {
    let config = ProviderConfig::anthropic("test-api-key").with_base_url(server.uri());
    AnthropicProvider::new(config).unwrap()
}

fn selection_request() -> CompletionRequest {
    CompletionRequest::new(vec![
        ChatMessage::system("parse"),
        ChatMessage::user("list files in /tmp"),
    ])
    .with_temperature(0.1)
    .with_response_format(ResponseFormat::JsonSchema {
        name: "tool_selection".into(),
        schema: json!({ "type": "object" }),
    })
}

// =============================================================================
// OpenAI-compatible
// =============================================================================

#[tokio::test]
async fn test_openai_success_returns_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer test-api-key"))
        .and(body_partial_json(json!({
            "model": "gemini-2.0-flash",
            "response_format": { "type": "json_schema", "json_schema": { "name": "tool_selection" } }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "chatcmpl-1",
            "model": "gemini-2.0-flash",
            "choices": [{
                "message": {
                    "role": "assistant",
                    "content": "{\"toolName\":\"ListFilesTool\",\"arguments\":{\"path\":\"/tmp\"}}"
                },
                "finish_reason": "stop"
            }],
            "usage": { "prompt_tokens": 120, "completion_tokens": 20, "total_tokens": 140 }
        })))
        .mount(&server)
        .await;

    let response = openai_provider(&server).complete(selection_request()).await.unwrap();

    assert_eq!(response.finish_reason, FinishReason::Stop);
    assert_eq!(response.usage.total_tokens, 140);
    assert!(response.content.unwrap().contains("ListFilesTool"));
}

#[tokio::test]
async fn test_openai_missing_id_tolerated() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "hello" } }]
        })))
        .mount(&server)
        .await;

    let reply = openai_provider(&server).prompt("hi").await.unwrap();
    assert_eq!(reply, "hello");
}

#[tokio::test]
async fn test_openai_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(429).set_body_string("Rate limit exceeded"))
        .mount(&server)
        .await;

    let result = openai_provider(&server).complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::RateLimited { .. })));
}

#[tokio::test]
async fn test_openai_unauthorized() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad key"))
        .mount(&server)
        .await;

    let result = openai_provider(&server).complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::AuthenticationFailed)));
}

#[tokio::test]
async fn test_openai_server_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
        .mount(&server)
        .await;

    match openai_provider(&server).complete(selection_request()).await {
        Err(ProviderError::Api { status, message }) => {
            assert_eq!(status, 503);
            assert_eq!(message, "Service Unavailable");
        }
        other => panic!("expected Api error, got {:?}", other.map(|r| r.content)),
    }
}

#[tokio::test]
async fn test_openai_malformed_json() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_string("this is not json"))
        .mount(&server)
        .await;

    let result = openai_provider(&server).complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::Parse(_))));
}

#[tokio::test]
async fn test_openai_empty_choices() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "choices": [] })))
        .mount(&server)
        .await;

    let result = openai_provider(&server).complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::Other(_))));
}

#[tokio::test]
async fn test_openai_connection_refused() {
    let server = MockServer::start().await;
    let provider = openai_provider(&server);
    drop(server);

    let result = provider.complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::Network(_))));
}

// =============================================================================
// Anthropic
// =============================================================================

#[tokio::test]
async fn test_anthropic_forced_tool_input_becomes_content() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .and(header("x-api-key", "test-api-key"))
        .and(body_partial_json(json!({
            "system": "parse",
            "tool_choice": { "type": "tool", "name": "tool_selection" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_1",
            "model": "claude-sonnet-4-20250514",
            "content": [{
                "type": "tool_use",
                "id": "toolu_1",
                "name": "tool_selection",
                "input": { "toolName": "ReadFileTool", "arguments": { "path": "/etc/hosts" } }
            }],
            "stop_reason": "tool_use",
            "usage": { "input_tokens": 300, "output_tokens": 25 }
        })))
        .mount(&server)
        .await;

    let response = anthropic_provider(&server).complete(selection_request()).await.unwrap();

    assert_eq!(response.finish_reason, FinishReason::ToolCalls);
    assert_eq!(response.usage.total_tokens, 325);
    let content: serde_json::Value = serde_json::from_str(&response.content.unwrap()).unwrap();
    assert_eq!(content["arguments"]["path"], "/etc/hosts");
}

#[tokio::test]
async fn test_anthropic_text_reply() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": "msg_2",
            "model": "claude-sonnet-4-20250514",
            "content": [{ "type": "text", "text": "hello there" }],
            "stop_reason": "end_turn",
            "usage": { "input_tokens": 3, "output_tokens": 2 }
        })))
        .mount(&server)
        .await;

    let reply = anthropic_provider(&server)
        .chat(vec![ChatMessage::user("hi")])
        .await
        .unwrap();
    assert_eq!(reply, "hello there");
}

#[tokio::test]
async fn test_anthropic_rate_limit() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/messages"))
        .respond_with(ResponseTemplate::new(429))
        .mount(&server)
        .await;

    let result = anthropic_provider(&server).complete(selection_request()).await;
    assert!(matches!(result, Err(ProviderError::RateLimited { .. })));
}
