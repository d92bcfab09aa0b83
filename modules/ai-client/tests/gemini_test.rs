//! Gemini client against a local mock of the generateContent endpoint.

use ai_client::{Agent, Gemini, PromptBuilder};
use serde_json::json;
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn complete_sends_single_user_turn_and_returns_text() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-1.5-flash-latest:generateContent"))
        .and(header("x-goog-api-key", "test-key"))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "Say hi"}]}]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": {"role": "model", "parts": [{"text": "Hi there!"}]},
                "finishReason": "STOP"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gemini = Gemini::new("test-key", "gemini-1.5-flash-latest").with_base_url(server.uri());
    let text = gemini.complete("Say hi").await.unwrap();

    assert_eq!(text, "Hi there!");
    server.verify().await;
}

#[tokio::test]
async fn models_prefix_is_not_doubled() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/gemini-pro:generateContent"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "ok"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gemini = Gemini::new("k", "models/gemini-pro").with_base_url(server.uri());
    assert_eq!(gemini.complete("x").await.unwrap(), "ok");
}

#[tokio::test]
async fn prompt_builder_sends_generation_config() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/m:generateContent"))
        .and(body_json(json!({
            "contents": [{"role": "user", "parts": [{"text": "topic"}]}],
            "systemInstruction": {"parts": [{"text": "You write posts."}]},
            "generationConfig": {"temperature": 0.5, "maxOutputTokens": 300}
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{"content": {"parts": [{"text": "post"}]}}]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let gemini = Gemini::new("k", "m").with_base_url(server.uri());
    let text = gemini
        .prompt("topic")
        .preamble("You write posts.")
        .temperature(0.5)
        .max_output_tokens(300)
        .send()
        .await
        .unwrap();

    assert_eq!(text, "post");
}

#[tokio::test]
async fn api_error_carries_status_and_body() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(429).set_body_string(r#"{"error":{"message":"Quota exceeded"}}"#),
        )
        .mount(&server)
        .await;

    let gemini = Gemini::new("k", "m").with_base_url(server.uri());
    let err = gemini.complete("x").await.unwrap_err().to_string();

    assert!(err.contains("429"), "unexpected error: {err}");
    assert!(err.contains("Quota exceeded"), "unexpected error: {err}");
}

#[tokio::test]
async fn empty_candidates_is_an_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"candidates": []})))
        .mount(&server)
        .await;

    let gemini = Gemini::new("k", "m").with_base_url(server.uri());
    let err = gemini.complete("x").await.unwrap_err().to_string();

    assert!(err.contains("No response from Gemini"), "unexpected error: {err}");
}

#[tokio::test]
async fn malformed_body_is_a_parse_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;

    let gemini = Gemini::new("k", "m").with_base_url(server.uri());
    let err = gemini.complete("x").await.unwrap_err().to_string();

    assert!(err.starts_with("Parse error"), "unexpected error: {err}");
}
