use std::time::Duration;

use gemmatrans_core::prompt::build_prompt;
use gemmatrans_core::types::TranslationRequest;
use gemmatrans_engine::config::SessionConfig;
use gemmatrans_engine::translate::{TranslationError, translate_once};
use tokio::net::TcpListener;
use wiremock::matchers::{body_json, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn request() -> TranslationRequest {
    TranslationRequest {
        source_language_name: "French".into(),
        source_language_code: "fr".into(),
        target_language_name: "English".into(),
        target_language_code: "en".into(),
        source_text: "Bonjour".into(),
    }
}

fn config_for(base: &str) -> SessionConfig {
    SessionConfig {
        endpoint: format!("{base}/api/generate"),
        model: "translategemma:latest".into(),
        connect_timeout: Duration::from_secs(2),
        idle_timeout: None,
        request_timeout: Duration::from_secs(5),
    }
}

#[tokio::test]
async fn returns_trimmed_response() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/api/generate"))
        .and(body_json(serde_json::json!({
            "model": "translategemma:latest",
            "prompt": build_prompt(&request()),
            "stream": false,
        })))
        .respond_with(ResponseTemplate::new(200).set_body_raw(
            r#"{"model":"translategemma:latest","response":"\n  Hello \n","done":true}"#,
            "application/json",
        ))
        .expect(1)
        .mount(&server)
        .await;

    let out = translate_once(&config_for(&server.uri()), &request())
        .await
        .unwrap();
    assert_eq!(out, "Hello");
}

#[tokio::test]
async fn server_error_carries_status_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(404).set_body_string(r#"{"error":"model not found"}"#))
        .mount(&server)
        .await;

    let err = translate_once(&config_for(&server.uri()), &request())
        .await
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"ollama returned status: 404 Not Found, body: {"error":"model not found"}"#
    );
}

#[tokio::test]
async fn undecodable_body_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>"))
        .mount(&server)
        .await;

    let err = translate_once(&config_for(&server.uri()), &request())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Decode(_)));
    assert!(err.to_string().starts_with("failed to decode response: "));
}

#[tokio::test]
async fn unreachable_server_is_a_connection_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = translate_once(&config_for(&format!("http://{addr}")), &request())
        .await
        .unwrap_err();
    assert!(matches!(err, TranslationError::Connection(_)));
    assert!(err.to_string().starts_with("failed to connect to Ollama: "));
}
