#![allow(clippy::unwrap_used)]
//! OpenAI-compatible host tests against a mock chat completions server.

use std::sync::Arc;

use babel_chat::capability::{
    CapabilityHost, CapabilityKind, OpenAiHost, SummarizerOptions, TranslatorOptions,
};
use babel_chat::chat::MessageStore;
use babel_chat::config::{CapabilityBinding, CapabilityBindings};
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn sse_body(fragments: &[&str]) -> String {
    let mut body = String::new();
    for fragment in fragments {
        let chunk = serde_json::json!({ "choices": [{ "delta": { "content": fragment } }] });
        body.push_str(&format!("data: {chunk}\n\n"));
    }
    body.push_str("data: [DONE]\n\n");
    body
}

fn sse_response(fragments: &[&str]) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_raw(sse_body(fragments), "text/event-stream")
}

fn binding(server: &MockServer, api_key: Option<&str>) -> CapabilityBinding {
    CapabilityBinding {
        provider_name: "mock".to_string(),
        endpoint: format!("{}/", server.uri()),
        model: "test-model".to_string(),
        api_key: api_key.map(str::to_string),
    }
}

#[tokio::test]
async fn test_translator_streams_and_collects_reply() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(body_string_contains("from English to Portuguese"))
        .and(body_string_contains("\"model\":\"test-model\""))
        .respond_with(sse_response(&["Bom ", "dia"]))
        .expect(1)
        .mount(&server)
        .await;

    let host = OpenAiHost::new(CapabilityBindings {
        translator: Some(binding(&server, None)),
        ..CapabilityBindings::default()
    });

    let translator = host
        .create_translator(&TranslatorOptions {
            source_language: "en".to_string(),
            target_language: "pt".to_string(),
        })
        .await
        .unwrap();

    assert_eq!(translator.translate("Good morning").await.unwrap(), "Bom dia");
}

#[tokio::test]
async fn test_summarizer_sends_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer secret"))
        .respond_with(sse_response(&["A fox jumps."]))
        .expect(1)
        .mount(&server)
        .await;

    let host = OpenAiHost::new(CapabilityBindings {
        summarizer: Some(binding(&server, Some("secret"))),
        ..CapabilityBindings::default()
    });

    let summarizer = host
        .create_summarizer(&SummarizerOptions::default())
        .await
        .unwrap();

    assert_eq!(
        summarizer.summarize("The quick brown fox").await.unwrap(),
        "A fox jumps."
    );
}

#[tokio::test]
async fn test_detector_parses_ranked_candidates() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(sse_response(&[
            "[{\"detectedLanguage\":\"es\",\"confidence\":0.3},",
            "{\"detectedLanguage\":\"pt\",\"confidence\":0.6}]",
        ]))
        .mount(&server)
        .await;

    let host = OpenAiHost::new(CapabilityBindings {
        detector: Some(binding(&server, None)),
        ..CapabilityBindings::default()
    });

    let candidates = host
        .create_detector()
        .await
        .unwrap()
        .detect("Olá")
        .await
        .unwrap();

    assert_eq!(candidates[0].detected_language, "pt");
    assert_eq!(candidates[1].detected_language, "es");
}

#[tokio::test]
async fn test_regional_detection_still_offers_summary() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("You are a language identifier"))
        .respond_with(sse_response(&["[{\"detectedLanguage\":\"en-US\",\"confidence\":0.95}]"]))
        .mount(&server)
        .await;

    let host = OpenAiHost::new(CapabilityBindings {
        detector: Some(binding(&server, None)),
        ..CapabilityBindings::default()
    });
    let store = MessageStore::new(Arc::new(host), "pt");
    store.set_draft("The quick brown fox jumps over the lazy dog. ".repeat(5));
    let index = store.submit().await.unwrap();

    let message = store.message(index).unwrap();
    assert_eq!(message.detected_language(), "en");
    assert!(message.offers_summary());
}

#[tokio::test]
async fn test_error_status_is_a_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("model overloaded"))
        .mount(&server)
        .await;

    let host = OpenAiHost::new(CapabilityBindings {
        translator: Some(binding(&server, None)),
        ..CapabilityBindings::default()
    });
    let translator = host
        .create_translator(&TranslatorOptions {
            source_language: "en".to_string(),
            target_language: "fr".to_string(),
        })
        .await
        .unwrap();

    let err = translator.translate("Hello").await.unwrap_err();

    let message = err.to_string();
    assert!(message.contains("500"));
    assert!(message.contains("model overloaded"));
}

#[tokio::test]
async fn test_store_end_to_end_with_partial_host() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(body_string_contains("You are a translator"))
        .respond_with(sse_response(&["Merhaba"]))
        .mount(&server)
        .await;

    // Detector and summarizer are unbound, translator is served by the mock.
    let host = OpenAiHost::new(CapabilityBindings {
        translator: Some(binding(&server, None)),
        ..CapabilityBindings::default()
    });
    assert!(!host.is_available(CapabilityKind::Detector));

    let store = MessageStore::new(Arc::new(host), "tr");
    store.set_draft("Hello");
    let index = store.submit().await.unwrap();

    let message = store.message(index).unwrap();
    assert_eq!(message.detected_language(), "unknown");

    store.translate(index).await.unwrap();
    let translation = store.message(index).unwrap().translation().cloned().unwrap();
    assert_eq!(translation.text, "Merhaba");

    assert!(store.summarize(index).await.is_err());
    assert!(store.error().unwrap().contains("Summarization is not available"));
}
