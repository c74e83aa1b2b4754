use std::sync::Arc;

use serde_json::json;
use tabib::Locale;
use tabib::core::conversation::{Message, Sender};
use tabib::core::session::{self, SessionContext};
use tabib::core::storage::{FileStore, KeyValueStore};
use tabib::inference::{
    FetchError, GeminiProvider, GeminiSettings, ReplyFetcher, fetch_reply_or_fallback,
};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, header, method, path, query_param},
};

// ============================================================================
// Helper Functions
// ============================================================================

const PERSONA: &str = "You are a careful virtual doctor.";

fn provider(server: &MockServer, api_key: Option<&str>) -> GeminiProvider {
    GeminiProvider::new(GeminiSettings {
        api_key: api_key.map(str::to_string),
        base_url: server.uri(),
        model: "test-model".to_string(),
        persona: PERSONA.to_string(),
    })
}

fn reply_body(text: &str) -> serde_json::Value {
    json!({
        "candidates": [
            { "content": { "parts": [ { "text": text } ], "role": "model" } }
        ]
    })
}

// ============================================================================
// Request Shape
// ============================================================================

#[tokio::test]
async fn test_gemini_request_shape_and_reply_extraction() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/models/test-model:generateContent"))
        .and(query_param("key", "test-key"))
        .and(header("content-type", "application/json"))
        .and(body_json(json!({
            "contents": [
                { "parts": [ { "text": PERSONA }, { "text": "I have a fever" } ] }
            ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body(
            "**Diagnosis:** Seasonal flu\nDrink fluids",
        )))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = provider(&mock_server, Some("test-key"))
        .fetch_reply("I have a fever")
        .await
        .unwrap();

    assert_eq!(reply, "**Diagnosis:** Seasonal flu\nDrink fluids");
}

#[tokio::test]
async fn test_gemini_sends_user_text_literally() {
    let mock_server = MockServer::start().await;
    let hostile = "<b>\"quoted\"</b> {json} & emoji 🤒";

    Mock::given(method("POST"))
        .and(body_json(json!({
            "contents": [ { "parts": [ { "text": PERSONA }, { "text": hostile } ] } ]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
        .expect(1)
        .mount(&mock_server)
        .await;

    let reply = provider(&mock_server, Some("k")).fetch_reply(hostile).await;
    assert_eq!(reply.unwrap(), "ok");
}

// ============================================================================
// Error Kinds
// ============================================================================

#[tokio::test]
async fn test_gemini_server_error() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("backend exploded"))
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server, Some("k")).fetch_reply("hello").await;

    match result {
        Err(FetchError::Api { status, message }) => {
            assert_eq!(status, 500);
            assert!(message.contains("backend exploded"));
        }
        other => panic!("Expected Api error, got {:?}", other),
    }
}

#[tokio::test]
async fn test_gemini_malformed_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server, Some("k")).fetch_reply("hello").await;
    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_gemini_missing_candidates() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server, Some("k")).fetch_reply("hello").await;
    assert!(matches!(result, Err(FetchError::MalformedResponse(_))));
}

#[tokio::test]
async fn test_gemini_without_api_key_never_calls_out() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("ok")))
        .expect(0)
        .mount(&mock_server)
        .await;

    let result = provider(&mock_server, None).fetch_reply("hello").await;
    assert!(matches!(result, Err(FetchError::Config(_))));
}

#[tokio::test]
async fn test_gemini_unreachable_host_is_network_error() {
    // Port 1 on localhost refuses connections
    let fetcher = GeminiProvider::new(GeminiSettings {
        api_key: Some("k".to_string()),
        base_url: "http://127.0.0.1:1".to_string(),
        model: "test-model".to_string(),
        persona: PERSONA.to_string(),
    });

    let result = fetcher.fetch_reply("hello").await;
    assert!(matches!(result, Err(FetchError::Network(_))));
}

// ============================================================================
// Fallback
// ============================================================================

#[tokio::test]
async fn test_fallback_replaces_any_failure() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&mock_server)
        .await;

    let fetcher = provider(&mock_server, Some("k"));

    let arabic = fetch_reply_or_fallback(&fetcher, "صداع", Locale::Arabic).await;
    assert_eq!(arabic, Locale::Arabic.fallback_message());

    let english = fetch_reply_or_fallback(&fetcher, "headache", Locale::English).await;
    assert_eq!(english, Locale::English.fallback_message());
}

#[tokio::test]
async fn test_fallback_passes_success_through() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Rest well")))
        .mount(&mock_server)
        .await;

    let fetcher = provider(&mock_server, Some("k"));
    let reply = fetch_reply_or_fallback(&fetcher, "tired", Locale::English).await;
    assert_eq!(reply, "Rest well");
}

// ============================================================================
// End to end: fetched replies persisted to disk
// ============================================================================

#[tokio::test]
async fn test_conversation_survives_restart() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(reply_body("Migraine\nDim the lights")))
        .mount(&mock_server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let today = chrono::NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
    let fetcher = provider(&mock_server, Some("k"));

    {
        let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
        let mut ctx = SessionContext::open(store, "chatSession", today);
        ctx.append(Sender::User, "my head hurts").unwrap();
        let reply = fetch_reply_or_fallback(&fetcher, "my head hurts", Locale::English).await;
        ctx.append(Sender::Bot, reply).unwrap();
    }

    // A fresh store over the same directory sees the same conversation
    let store: Arc<dyn KeyValueStore> = Arc::new(FileStore::open(dir.path()).unwrap());
    let ctx = SessionContext::open(store.clone(), "chatSession", today);
    assert_eq!(
        ctx.messages(),
        &[
            Message::user("my head hurts"),
            Message::bot("Migraine\nDim the lights")
        ]
    );
    assert!(dir.path().join("chatSession_2024-03-05.json").exists());

    session::delete(store.as_ref(), "chatSession_2024-03-05").unwrap();
    assert!(session::load(store.as_ref(), "chatSession_2024-03-05").is_empty());
}
