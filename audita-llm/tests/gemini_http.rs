use audita_common::AuditaError;
use audita_llm::gemini::GeminiClient;
use audita_llm::schema::analysis_schema;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const MODEL: &str = "gemini-3-pro-preview";

fn client_for(server: &MockServer) -> GeminiClient {
    GeminiClient::with_base_url("test-key".to_string(), MODEL.to_string(), &server.uri())
        .expect("client should build")
}

fn generate_path() -> String {
    format!("/models/{MODEL}:generateContent")
}

#[tokio::test]
async fn grounded_call_extracts_text_and_web_citations() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .and(query_param("key", "test-key"))
        .and(body_partial_json(json!({
            "tools": [{ "googleSearch": {} }],
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [{ "text": "{\"ok\":true}" }] },
                "finishReason": "STOP",
                "groundingMetadata": {
                    "groundingChunks": [
                        { "web": { "uri": "https://instagram.com/acme", "title": "Acme" } },
                        { "retrievedContext": { "uri": "ignored" } }
                    ]
                }
            }],
            "usageMetadata": { "totalTokenCount": 1234 }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = client_for(&server);
    let response = client
        .generate_grounded("analyze acme", &analysis_schema())
        .await
        .expect("call should succeed");

    assert_eq!(response.text, "{\"ok\":true}");
    assert_eq!(response.citations.len(), 1);
    assert_eq!(response.citations[0].uri, "https://instagram.com/acme");
    assert_eq!(response.citations[0].title.as_deref(), Some("Acme"));
    assert_eq!(response.tokens_used, Some(1234));
}

#[tokio::test]
async fn unauthorized_maps_to_invalid_api_key() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": { "code": 401, "message": "API key not valid", "status": "UNAUTHENTICATED" }
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("analyze acme", &analysis_schema())
        .await
        .expect_err("401 must fail");

    match err {
        AuditaError::Provider(message) => assert!(message.contains("invalid API key")),
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn server_errors_are_not_retried() {
    let server = MockServer::start().await;

    // expect(1) verifies the single-attempt contract: one analysis, one call.
    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(500).set_body_json(json!({
            "error": { "message": "internal", "status": "INTERNAL" }
        })))
        .expect(1)
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("analyze acme", &analysis_schema())
        .await
        .expect_err("500 must fail");
    assert!(matches!(err, AuditaError::Provider(_)));
}

#[tokio::test]
async fn safety_block_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "candidates": [{
                "content": { "parts": [] },
                "finishReason": "SAFETY"
            }]
        })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("analyze acme", &analysis_schema())
        .await
        .expect_err("safety block must fail");

    match err {
        AuditaError::Provider(message) => assert!(message.contains("safety")),
        other => panic!("expected Provider error, got {other:?}"),
    }
}

#[tokio::test]
async fn empty_candidate_list_is_a_provider_error() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(generate_path()))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "candidates": [] })))
        .mount(&server)
        .await;

    let err = client_for(&server)
        .generate_grounded("analyze acme", &analysis_schema())
        .await
        .expect_err("empty candidates must fail");
    assert!(matches!(err, AuditaError::Provider(_)));
}

#[test]
fn empty_api_key_fails_fast() {
    let err = GeminiClient::new("   ".to_string(), MODEL.to_string())
        .err()
        .expect("blank key must be rejected");
    assert!(matches!(err, AuditaError::Config(_)));
}
