//! Integration tests for the chat HTTP endpoints.
//!
//! These tests send real requests through the full router (CORS, trace and
//! timeout layers included) with a scripted collaborator behind it.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use cafekase::adapters::{app_router, ChatAppState, MockAIProvider, MockError};
use cafekase::application::{ChatHandler, DialogueEngine};
use cafekase::domain::catalog::{CaffeineProfile, Catalog, CatalogContext, CatalogItem, ServingForm};
use cafekase::domain::dialogue::DialoguePolicy;
use cafekase::ports::AIProvider;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app(provider: &MockAIProvider) -> Router {
    app_with_timeout(provider, Duration::from_secs(5))
}

fn app_with_timeout(provider: &MockAIProvider, request_timeout: Duration) -> Router {
    let catalog = Catalog::new(vec![
        CatalogItem::new("Latte", CaffeineProfile::Caffeinated)
            .with_tags(["creamy", "cozy"])
            .with_forms([ServingForm::Hot, ServingForm::Iced]),
        CatalogItem::new("Yuzu Tonic", CaffeineProfile::NoCaffeine)
            .with_tags(["citrus", "sparkling"])
            .with_forms([ServingForm::Iced]),
    ])
    .unwrap();
    let context = Arc::new(CatalogContext::from_catalog(catalog).unwrap());
    let provider: Arc<dyn AIProvider> = Arc::new(provider.clone());
    let engine = DialogueEngine::new(provider, context, &DialoguePolicy::default()).unwrap();
    let state = ChatAppState::new(Arc::new(ChatHandler::new(Arc::new(engine))));

    app_router(state, &[], request_timeout)
}

async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let mut request = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            request = request.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(request.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn answered(count: usize) -> Vec<Value> {
    (0..count)
        .flat_map(|i| {
            [
                json!({"role": "assistant", "content": "Question?"}),
                json!({"role": "user", "content": format!("answer {}", i)}),
            ]
        })
        .collect()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn root_describes_service() {
    let (status, body) = send(app(&MockAIProvider::new()), Method::GET, "/", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "\u{2615} Cafekase API");
    assert!(body["endpoints"].as_array().unwrap().len() >= 3);
}

#[tokio::test]
async fn health_reports_ok_with_timestamp() {
    let (status, body) = send(app(&MockAIProvider::new()), Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["timestamp"].is_string());
}

#[tokio::test]
async fn reset_acknowledges() {
    let (status, body) = send(app(&MockAIProvider::new()), Method::POST, "/api/reset", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"status": "conversation reset"}));
}

#[tokio::test]
async fn empty_chat_returns_first_question() {
    let provider = MockAIProvider::new().with_response("Tell me about your best cafe memory.");
    let (status, body) = send(app(&provider), Method::POST, "/api/chat", Some(json!({}))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({"response": "Tell me about your best cafe memory.", "isDrinkRecommendation": false})
    );
}

#[tokio::test]
async fn chat_returns_validated_recommendation() {
    let provider = MockAIProvider::new().with_response("DRINK: Yuzu Tonik\nWHY: bright and fizzy\nCONFIDENCE: 8");
    let request = json!({
        "messages": answered(4),
        "uiFlags": {"temp": "iced", "caffeine": "any"}
    });

    let (status, body) = send(app(&provider), Method::POST, "/api/chat", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDrinkRecommendation"], true);
    assert_eq!(body["response"], "DRINK: Yuzu Tonic\nWHY: bright and fizzy\nCONFIDENCE: 8");

    let prompt = provider.last_call().unwrap().system_prompt.unwrap();
    assert!(prompt.contains("Yuzu Tonic: citrus, sparkling"));
}

#[tokio::test]
async fn null_fields_are_treated_as_absent() {
    let provider = MockAIProvider::new().with_response("What did you drink this morning?");
    let request = json!({"messages": null, "uiFlags": null});

    let (status, body) = send(app(&provider), Method::POST, "/api/chat", Some(request)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["response"], "What did you drink this morning?");
    assert_eq!(body["isDrinkRecommendation"], false);
    assert_eq!(provider.call_count(), 1);
}

fn slow_three_call_cycle() -> (MockAIProvider, Value) {
    let provider = MockAIProvider::new()
        .with_responses(["One more question?", "Honestly, anything works.", "DRINK: Latte"])
        .with_delay(Duration::from_millis(80));
    (provider, json!({"messages": answered(5)}))
}

#[tokio::test]
async fn slow_forced_and_repaired_cycle_completes_within_request_timeout() {
    let (provider, request) = slow_three_call_cycle();

    let (status, body) = send(
        app_with_timeout(&provider, Duration::from_secs(2)),
        Method::POST,
        "/api/chat",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["isDrinkRecommendation"], true);
    assert!(body["response"].as_str().unwrap().starts_with("DRINK: Latte"));
    assert_eq!(provider.call_count(), 3);
}

#[tokio::test]
async fn request_timeout_shorter_than_cycle_cuts_it_off() {
    let (provider, request) = slow_three_call_cycle();

    let (status, _) = send(
        app_with_timeout(&provider, Duration::from_millis(100)),
        Method::POST,
        "/api/chat",
        Some(request),
    )
    .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert!(provider.call_count() < 3);
}

#[tokio::test]
async fn collaborator_failure_is_bad_gateway() {
    let provider = MockAIProvider::new().with_error(MockError::RateLimited { retry_after_secs: 10 });
    let (status, body) = send(app(&provider), Method::POST, "/api/chat", Some(json!({"messages": []}))).await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["code"], "BAD_GATEWAY");
    assert_eq!(body["details"]["retryable"], true);
}

#[tokio::test]
async fn malformed_turn_is_rejected_before_any_call() {
    let provider = MockAIProvider::new();
    let request = json!({"messages": [{"role": "narrator", "content": "hi"}]});

    let (status, _) = send(app(&provider), Method::POST, "/api/chat", Some(request)).await;

    assert!(status.is_client_error());
    assert_eq!(provider.call_count(), 0);
}

#[tokio::test]
async fn permissive_cors_answers_preflight() {
    let request = Request::builder()
        .method(Method::OPTIONS)
        .uri("/api/chat")
        .header(header::ORIGIN, "http://localhost:5173")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app(&MockAIProvider::new()).oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(response
        .headers()
        .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN));
}
