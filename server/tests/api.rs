//! HTTP 層のテスト。ネットワークは使わず、ルーターを直接呼ぶ。

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use toneshift::api::router;
use toneshift::config::{AppConfig, GeneratorChoice};
use ts_core::domain::settings::RewriteSettings;
use ts_core::infra::generator::{GenerateError, TextGenerator};
use ts_core::usecase::rewrite_service::RewriteService;

enum Reply {
    Text(&'static str),
    Fail(&'static str),
    Hang,
}

struct StubGenerator {
    reply: Reply,
    calls: AtomicUsize,
}

impl StubGenerator {
    fn new(reply: Reply) -> Arc<Self> {
        Arc::new(Self {
            reply,
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl TextGenerator for StubGenerator {
    async fn generate(&self, _prompt: &str) -> Result<String, GenerateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match self.reply {
            Reply::Text(text) => Ok(text.to_string()),
            Reply::Fail(detail) => Err(GenerateError::Failed(detail.to_string())),
            Reply::Hang => {
                tokio::time::sleep(Duration::from_secs(3600)).await;
                Ok(String::new())
            }
        }
    }

    fn name(&self) -> &str {
        "stub"
    }
}

fn app(generator: Arc<StubGenerator>) -> Router {
    router(Arc::new(RewriteService::new(generator, RewriteSettings::default())))
}

async fn post_json(app: Router, body: String) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri("/api/rewrite")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body))
        .unwrap();
    send(app, request).await
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

#[tokio::test]
async fn rewrite_success_returns_trimmed_text() {
    let stub = StubGenerator::new(Reply::Text("  Hello there  "));
    let (status, body) = post_json(
        app(stub.clone()),
        json!({"message": "hi", "tone": "friendly"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"rewrittenText": "Hello there"}));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn missing_tone_is_bad_request() {
    let stub = StubGenerator::new(Reply::Text("unused"));
    let (status, body) =
        post_json(app(stub.clone()), json!({"message": "hi"}).to_string()).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "message and tone are required"}));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn over_limit_message_is_bad_request() {
    let stub = StubGenerator::new(Reply::Text("unused"));
    let (status, body) = post_json(
        app(stub.clone()),
        json!({"message": "a".repeat(2001), "tone": "formal"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "message exceeds 2000 characters"}));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn unreadable_json_is_generic_500() {
    let stub = StubGenerator::new(Reply::Text("unused"));

    for raw in ["{not json", "", "{\"message\": \"hi\""] {
        let (status, body) = post_json(app(stub.clone()), raw.to_string()).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body, json!({"error": "Failed to rewrite text. Please try again."}));
    }
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn wrongly_typed_fields_are_bad_request() {
    let stub = StubGenerator::new(Reply::Text("unused"));

    let (status, body) = post_json(
        app(stub.clone()),
        json!({"message": 42, "tone": "formal"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "message and tone are required"}));
    assert_eq!(stub.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn valid_body_is_accepted_regardless_of_content_type() {
    let stub = StubGenerator::new(Reply::Text("Good day."));
    let payload = json!({"message": "hi", "tone": "formal"}).to_string();

    let plain = Request::builder()
        .method("POST")
        .uri("/api/rewrite")
        .header(header::CONTENT_TYPE, "text/plain")
        .body(Body::from(payload.clone()))
        .unwrap();
    let (status, body) = send(app(stub.clone()), plain).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"rewrittenText": "Good day."}));

    let untyped = Request::builder()
        .method("POST")
        .uri("/api/rewrite")
        .body(Body::from(payload))
        .unwrap();
    let (status, _) = send(app(stub.clone()), untyped).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stub.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn provider_failure_is_generic_500() {
    let stub = StubGenerator::new(Reply::Fail("upstream exploded: key=abc"));
    let (status, body) = post_json(
        app(stub),
        json!({"message": "hi", "tone": "formal"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Failed to rewrite text. Please try again."}));
}

#[tokio::test(start_paused = true)]
async fn slow_provider_is_request_timeout() {
    let stub = StubGenerator::new(Reply::Hang);
    let (status, body) = post_json(
        app(stub),
        json!({"message": "hi", "tone": "formal"}).to_string(),
    )
    .await;

    assert_eq!(status, StatusCode::REQUEST_TIMEOUT);
    assert_eq!(body, json!({"error": "Request took too long. Please try again."}));
}

#[tokio::test]
async fn tones_are_listed() {
    let (status, body) = get(app(StubGenerator::new(Reply::Text("x"))), "/api/tones").await;

    assert_eq!(status, StatusCode::OK);
    let tones = body.as_array().unwrap();
    assert_eq!(tones.len(), 6);
    assert_eq!(tones[0], json!({"id": "professional", "label": "Professional"}));
    assert_eq!(tones[5], json!({"id": "clear", "label": "Clear & Simple"}));
}

#[tokio::test]
async fn health_reports_generator() {
    let (status, body) = get(app(StubGenerator::new(Reply::Text("x"))), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["generator"], "stub");
}

#[tokio::test]
async fn metrics_reflect_requests() {
    let service = Arc::new(RewriteService::new(
        StubGenerator::new(Reply::Text("done")),
        RewriteSettings::default(),
    ));

    post_json(
        router(service.clone()),
        json!({"message": "hi", "tone": "casual"}).to_string(),
    )
    .await;
    post_json(router(service.clone()), json!({}).to_string()).await;

    let (status, body) = get(router(service), "/api/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["requests"], 2);
    assert_eq!(body["succeeded"], 1);
    assert_eq!(body["error_counts"]["validation"], 1);
}

#[tokio::test]
async fn noop_provider_echoes_message() {
    let config = AppConfig {
        generator: toneshift::config::GeneratorConfig {
            provider: GeneratorChoice::Noop,
        },
        ..Default::default()
    };
    let service = toneshift::create_service(&config).unwrap();

    let (status, body) = post_json(
        router(service),
        json!({"message": "see you at 5", "tone": "formal"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["rewrittenText"], "see you at 5");
}

#[tokio::test]
async fn gemini_without_key_fails_at_call_time() {
    let service = toneshift::create_service(&AppConfig::default()).unwrap();

    let (status, body) = post_json(
        router(service),
        json!({"message": "hi", "tone": "formal"}).to_string(),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"], "Failed to rewrite text. Please try again.");
}
