//! Router tests: HTTP shapes of the chat, ask and health endpoints.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use common::{StubGenerator, StubOracle};
use grounded_chat::{AppState, EngineConfig, router};
use std::sync::Arc;
use tower::ServiceExt;

fn app(oracle: StubOracle, generator: StubGenerator) -> axum::Router {
    router(AppState::new(
        Arc::new(oracle),
        Arc::new(generator),
        EngineConfig::default(),
    ))
}

fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn form_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/x-www-form-urlencoded")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn send(app: axum::Router, req: Request<Body>) -> (StatusCode, serde_json::Value) {
    let resp = app.oneshot(req).await.unwrap();
    let status = resp.status();
    let body = axum::body::to_bytes(resp.into_body(), 100_000)
        .await
        .unwrap();
    let json: serde_json::Value = serde_json::from_slice(&body).unwrap();
    (status, json)
}

// --- /get_response ---

#[tokio::test]
async fn chat_returns_generated_reply() {
    let app = app(
        StubOracle::returning("Refunds within 30 days.", 0.8),
        StubGenerator::returning("You can get a refund within 30 days."),
    );
    let (status, json) = send(
        app,
        json_post("/get_response", r#"{"message":"What is the refund policy?"}"#),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json,
        serde_json::json!({ "response": "You can get a refund within 30 days." })
    );
}

#[tokio::test]
async fn chat_empty_message_is_ok_with_prompt() {
    for body in [r#"{"message":"   "}"#, r#"{}"#, r#"{"message":null}"#] {
        let app = app(
            StubOracle::returning("ctx", 0.9),
            StubGenerator::returning("unused"),
        );
        let (status, json) = send(app, json_post("/get_response", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(json["response"], "Please enter a message.");
    }
}

#[tokio::test]
async fn chat_backend_down_is_ok_with_fallback() {
    let app = app(StubOracle::failing(), StubGenerator::failing());
    let (status, json) = send(app, json_post("/chat", r#"{"message":"hi"}"#)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["response"], "Model not available in cloud deployment.");
}

#[tokio::test]
async fn chat_malformed_json_is_client_error() {
    let app = app(
        StubOracle::returning("ctx", 0.9),
        StubGenerator::returning("unused"),
    );
    let (status, json) = send(app, json_post("/get_response", "{not json")).await;

    assert!(status.is_client_error());
    assert!(json["error"].is_string());
}

// --- /ask ---

#[tokio::test]
async fn ask_returns_answer_and_score() {
    let app = app(
        StubOracle::returning("Refunds within 30 days.", 0.25),
        StubGenerator::returning("unused"),
    );
    let (status, json) = send(app, form_post("/ask", "question=refund+policy")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], "Refunds within 30 days.");
    assert!((json["score"].as_f64().unwrap() - 0.25).abs() < 1e-6);
}

#[tokio::test]
async fn ask_missing_question_is_bad_request() {
    for body in ["", "question=", "other=1"] {
        let app = app(
            StubOracle::returning("ctx", 0.9),
            StubGenerator::returning("unused"),
        );
        let (status, json) = send(app, form_post("/ask", body)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST, "body {:?}", body);
        assert_eq!(json, serde_json::json!({ "error": "No question provided" }));
    }
}

#[tokio::test]
async fn ask_non_form_body_is_bad_request() {
    let app = app(
        StubOracle::returning("ctx", 0.9),
        StubGenerator::returning("unused"),
    );
    let (status, json) = send(app, json_post("/ask", r#"{"question":"hi"}"#)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json["error"], "No question provided");
}

#[tokio::test]
async fn ask_retrieval_failure_is_degraded() {
    let app = app(StubOracle::failing(), StubGenerator::returning("unused"));
    let (status, json) = send(app, form_post("/ask", "question=hi")).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["answer"], "RAG not available in cloud deployment");
    assert_eq!(json["score"].as_f64(), Some(0.0));
}

// --- /health ---

#[tokio::test]
async fn health_reports_ok() {
    let app = app(StubOracle::failing(), StubGenerator::failing());
    let req = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, json) = send(app, req).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["status"], "ok");
    assert!(json["version"].is_string());
}
