//! HTTP API tests driven through the router without a socket

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use terrenos_agent::ChatAssistant;
use terrenos_config::Settings;
use terrenos_core::{ConversationTurn, KnowledgeBase, Lead, NewLead, NewTurn};
use terrenos_persistence::{ConversationStore, PersistenceError};
use terrenos_server::{create_router, AppState};

struct OfflineStore;

#[async_trait]
impl ConversationStore for OfflineStore {
    async fn append_turn(&self, _turn: NewTurn) -> Result<ConversationTurn, PersistenceError> {
        Err(PersistenceError::Connection("no hosts available".to_string()))
    }

    async fn append_lead(&self, _lead: NewLead) -> Result<Lead, PersistenceError> {
        Err(PersistenceError::Connection("no hosts available".to_string()))
    }

    async fn history(&self, _session_id: &str) -> Result<Vec<ConversationTurn>, PersistenceError> {
        Err(PersistenceError::Connection("no hosts available".to_string()))
    }

    fn backend_name(&self) -> &'static str {
        "offline"
    }
}

fn app() -> Router {
    create_router(AppState::new(Settings::default(), ChatAssistant::in_memory()))
}

fn offline_app() -> Router {
    let assistant =
        ChatAssistant::with_store(Arc::new(KnowledgeBase::builtin()), Arc::new(OfflineStore));
    create_router(AppState::new(Settings::default(), assistant))
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

#[tokio::test]
async fn test_chat_assigns_session() {
    let app = app();
    let (status, body) = send(&app, post_json("/api/chat", json!({ "message": "Hola" }))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "greeting");
    assert!(!body["response"].as_str().unwrap().is_empty());
    assert!(!body["session_id"].as_str().unwrap().is_empty());
}

#[tokio::test]
async fn test_chat_blank_message_gets_fallback_reply() {
    let app = app();
    for body in [json!({ "message": "   " }), json!({})] {
        let (status, body) = send(&app, post_json("/api/chat", body)).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["intent"], "general");
        assert!(!body["response"].as_str().unwrap().trim().is_empty());
        assert!(body.get("error").is_none());
    }
}

#[tokio::test]
async fn test_chat_rejects_malformed_body() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/chat")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_chat_history_roundtrip() {
    let app = app();
    for message in ["Hola", "¿Tienen financiamiento?"] {
        let (status, _) = send(
            &app,
            post_json(
                "/api/chat",
                json!({
                    "message": message,
                    "session_id": "web-42",
                    "page_url": "https://terrenospremium.com/"
                }),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    let (status, body) = send(&app, get("/api/chat/web-42/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["session_id"], "web-42");
    assert_eq!(body["count"], 2);
    assert_eq!(body["turns"][0]["user_message"], "Hola");
    assert_eq!(body["turns"][1]["user_message"], "¿Tienen financiamiento?");
    assert_eq!(body["turns"][1]["origin_page"], "https://terrenospremium.com/");
}

#[tokio::test]
async fn test_chat_survives_store_outage() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        post_json("/api/chat", json!({ "message": "gracias", "session_id": "s1" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["intent"], "thanks");

    let (status, body) = send(&app, get("/api/chat/s1/history")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_welcome() {
    let app = app();
    let (status, body) = send(&app, get("/api/chat/welcome")).await;

    assert_eq!(status, StatusCode::OK);
    assert!(!body["message"].as_str().unwrap().is_empty());
    assert_eq!(body["quick_replies"].as_array().unwrap().len(), 4);
}

#[tokio::test]
async fn test_lead_created() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json(
            "/api/leads",
            json!({
                "name": "Luis",
                "email": "luis@example.com",
                "phone": "555-0100",
                "terrainInterest": "terreno3",
                "message": "Quiero visitar el terreno campestre"
            }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["lead_id"].as_i64().unwrap() > 0);
    assert_eq!(body["reference"].as_str().unwrap().len(), 36);
}

#[tokio::test]
async fn test_lead_rejected() {
    let app = app();
    let (status, body) = send(
        &app,
        post_json("/api/leads", json!({ "name": "", "email": "luis@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert!(body["message"].as_str().unwrap().starts_with("Datos inválidos"));
}

#[tokio::test]
async fn test_lead_store_failure() {
    let app = offline_app();
    let (status, body) = send(
        &app,
        post_json("/api/leads", json!({ "name": "Luis", "email": "luis@example.com" })),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["success"], false);
}

#[tokio::test]
async fn test_health_and_ready() {
    let app = app();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");

    let (status, body) = send(&app, get("/ready")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ready");
    assert_eq!(body["store"], "memory");
    assert_eq!(body["properties"], 4);
}

#[tokio::test]
async fn test_metrics_disabled() {
    let app = app();
    let response = app.clone().oneshot(get("/metrics")).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}
