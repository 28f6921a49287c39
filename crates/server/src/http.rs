//! HTTP Endpoints
//!
//! REST API for the chat widget and the contact form.

use std::net::SocketAddr;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Json, Path, State},
    http::{HeaderMap, HeaderValue, Method, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use terrenos_agent::{AssistantReply, IncomingMessage, Welcome};
use terrenos_config::constants::server::FALLBACK_CORS_ORIGIN;
use terrenos_core::ConversationTurn;
use terrenos_persistence::PersistenceError;

use crate::metrics::{metrics_handler, record_request};
use crate::state::AppState;
use crate::ServerError;

const LEAD_SAVED: &str = "Mensaje enviado correctamente. Nos pondremos en contacto contigo pronto.";
const LEAD_FAILED: &str = "Error al enviar el mensaje. Por favor intenta de nuevo.";

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    let server = &state.settings.server;
    let cors_layer = build_cors_layer(&server.cors_origins, server.cors_enabled);
    let timeout = Duration::from_secs(server.timeout_seconds);

    Router::new()
        // Chat widget
        .route("/api/chat", post(chat))
        .route("/api/chat/welcome", get(welcome))
        .route("/api/chat/:session_id/history", get(history))
        // Contact form / lead capture
        .route("/api/leads", post(create_lead))
        // Health check
        .route("/health", get(health_check))
        .route("/ready", get(readiness_check))
        // Prometheus metrics
        .route("/metrics", get(metrics_handler))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(timeout))
        .layer(cors_layer)
        .with_state(state)
}

/// Build CORS layer from configured origins
///
/// - If cors_enabled is false, returns permissive layer (for dev)
/// - If no configured origin parses, falls back to the local dev origin
fn build_cors_layer(origins: &[String], enabled: bool) -> CorsLayer {
    if !enabled {
        tracing::warn!("CORS is disabled - allowing all origins (NOT FOR PRODUCTION)");
        return CorsLayer::permissive();
    }

    let parsed_origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| {
            origin.parse::<HeaderValue>().ok().or_else(|| {
                tracing::warn!("Invalid CORS origin: {}", origin);
                None
            })
        })
        .collect();

    let parsed_origins = if parsed_origins.is_empty() {
        tracing::info!(
            "No usable CORS origins configured, defaulting to {}",
            FALLBACK_CORS_ORIGIN
        );
        vec![HeaderValue::from_static(FALLBACK_CORS_ORIGIN)]
    } else {
        tracing::info!("CORS configured with {} origins", parsed_origins.len());
        parsed_origins
    };

    CorsLayer::new()
        .allow_origin(parsed_origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers(Any)
}

/// Chat request
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub page_url: Option<String>,
}

/// Client address: first `X-Forwarded-For` hop, else the socket peer
fn origin_address(headers: &HeaderMap, peer: Option<SocketAddr>) -> Option<String> {
    headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
}

/// POST /api/chat
///
/// Blank text is answered like any other message, with the fallback reply.
/// Only a body that is not a chat request is rejected.
async fn chat(
    State(state): State<AppState>,
    peer: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    request: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<AssistantReply>, ServerError> {
    let Json(request) = request.map_err(|e| {
        record_request("chat", StatusCode::BAD_REQUEST);
        ServerError::InvalidRequest(e.body_text())
    })?;

    let message = IncomingMessage {
        text: request.message,
        session_id: request.session_id,
        origin_address: origin_address(&headers, peer.map(|ConnectInfo(addr)| addr)),
        origin_page: request.page_url,
    };

    let reply = state.assistant.process_message(message).await;
    record_request("chat", StatusCode::OK);
    Ok(Json(reply))
}

/// GET /api/chat/welcome
async fn welcome(State(state): State<AppState>) -> Json<Welcome> {
    Json(state.assistant.welcome())
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub session_id: String,
    pub turns: Vec<ConversationTurn>,
    pub count: usize,
}

/// GET /api/chat/:session_id/history
async fn history(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Json<HistoryResponse> {
    let turns = state.assistant.history(&session_id).await;
    Json(HistoryResponse {
        session_id,
        count: turns.len(),
        turns,
    })
}

/// Lead request, as sent by the contact form and the chat widget
#[derive(Debug, Deserialize)]
pub struct LeadRequest {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default, alias = "terrainInterest")]
    pub property_interest: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// POST /api/leads
async fn create_lead(
    State(state): State<AppState>,
    Json(request): Json<LeadRequest>,
) -> impl IntoResponse {
    let result = state
        .assistant
        .record_lead(
            &request.name,
            &request.email,
            request.phone.as_deref(),
            request.property_interest.as_deref(),
            request.message.as_deref(),
        )
        .await;

    let (status, body) = match result {
        Ok(lead) => (
            StatusCode::CREATED,
            serde_json::json!({
                "success": true,
                "lead_id": lead.id,
                "reference": lead.reference,
                "message": LEAD_SAVED,
            }),
        ),
        Err(PersistenceError::InvalidData(reason)) => (
            StatusCode::BAD_REQUEST,
            serde_json::json!({
                "success": false,
                "message": format!("Datos inválidos: {}", reason),
            }),
        ),
        Err(e) => {
            tracing::error!(error = %e, "Lead capture failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                serde_json::json!({
                    "success": false,
                    "message": LEAD_FAILED,
                }),
            )
        }
    };

    record_request("leads", status);
    (status, Json(body))
}

/// Health check endpoint
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Readiness check endpoint
async fn readiness_check(State(state): State<AppState>) -> (StatusCode, Json<serde_json::Value>) {
    let properties = state.assistant.knowledge_base().properties.len();
    let ready = properties > 0;
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    (
        status,
        Json(serde_json::json!({
            "status": if ready { "ready" } else { "not_ready" },
            "store": state.assistant.backend_name(),
            "properties": properties,
            "environment": state.settings.environment,
        })),
    )
}
