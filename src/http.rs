//! HTTP transport module for the reframe server
//!
//! Provides the Axum-based inbound surface: health and metrics endpoints,
//! the reframe endpoint (decodes the wizard's query mapping and returns the
//! reconciled generation result), the stub session-creation route, and the
//! session viewer route. The session route issues a fresh opaque identifier;
//! persistence behind it is an external concern.

use crate::config::Config;
use crate::error::Result;
use crate::generation::{GenerationBackend, HttpGenerationBackend};
use crate::results::ResultsSession;
use crate::state::WizardState;
use axum::{
    Router,
    body::{Body, Bytes},
    extract::{Path, RawQuery, State},
    http::{StatusCode, header},
    middleware,
    response::IntoResponse,
    routing::{get, post},
};
use serde_json::json;
use std::sync::Arc;
use tokio::sync::Mutex;
use tower_http::cors::{Any, CorsLayer};

/// Shared state for HTTP server
#[derive(Clone)]
pub struct HttpState {
    pub config: Arc<Config>,
    pub metrics: Arc<Mutex<HttpMetrics>>,
    pub generation: Arc<dyn GenerationBackend>,
}

/// Metrics for HTTP server
#[derive(Debug, Clone)]
pub struct HttpMetrics {
    pub total_requests: u64,
    pub last_request_unix: u64,
    pub sessions_created: u64,
    pub errors_total: u64,
}

impl HttpMetrics {
    pub fn new() -> Self {
        Self {
            total_requests: 0,
            last_request_unix: std::time::SystemTime::UNIX_EPOCH
                .elapsed()
                .unwrap_or_default()
                .as_secs(),
            sessions_created: 0,
            errors_total: 0,
        }
    }
}

impl Default for HttpMetrics {
    fn default() -> Self {
        Self::new()
    }
}

/// Health check endpoint
pub async fn health_handler() -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"status": "healthy"}).to_string(),
    )
}

/// Metrics endpoint
pub async fn metrics_handler(State(state): State<HttpState>) -> impl IntoResponse {
    let metrics = state.metrics.lock().await.clone();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "metrics_version": "1",
            "total_requests": metrics.total_requests,
            "last_request_unix": metrics.last_request_unix,
            "sessions_created": metrics.sessions_created,
            "errors_total": metrics.errors_total,
        })
        .to_string(),
    )
}

/// Reframe endpoint: decodes the step's query mapping, runs the one-shot
/// generation fetch, and returns the fully reconciled result. The response
/// never carries holes; failures surface only as the diagnostic field plus
/// fallback content.
pub async fn reframe_handler(
    State(state): State<HttpState>,
    RawQuery(query): RawQuery,
) -> impl IntoResponse {
    let wizard = WizardState::from_query(query.as_deref().unwrap_or(""));
    let mut session = ResultsSession::new(wizard);
    session.load(state.generation.as_ref()).await;

    let result = session.result();
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({
            "reframe": result.reframe_text,
            "analysis": result.analysis_points,
            "actions": result.actions,
            "timeline": result.timeline,
            "diagnostic": session.diagnostic(),
        })
        .to_string(),
    )
}

/// Stub session-creation endpoint: accepts a loose JSON summary and returns
/// a freshly generated opaque identifier. A malformed body is the only
/// failure, reported as a 500 with an error field.
pub async fn create_session_handler(
    State(state): State<HttpState>,
    body: Bytes,
) -> impl IntoResponse {
    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(summary) => {
            let session_id = uuid::Uuid::new_v4().to_string();
            tracing::info!(
                session_id = %session_id,
                category = summary.get("category").and_then(|v| v.as_str()).unwrap_or(""),
                "session created"
            );
            let mut metrics = state.metrics.lock().await;
            metrics.sessions_created = metrics.sessions_created.saturating_add(1);
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "application/json")],
                json!({"sessionId": session_id}).to_string(),
            )
        }
        Err(_) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            [(header::CONTENT_TYPE, "application/json")],
            json!({"error": "Failed to create session"}).to_string(),
        ),
    }
}

/// Session viewer route: display-only echo of the opaque identifier. No
/// lookup is performed.
pub async fn view_session_handler(Path(session_id): Path<String>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "application/json")],
        json!({"sessionId": session_id}).to_string(),
    )
}

/// Build the inbound router with CORS and request accounting.
pub fn build_router(state: HttpState) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/metrics", get(metrics_handler))
        .route("/api/reframe", get(reframe_handler))
        .route("/api/session", post(create_session_handler))
        .route("/s/:session_id", get(view_session_handler))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any))
        .layer(middleware::from_fn_with_state(
            state.metrics.clone(),
            |State(metrics): State<Arc<Mutex<HttpMetrics>>>,
             req: axum::http::Request<Body>,
             next: axum::middleware::Next| async move {
                let resp = next.run(req).await;
                let mut m = metrics.lock().await;
                if !resp.status().is_success() {
                    m.errors_total = m.errors_total.saturating_add(1);
                }
                m.total_requests = m.total_requests.saturating_add(1);
                m.last_request_unix = std::time::SystemTime::now()
                    .duration_since(std::time::UNIX_EPOCH)
                    .unwrap_or_default()
                    .as_secs();
                resp
            },
        ))
        .with_state(state)
}

/// Start the HTTP server
pub async fn start_http_server(config: Arc<Config>) -> Result<()> {
    let bind = config.runtime.http_bind;
    let generation = HttpGenerationBackend::new(
        config.generation.backend_url.clone(),
        config.generation_timeout(),
    )?;
    let state = HttpState {
        config,
        metrics: Arc::new(Mutex::new(HttpMetrics::new())),
        generation: Arc::new(generation),
    };
    let app = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind HTTP listener: {}", e))?;

    tracing::info!("Starting HTTP server on {}", bind);

    axum::serve(listener, app)
        .await
        .map_err(|e| anyhow::anyhow!("HTTP server error: {}", e))?;

    Ok(())
}
