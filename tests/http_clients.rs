//! End-to-end tests for the HTTP backends against in-process servers

use axum::{Router, routing::post};
use reframe::config::Config;
use reframe::generation::{GenerateRequest, GenerationBackend, HttpGenerationBackend, reconcile};
use reframe::http::{HttpMetrics, HttpState, build_router};
use reframe::sessions::{HttpSessionBackend, SavePayload, SessionBackend, share_path};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

async fn spawn(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("ephemeral bind should succeed");
    let addr = listener.local_addr().expect("bound listener has an addr");
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });
    format!("http://{}", addr)
}

async fn spawn_app(backend_url: String) -> String {
    let config = Config::default();
    let generation = HttpGenerationBackend::new(backend_url, Duration::from_secs(2))
        .expect("client should build");
    let state = HttpState {
        config: Arc::new(config),
        metrics: Arc::new(Mutex::new(HttpMetrics::new())),
        generation: Arc::new(generation),
    };
    spawn(build_router(state)).await
}

fn stub_generation_service() -> Router {
    Router::new().route(
        "/generate-path",
        post(|| async {
            (
                [(axum::http::header::CONTENT_TYPE, "application/json")],
                r#"{
                    "planId": "stub-plan",
                    "reframe": "Stub reframe",
                    "analysis": ["a1", "a2", "a3"],
                    "actions": [{"title": "t", "description": "d"}],
                    "timeline": [{"week": [{"title": "w", "description": "wd"}], "month": []}]
                }"#,
            )
        }),
    )
}

#[tokio::test]
async fn generation_backend_round_trips_against_stub_service() {
    let base = spawn(stub_generation_service()).await;
    let backend =
        HttpGenerationBackend::new(base, Duration::from_secs(2)).expect("client should build");

    let request = GenerateRequest::from_state(&Default::default());
    let wire = backend.generate(&request).await.expect("stub should respond");
    let outcome = reconcile(wire);
    assert_eq!(outcome.result().reframe_text, "Stub reframe");
    assert_eq!(outcome.result().analysis_points.len(), 3);
}

#[tokio::test]
async fn generation_backend_maps_non_2xx_to_error() {
    let failing = Router::new().route(
        "/generate-path",
        post(|| async { (axum::http::StatusCode::INTERNAL_SERVER_ERROR, "nope") }),
    );
    let base = spawn(failing).await;
    let backend =
        HttpGenerationBackend::new(base, Duration::from_secs(2)).expect("client should build");

    let request = GenerateRequest::from_state(&Default::default());
    assert!(backend.generate(&request).await.is_err());
}

#[tokio::test]
async fn session_backend_creates_session_via_app_route() {
    // The app route never dials the generation service for session saves, so
    // the configured backend URL can be unreachable here.
    let app_base = spawn_app("http://127.0.0.1:9".to_string()).await;
    let sessions = HttpSessionBackend::new(app_base, Duration::from_secs(2))
        .expect("client should build");

    let payload = SavePayload {
        category: "career".to_string(),
        emotion: 5,
        intensity: 8,
        mode: "week".to_string(),
        activated_action: Some("Refine positioning".to_string()),
        ai_response: "A reframe".to_string(),
    };
    let id = sessions
        .create_session(&payload)
        .await
        .expect("session save should succeed");
    uuid::Uuid::parse_str(&id).expect("session id should be a UUID");
    assert_eq!(share_path(&id), format!("/s/{}", id));
}

#[tokio::test]
async fn reframe_route_returns_reconciled_result() {
    let service_base = spawn(stub_generation_service()).await;
    let app_base = spawn_app(service_base).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!(
            "{}/api/reframe?category=career&emotion=5&intensity=8&situation=stuck",
            app_base
        ))
        .send()
        .await
        .expect("app should respond");
    assert!(resp.status().is_success());
    let body: serde_json::Value = resp.json().await.expect("body should be JSON");
    assert_eq!(body["reframe"], "Stub reframe");
    assert!(body["diagnostic"].is_null());
}

#[tokio::test]
async fn reframe_route_degrades_to_fallback_when_service_is_down() {
    let app_base = spawn_app("http://127.0.0.1:9".to_string()).await;

    let client = reqwest::Client::new();
    let resp = client
        .get(format!("{}/api/reframe", app_base))
        .send()
        .await
        .expect("app should respond");
    assert!(resp.status().is_success());
    let body: serde_json::Value = resp.json().await.expect("body should be JSON");
    assert_eq!(
        body["diagnostic"],
        "Failed to connect to backend. Using fallback response."
    );
    // Full fallback shape: 3 analysis bullets, 3 actions, 3/4 timelines.
    assert_eq!(body["analysis"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["actions"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["timeline"]["week"].as_array().map(Vec::len), Some(3));
    assert_eq!(body["timeline"]["month"].as_array().map(Vec::len), Some(4));
}
