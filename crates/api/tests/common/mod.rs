#![allow(dead_code)]

use std::sync::Arc;

use axum::body::Body;
use axum::http::{Method, Request, Response};
use axum::Router;
use http_body_util::BodyExt;
use tower::ServiceExt;

use travelhunt_api::config::ServerConfig;
use travelhunt_api::router::build_app_router;
use travelhunt_api::state::AppState;
use travelhunt_db::{MemoryTripRepository, TripRepository};
use travelhunt_events::EventBus;

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:8081".to_string()],
        request_timeout_secs: 30,
        shutdown_timeout_secs: 5,
        trips_file: None,
        restrict_places_to_catalog: true,
        reset_downstream_on_place_change: false,
        persist_timeout_ms: 1000,
        persist_retries: 0,
    }
}

/// Full application router over an in-memory trip store.
pub fn build_test_app() -> Router {
    build_test_app_with(test_config(), Arc::new(MemoryTripRepository::new()))
}

/// Full application router over the given config and trip store.
pub fn build_test_app_with(config: ServerConfig, repository: Arc<dyn TripRepository>) -> Router {
    let state = AppState::new(&config, repository, Arc::new(EventBus::default()));
    build_app_router(state, &config)
}

pub async fn send(
    app: &Router,
    method: Method,
    uri: &str,
    body: Option<serde_json::Value>,
) -> Response<Body> {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(json) => builder
            .header("content-type", "application/json")
            .body(Body::from(json.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    app.clone().oneshot(request).await.unwrap()
}

pub async fn get(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::GET, uri, None).await
}

pub async fn post_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::POST, uri, Some(body)).await
}

pub async fn put_json(app: &Router, uri: &str, body: serde_json::Value) -> Response<Body> {
    send(app, Method::PUT, uri, Some(body)).await
}

pub async fn post_empty(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::POST, uri, None).await
}

pub async fn delete(app: &Router, uri: &str) -> Response<Body> {
    send(app, Method::DELETE, uri, None).await
}

/// Collect a response body and parse it as JSON.
pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
