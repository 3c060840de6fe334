//! Integration tests for error responses.

mod common;

use std::sync::Arc;

use assert_matches::assert_matches;
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request, StatusCode};
use axum::response::IntoResponse;
use common::{body_json, get, post_json};
use tower::ServiceExt;
use serde_json::json;
use travelhunt_api::error::AppError;
use travelhunt_core::draft::DraftStep;
use travelhunt_core::error::CoreError;
use travelhunt_core::trip::TripRecord;
use travelhunt_db::{StoreError, TripRepository};
use travelhunt_pipeline::PlannerError;

/// Trip store that rejects every write.
struct ReadOnlyRepository;

#[async_trait]
impl TripRepository for ReadOnlyRepository {
    async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
        Ok(Vec::new())
    }

    async fn append(&self, _record: &TripRecord) -> Result<(), StoreError> {
        Err(StoreError::Unavailable("read-only volume".to_string()))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}

#[tokio::test]
async fn append_failure_returns_503_and_keeps_listing_empty() {
    let app = common::build_test_app_with(common::test_config(), Arc::new(ReadOnlyRepository));

    let response = post_json(
        &app,
        "/api/v1/trips",
        json!({
            "place": { "name": "Agra" },
            "traveler": { "traveler_type": "solo" },
            "dates": { "start": "2025-01-01", "end": "2025-01-02" }
        }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let json = body_json(response).await;
    assert_eq!(json["code"], "APPEND_FAILURE");
    // Storage details are not leaked to the client.
    assert!(!json["error"].as_str().unwrap().contains("read-only"));

    let list = body_json(get(&app, "/api/v1/trips").await).await;
    assert_eq!(list["data"]["is_empty"], true);
}

#[test]
fn planner_errors_map_onto_app_errors() {
    let err = AppError::from(PlannerError::Core(CoreError::IncompleteDraft {
        missing: DraftStep::Dates,
    }));
    assert_matches!(err, AppError::Core(CoreError::IncompleteDraft { .. }));

    let err = AppError::from(PlannerError::AppendFailure(StoreError::Unavailable(
        "x".to_string(),
    )));
    assert_matches!(err, AppError::AppendFailure(_));

    let err = AppError::from(PlannerError::Restore(StoreError::Unavailable(
        "x".to_string(),
    )));
    assert_matches!(err, AppError::InternalError(_));
}

#[test]
fn internal_errors_are_sanitized() {
    let response = AppError::InternalError("secret detail".to_string()).into_response();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn wrongly_shaped_body_gets_error_envelope() {
    let app = common::build_test_app();
    let response = post_json(&app, "/api/v1/trips", json!({ "place": "Agra" })).await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
    assert!(json["error"].is_string());
}

#[tokio::test]
async fn unparseable_body_gets_error_envelope() {
    let app = common::build_test_app();
    let request = Request::builder()
        .method(Method::PUT)
        .uri("/api/v1/trips/draft/place")
        .header("content-type", "application/json")
        .body(Body::from("{ \"name\": "))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}

#[tokio::test]
async fn non_numeric_trip_id_gets_error_envelope() {
    let app = common::build_test_app();
    let response = get(&app, "/api/v1/trips/abc").await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_REQUEST");
}
