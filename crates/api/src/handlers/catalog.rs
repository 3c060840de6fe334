//! Handlers for the lookup lists shown by the first two steps.

use axum::extract::{Query, State};
use axum::response::IntoResponse;
use axum::Json;
use serde::Deserialize;
use travelhunt_core::catalog::traveler_options;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct PlaceSearchParams {
    pub q: Option<String>,
}

/// GET /api/v1/places?q=
///
/// Catalog places whose name contains `q`, ignoring case.
pub async fn search_places(
    State(state): State<AppState>,
    Query(params): Query<PlaceSearchParams>,
) -> AppResult<impl IntoResponse> {
    let query = params.q.unwrap_or_default();
    let places: Vec<_> = state.catalog.search(&query).into_iter().cloned().collect();

    Ok(Json(DataResponse { data: places }))
}

/// GET /api/v1/traveler-options
pub async fn list_traveler_options() -> AppResult<impl IntoResponse> {
    Ok(Json(DataResponse {
        data: traveler_options(),
    }))
}
