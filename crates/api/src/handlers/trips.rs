//! Handlers for the trip-creation flow and the trip listing.
//!
//! The flow controller calls the draft endpoints once per step, then
//! `POST /trips/draft/finalize`. `POST /trips` runs the whole flow in one
//! request.

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use serde::{Deserialize, Serialize};
use travelhunt_core::draft::{DraftStep, TripDraft};
use travelhunt_core::trip::{
    DateRange, PlaceSelection, TravelerSelection, TravelerType, TripRecord, TripSummary,
};
use travelhunt_core::types::TripId;
use validator::Validate;

use crate::error::AppResult;
use crate::extract::{AppJson, AppPath};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Payloads
// ---------------------------------------------------------------------------

/// Traveler step input. `people_count_range` defaults to the option's
/// standard range when omitted.
#[derive(Debug, Deserialize, Validate)]
pub struct TravelerInput {
    pub traveler_type: TravelerType,
    #[validate(length(min = 1, max = 60))]
    pub people_count_range: Option<String>,
}

impl From<TravelerInput> for TravelerSelection {
    fn from(input: TravelerInput) -> Self {
        match input.people_count_range {
            Some(range) => TravelerSelection::new(input.traveler_type, range),
            None => TravelerSelection::for_type(input.traveler_type),
        }
    }
}

/// Body of `POST /trips`.
#[derive(Debug, Deserialize, Validate)]
pub struct CompleteTripRequest {
    #[validate(nested)]
    pub place: PlaceSelection,
    #[validate(nested)]
    pub traveler: TravelerInput,
    pub dates: DateRange,
}

/// The current draft and the step the flow should show next.
#[derive(Debug, Serialize)]
pub struct DraftView {
    #[serde(flatten)]
    pub draft: TripDraft,
    pub next_step: Option<DraftStep>,
    pub complete: bool,
}

impl From<TripDraft> for DraftView {
    fn from(draft: TripDraft) -> Self {
        Self {
            next_step: draft.next_step(),
            complete: draft.is_complete(),
            draft,
        }
    }
}

/// A trip together with its listing-card text.
#[derive(Debug, Serialize)]
pub struct TripView {
    #[serde(flatten)]
    pub trip: TripRecord,
    pub summary: TripSummary,
}

impl From<TripRecord> for TripView {
    fn from(trip: TripRecord) -> Self {
        Self {
            summary: trip.summary(),
            trip,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct TripListView {
    pub trips: Vec<TripView>,
    pub is_empty: bool,
}

// ---------------------------------------------------------------------------
// Listing
// ---------------------------------------------------------------------------

/// GET /api/v1/trips
///
/// All finalized trips, oldest first. `is_empty` tells the listing view to
/// show the "start a new trip" prompt.
pub async fn list_trips(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let trips: Vec<TripView> = state
        .planner
        .trips()
        .await
        .into_iter()
        .map(TripView::from)
        .collect();
    let is_empty = trips.is_empty();

    Ok(Json(DataResponse {
        data: TripListView { trips, is_empty },
    }))
}

/// GET /api/v1/trips/{id}
pub async fn get_trip(
    State(state): State<AppState>,
    AppPath(trip_id): AppPath<TripId>,
) -> AppResult<impl IntoResponse> {
    let trip = state.planner.trip(trip_id).await?;

    Ok(Json(DataResponse {
        data: TripView::from(trip),
    }))
}

/// POST /api/v1/trips
///
/// Create a trip from all three selections at once.
pub async fn complete_trip(
    State(state): State<AppState>,
    AppJson(input): AppJson<CompleteTripRequest>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let trip = state
        .planner
        .complete_flow(input.place, input.traveler.into(), input.dates)
        .await?;

    tracing::info!(trip_id = trip.id(), "Trip created via complete flow");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TripView::from(trip),
        }),
    ))
}

// ---------------------------------------------------------------------------
// Draft steps
// ---------------------------------------------------------------------------

/// GET /api/v1/trips/draft
pub async fn get_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let draft = state.planner.draft().await;

    Ok(Json(DataResponse {
        data: DraftView::from(draft),
    }))
}

/// PUT /api/v1/trips/draft/place
pub async fn set_place(
    State(state): State<AppState>,
    AppJson(input): AppJson<PlaceSelection>,
) -> AppResult<impl IntoResponse> {
    let draft = state.planner.set_place(input).await?;

    Ok(Json(DataResponse {
        data: DraftView::from(draft),
    }))
}

/// PUT /api/v1/trips/draft/traveler
pub async fn set_traveler(
    State(state): State<AppState>,
    AppJson(input): AppJson<TravelerInput>,
) -> AppResult<impl IntoResponse> {
    input.validate()?;
    let draft = state.planner.set_traveler(input.into()).await?;

    Ok(Json(DataResponse {
        data: DraftView::from(draft),
    }))
}

/// PUT /api/v1/trips/draft/dates
pub async fn set_dates(
    State(state): State<AppState>,
    AppJson(input): AppJson<DateRange>,
) -> AppResult<impl IntoResponse> {
    let draft = state.planner.set_dates(input).await?;

    Ok(Json(DataResponse {
        data: DraftView::from(draft),
    }))
}

/// POST /api/v1/trips/draft/finalize
///
/// Turn the complete draft into a trip and add it to the listing.
pub async fn finalize_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let trip = state.planner.finalize_draft().await?;

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: TripView::from(trip),
        }),
    ))
}

/// DELETE /api/v1/trips/draft
///
/// Abandon the flow. Idempotent.
pub async fn discard_draft(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    state.planner.discard().await;

    Ok(StatusCode::NO_CONTENT)
}
