pub mod health;

use axum::routing::{get, post, put};
use axum::Router;

use crate::handlers;
use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /places                       catalog search (GET, ?q=)
/// /traveler-options             traveler option list (GET)
///
/// /trips                        list (GET), complete flow in one call (POST)
/// /trips/{id}                   single trip (GET)
///
/// /trips/draft                  current draft (GET), discard (DELETE)
/// /trips/draft/place            step 1 (PUT)
/// /trips/draft/traveler         step 2 (PUT)
/// /trips/draft/dates            step 3 (PUT)
/// /trips/draft/finalize         finalize and append (POST)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/places", get(handlers::catalog::search_places))
        .route(
            "/traveler-options",
            get(handlers::catalog::list_traveler_options),
        )
        .route(
            "/trips",
            get(handlers::trips::list_trips).post(handlers::trips::complete_trip),
        )
        .route(
            "/trips/draft",
            get(handlers::trips::get_draft).delete(handlers::trips::discard_draft),
        )
        .route("/trips/draft/place", put(handlers::trips::set_place))
        .route("/trips/draft/traveler", put(handlers::trips::set_traveler))
        .route("/trips/draft/dates", put(handlers::trips::set_dates))
        .route(
            "/trips/draft/finalize",
            post(handlers::trips::finalize_draft),
        )
        .route("/trips/{id}", get(handlers::trips::get_trip))
}
