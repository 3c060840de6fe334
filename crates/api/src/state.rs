use std::sync::Arc;

use travelhunt_core::catalog::PlaceCatalog;
use travelhunt_db::TripRepository;
use travelhunt_events::EventBus;
use travelhunt_pipeline::TripPlanner;

use crate::config::ServerConfig;

/// Shared application state available to all handlers via `State<AppState>`.
///
/// Cheaply cloneable; everything lives behind `Arc`.
#[derive(Clone)]
pub struct AppState {
    /// The trip-planning session driven by the flow controller.
    pub planner: Arc<TripPlanner>,
    /// Places offered by the search step.
    pub catalog: Arc<PlaceCatalog>,
}

impl AppState {
    /// Wire a planner over `repository` using the built-in place catalog.
    ///
    /// The planner publishes its step and trip events on `event_bus`.
    pub fn new(
        config: &ServerConfig,
        repository: Arc<dyn TripRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        let catalog = PlaceCatalog::default();
        let planner = TripPlanner::new(repository, event_bus, config.planner_config(&catalog));
        Self {
            planner: Arc::new(planner),
            catalog: Arc::new(catalog),
        }
    }
}
