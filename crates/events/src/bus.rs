//! In-process event bus backed by a `tokio::sync::broadcast` channel.
//!
//! [`EventBus`] is shared via `Arc<EventBus>` between the planner, which
//! publishes, and any number of background subscribers.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use travelhunt_core::types::TripId;

// ---------------------------------------------------------------------------
// Event names
// ---------------------------------------------------------------------------

pub const PLACE_SELECTED: &str = "trip.place_selected";
pub const TRAVELER_SELECTED: &str = "trip.traveler_selected";
pub const DATES_SELECTED: &str = "trip.dates_selected";
pub const TRIP_CREATED: &str = "trip.created";
pub const DRAFT_DISCARDED: &str = "trip.draft_discarded";

// ---------------------------------------------------------------------------
// TripEvent
// ---------------------------------------------------------------------------

/// Something that happened in a trip-creation flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TripEvent {
    /// Dot-separated event name, e.g. `"trip.created"`.
    pub event_type: String,

    /// Id of the finalized trip, for events that have one.
    pub trip_id: Option<TripId>,

    /// Free-form JSON payload carrying event-specific data.
    pub payload: serde_json::Value,

    pub timestamp: DateTime<Utc>,
}

impl TripEvent {
    pub fn new(event_type: impl Into<String>) -> Self {
        Self {
            event_type: event_type.into(),
            trip_id: None,
            payload: serde_json::Value::Object(Default::default()),
            timestamp: Utc::now(),
        }
    }

    pub fn with_trip(mut self, trip_id: TripId) -> Self {
        self.trip_id = Some(trip_id);
        self
    }

    pub fn with_payload(mut self, payload: serde_json::Value) -> Self {
        self.payload = payload;
        self
    }
}

// ---------------------------------------------------------------------------
// EventBus
// ---------------------------------------------------------------------------

/// Default buffer capacity for the broadcast channel.
const DEFAULT_CAPACITY: usize = 256;

/// In-process fan-out event bus.
///
/// ```rust
/// use travelhunt_events::bus::{EventBus, TripEvent, TRIP_CREATED};
///
/// let bus = EventBus::default();
/// let mut rx = bus.subscribe();
///
/// bus.publish(TripEvent::new(TRIP_CREATED).with_trip(1));
/// ```
pub struct EventBus {
    sender: broadcast::Sender<TripEvent>,
}

impl EventBus {
    /// Create a bus with a specific channel capacity.
    ///
    /// Slow receivers that fall more than `capacity` events behind observe
    /// `RecvError::Lagged`.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity);
        Self { sender }
    }

    /// Publish to all current subscribers. Dropped when nobody listens.
    pub fn publish(&self, event: TripEvent) {
        let _ = self.sender.send(event);
    }

    pub fn subscribe(&self) -> broadcast::Receiver<TripEvent> {
        self.sender.subscribe()
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}
