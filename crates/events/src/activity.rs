//! Structured-log subscriber for trip events.

use tokio::sync::broadcast;

use crate::bus::TripEvent;

/// Background task writing every [`TripEvent`] to the tracing log.
pub struct ActivityLog;

impl ActivityLog {
    /// Consume events until the bus is dropped. Returns how many were logged.
    pub async fn run(mut receiver: broadcast::Receiver<TripEvent>) -> u64 {
        let mut logged = 0;
        loop {
            match receiver.recv().await {
                Ok(event) => {
                    tracing::info!(
                        event_type = %event.event_type,
                        trip_id = ?event.trip_id,
                        payload = %event.payload,
                        "Trip activity"
                    );
                    logged += 1;
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    tracing::warn!(skipped = n, "Activity log lagged, some events were not logged");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    tracing::info!(logged, "Event bus closed, activity log shutting down");
                    break;
                }
            }
        }
        logged
    }
}
