//! Trip id allocation.

use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::Arc;

use crate::error::CoreError;
use crate::types::TripId;

/// First id handed out by a fresh generator.
pub const FIRST_TRIP_ID: TripId = 1;

/// Monotonic trip id counter.
///
/// Clones share the same counter, so every draft store built from one
/// generator allocates ids that are unique across all of them.
#[derive(Debug, Clone)]
pub struct TripIdGenerator {
    next: Arc<AtomicI64>,
}

impl TripIdGenerator {
    pub fn new() -> Self {
        Self {
            next: Arc::new(AtomicI64::new(FIRST_TRIP_ID)),
        }
    }

    /// Allocate the next id.
    pub fn next_id(&self) -> TripId {
        self.next.fetch_add(1, Ordering::SeqCst)
    }

    /// Ensure future ids are strictly greater than `last_used`.
    ///
    /// Never moves the counter backwards. Fails when `last_used` is the
    /// largest representable id, since no later id exists.
    pub fn resume_after(&self, last_used: TripId) -> Result<(), CoreError> {
        let next = last_used.checked_add(1).ok_or_else(|| {
            CoreError::Internal(format!("No trip ids left after {last_used}"))
        })?;
        self.next.fetch_max(next, Ordering::SeqCst);
        Ok(())
    }

    /// The id the next call to [`next_id`](Self::next_id) will return.
    pub fn peek(&self) -> TripId {
        self.next.load(Ordering::SeqCst)
    }
}

impl Default for TripIdGenerator {
    fn default() -> Self {
        Self::new()
    }
}
