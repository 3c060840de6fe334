//! Persistence seam for finalized trips.
//!
//! [`TripRepository`] is the interface the planner writes through. Two
//! implementations ship with the crate:
//!
//! - [`MemoryTripRepository`] keeps trips for the lifetime of the process.
//! - [`JsonFileTripRepository`] writes every trip to a single JSON document
//!   so the collection survives restarts.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use travelhunt_core::error::CoreError;
use travelhunt_core::trip::TripRecord;
use travelhunt_core::types::TripId;

pub mod file;
pub mod memory;

pub use file::JsonFileTripRepository;
pub use memory::MemoryTripRepository;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Unsupported trip file version {0}")]
    UnsupportedVersion(u32),

    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    #[error("Storage operation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Trip {0} is already stored with different contents")]
    Conflict(TripId),

    #[error("Stored trips are invalid: {0}")]
    Invalid(#[source] CoreError),
}

/// Durable home for finalized trips.
#[async_trait]
pub trait TripRepository: Send + Sync {
    /// Every stored trip, oldest first.
    async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError>;

    /// Store one more trip after the existing ones.
    ///
    /// Idempotent by id: appending a record that is already stored is a
    /// no-op, and a different record under a stored id is a
    /// [`StoreError::Conflict`].
    async fn append(&self, record: &TripRecord) -> Result<(), StoreError>;

    /// Whether a trip with `id` has been stored.
    async fn contains(&self, id: TripId) -> Result<bool, StoreError> {
        Ok(self.load_all().await?.iter().any(|r| r.id() == id))
    }

    /// Cheap check that the store can currently be used.
    async fn health_check(&self) -> Result<(), StoreError>;
}

/// Decide whether `record` still needs to be written to `stored`.
///
/// Returns `false` when an identical record is already present.
pub(crate) fn needs_append(
    stored: &[TripRecord],
    record: &TripRecord,
) -> Result<bool, StoreError> {
    match stored.iter().find(|r| r.id() == record.id()) {
        None => Ok(true),
        Some(existing) if existing == record => Ok(false),
        Some(_) => Err(StoreError::Conflict(record.id())),
    }
}

/// Pick a repository: a JSON file when `path` is set, memory otherwise.
pub fn open_repository(path: Option<PathBuf>) -> Arc<dyn TripRepository> {
    match path {
        Some(path) => {
            tracing::info!(path = %path.display(), "Using JSON file trip store");
            Arc::new(JsonFileTripRepository::new(path))
        }
        None => {
            tracing::info!("Using in-memory trip store");
            Arc::new(MemoryTripRepository::new())
        }
    }
}
