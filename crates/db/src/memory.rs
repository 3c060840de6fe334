use async_trait::async_trait;
use tokio::sync::RwLock;
use travelhunt_core::trip::TripRecord;
use travelhunt_core::types::TripId;

use crate::{needs_append, StoreError, TripRepository};

/// Process-lifetime trip store.
#[derive(Debug, Default)]
pub struct MemoryTripRepository {
    records: RwLock<Vec<TripRecord>>,
}

impl MemoryTripRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl TripRepository for MemoryTripRepository {
    async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
        Ok(self.records.read().await.clone())
    }

    async fn append(&self, record: &TripRecord) -> Result<(), StoreError> {
        let mut records = self.records.write().await;
        if needs_append(&records, record)? {
            records.push(record.clone());
        }
        Ok(())
    }

    async fn contains(&self, id: TripId) -> Result<bool, StoreError> {
        Ok(self.records.read().await.iter().any(|r| r.id() == id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        Ok(())
    }
}
