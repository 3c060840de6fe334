//! JSON document trip store.
//!
//! All trips live in one file shaped as `{ "version": 1, "trips": [...] }`.
//! Appends rewrite the whole document through a temporary file followed by
//! a rename, so a crash mid-write leaves the previous document intact.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::io::AsyncWriteExt;
use tokio::sync::{Mutex, OwnedMutexGuard};
use travelhunt_core::trip::TripRecord;
use travelhunt_core::types::TripId;

use crate::{needs_append, StoreError, TripRepository};

/// Current on-disk document version.
pub const TRIP_FILE_VERSION: u32 = 1;

#[derive(Debug, Serialize, Deserialize)]
struct TripDocument {
    version: u32,
    trips: Vec<TripRecord>,
}

impl Default for TripDocument {
    fn default() -> Self {
        Self {
            version: TRIP_FILE_VERSION,
            trips: Vec::new(),
        }
    }
}

/// Trip store backed by a single JSON file.
#[derive(Debug, Clone)]
pub struct JsonFileTripRepository {
    inner: Arc<TripFile>,
}

#[derive(Debug)]
struct TripFile {
    path: PathBuf,
    write_lock: Arc<Mutex<()>>,
}

impl JsonFileTripRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            inner: Arc::new(TripFile {
                path: path.into(),
                write_lock: Arc::new(Mutex::new(())),
            }),
        }
    }
}

impl TripFile {
    fn dir(&self) -> &Path {
        self.path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or_else(|| Path::new("."))
    }

    async fn read_document(&self) -> Result<TripDocument, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(TripDocument::default())
            }
            Err(e) => return Err(e.into()),
        };
        let document: TripDocument = serde_json::from_str(&content)?;
        if document.version != TRIP_FILE_VERSION {
            return Err(StoreError::UnsupportedVersion(document.version));
        }
        Ok(document)
    }

    async fn write_document(&self, document: &TripDocument) -> Result<(), StoreError> {
        let dir = self.dir();
        tokio::fs::create_dir_all(dir).await?;

        let content = serde_json::to_string_pretty(document)?;
        let tmp_path = dir.join(format!(".trips.{}.tmp", uuid::Uuid::new_v4().simple()));

        let write_result = async {
            let mut file = tokio::fs::File::create(&tmp_path).await?;
            file.write_all(content.as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, &self.path).await
        }
        .await;

        if let Err(e) = write_result {
            let _ = tokio::fs::remove_file(&tmp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Read, extend and rewrite the document while holding `guard`.
    async fn append_locked(
        &self,
        _guard: OwnedMutexGuard<()>,
        record: TripRecord,
    ) -> Result<(), StoreError> {
        let mut document = self.read_document().await?;
        if !needs_append(&document.trips, &record)? {
            tracing::debug!(trip_id = record.id(), "Trip already in file store");
            return Ok(());
        }
        let trip_id = record.id();
        document.trips.push(record);
        self.write_document(&document).await?;
        tracing::debug!(
            trip_id,
            total = document.trips.len(),
            path = %self.path.display(),
            "Trip written to file store"
        );
        Ok(())
    }
}

#[async_trait]
impl TripRepository for JsonFileTripRepository {
    async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
        Ok(self.inner.read_document().await?.trips)
    }

    /// The write runs on its own task and keeps the write lock until the
    /// document is on disk, even if the caller stops waiting for it.
    async fn append(&self, record: &TripRecord) -> Result<(), StoreError> {
        let lock = Arc::clone(&self.inner.write_lock).lock_owned().await;
        let inner = Arc::clone(&self.inner);
        let record = record.clone();
        tokio::spawn(async move { inner.append_locked(lock, record).await })
            .await
            .map_err(|e| StoreError::Unavailable(format!("Trip write task failed: {e}")))?
    }

    /// Waits for any in-flight write before looking.
    async fn contains(&self, id: TripId) -> Result<bool, StoreError> {
        let _guard = self.inner.write_lock.lock().await;
        let document = self.inner.read_document().await?;
        Ok(document.trips.iter().any(|r| r.id() == id))
    }

    async fn health_check(&self) -> Result<(), StoreError> {
        let inner = &self.inner;
        if tokio::fs::try_exists(&inner.path).await? {
            inner.read_document().await.map(|_| ())
        } else {
            match tokio::fs::metadata(inner.dir()).await {
                Ok(meta) if meta.is_dir() => Ok(()),
                Ok(_) => Err(StoreError::Unavailable(format!(
                    "{} is not a directory",
                    inner.dir().display()
                ))),
                // The directory is created on first append.
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
                Err(e) => Err(e.into()),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
