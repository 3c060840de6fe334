//! The trip planner session and its step operations.

use std::sync::Arc;
use std::time::Duration;

use serde_json::json;
use tokio::sync::Mutex;
use travelhunt_core::catalog::PlaceCatalog;
use travelhunt_core::collection::TripCollection;
use travelhunt_core::draft::{DraftPolicy, TripDraft, TripDraftStore};
use travelhunt_core::error::CoreError;
use travelhunt_core::id::TripIdGenerator;
use travelhunt_core::trip::{DateRange, PlaceSelection, TravelerSelection, TripRecord};
use travelhunt_core::types::TripId;
use travelhunt_db::{StoreError, TripRepository};
use travelhunt_events::bus::{
    EventBus, TripEvent, DATES_SELECTED, DRAFT_DISCARDED, PLACE_SELECTED, TRAVELER_SELECTED,
    TRIP_CREATED,
};

use crate::error::PlannerError;

/// Default upper bound on a single repository write.
pub const DEFAULT_PERSIST_TIMEOUT: Duration = Duration::from_secs(5);

/// Default number of extra attempts after a failed repository write.
pub const DEFAULT_PERSIST_RETRIES: u32 = 2;

/// Tuning for a [`TripPlanner`].
#[derive(Debug, Clone)]
pub struct PlannerConfig {
    pub draft_policy: DraftPolicy,
    /// When set, places must come from this catalog and are stored with the
    /// catalog's spelling.
    pub catalog: Option<PlaceCatalog>,
    pub persist_timeout: Duration,
    pub persist_retries: u32,
}

impl Default for PlannerConfig {
    fn default() -> Self {
        Self {
            draft_policy: DraftPolicy::default(),
            catalog: None,
            persist_timeout: DEFAULT_PERSIST_TIMEOUT,
            persist_retries: DEFAULT_PERSIST_RETRIES,
        }
    }
}

struct Session {
    drafts: TripDraftStore,
    trips: TripCollection,
}

/// One user's trip-planning session.
///
/// Shared as `Arc<TripPlanner>`; every operation takes `&self`.
pub struct TripPlanner {
    session: Mutex<Session>,
    ids: TripIdGenerator,
    repository: Arc<dyn TripRepository>,
    events: Arc<EventBus>,
    config: PlannerConfig,
}

impl TripPlanner {
    pub fn new(
        repository: Arc<dyn TripRepository>,
        events: Arc<EventBus>,
        config: PlannerConfig,
    ) -> Self {
        let ids = TripIdGenerator::new();
        let session = Session {
            drafts: TripDraftStore::new(ids.clone(), config.draft_policy),
            trips: TripCollection::new(),
        };
        Self {
            session: Mutex::new(session),
            ids,
            repository,
            events,
            config,
        }
    }

    /// Replace the in-memory collection with the repository's contents.
    ///
    /// Stored records are re-validated and must have unique ids; any bad
    /// record fails the whole restore and leaves the session unchanged. New
    /// ids continue after the highest restored id. Returns the number of
    /// trips restored.
    pub async fn restore(&self) -> Result<usize, PlannerError> {
        let records = self
            .repository
            .load_all()
            .await
            .map_err(PlannerError::Restore)?;
        let invalid = |e: CoreError| PlannerError::Restore(StoreError::Invalid(e));
        let trips = TripCollection::from_records(records).map_err(invalid)?;
        let mut session = self.session.lock().await;
        if let Some(max_id) = trips.max_id() {
            self.ids.resume_after(max_id).map_err(invalid)?;
        }
        let count = trips.len();
        session.trips = trips;
        tracing::info!(count, next_id = self.ids.peek(), "Restored stored trips");
        Ok(count)
    }

    // -----------------------------------------------------------------------
    // Step operations
    // -----------------------------------------------------------------------

    /// Step 1: choose the destination.
    pub async fn set_place(&self, place: PlaceSelection) -> Result<TripDraft, PlannerError> {
        let place = self.resolve_place(place)?;
        let mut session = self.session.lock().await;
        session.drafts.set_place(place.clone())?;
        tracing::debug!(place = %place.name, "Place selected");
        self.events
            .publish(TripEvent::new(PLACE_SELECTED).with_payload(json!({ "place": place.name })));
        Ok(session.drafts.draft().clone())
    }

    /// Step 2: choose the party.
    pub async fn set_traveler(
        &self,
        traveler: TravelerSelection,
    ) -> Result<TripDraft, PlannerError> {
        let mut session = self.session.lock().await;
        session.drafts.set_traveler(traveler.clone())?;
        tracing::debug!(
            traveler_type = traveler.traveler_type.as_str(),
            people = %traveler.people_count_range,
            "Traveler selected"
        );
        self.events.publish(TripEvent::new(TRAVELER_SELECTED).with_payload(json!({
            "traveler_type": traveler.traveler_type.as_str(),
            "people_count_range": traveler.people_count_range,
        })));
        Ok(session.drafts.draft().clone())
    }

    /// Step 3: choose the travel window.
    pub async fn set_dates(&self, dates: DateRange) -> Result<TripDraft, PlannerError> {
        let mut session = self.session.lock().await;
        session.drafts.set_dates(dates)?;
        tracing::debug!(start = %dates.start, end = %dates.end, "Dates selected");
        self.events.publish(TripEvent::new(DATES_SELECTED).with_payload(json!({
            "start": dates.start,
            "end": dates.end,
        })));
        Ok(session.drafts.draft().clone())
    }

    /// Abandon the current draft. Nothing is added to the collection.
    pub async fn discard(&self) {
        let mut session = self.session.lock().await;
        let was_empty = session.drafts.draft().is_empty();
        session.drafts.discard();
        if !was_empty {
            tracing::debug!("Trip draft discarded");
            self.events.publish(TripEvent::new(DRAFT_DISCARDED));
        }
    }

    pub async fn draft(&self) -> TripDraft {
        self.session.lock().await.drafts.draft().clone()
    }

    /// Finalize the current draft, store it and append it to the collection.
    pub async fn finalize_draft(&self) -> Result<TripRecord, PlannerError> {
        let mut session = self.session.lock().await;
        let staged = session.drafts.clone();
        self.commit(&mut session, staged).await
    }

    /// Run the whole flow in one call: set the three selections, finalize,
    /// store and append.
    ///
    /// On any error the draft and the collection are left exactly as they
    /// were before the call.
    pub async fn complete_flow(
        &self,
        place: PlaceSelection,
        traveler: TravelerSelection,
        dates: DateRange,
    ) -> Result<TripRecord, PlannerError> {
        let place = self.resolve_place(place)?;
        let mut session = self.session.lock().await;
        let mut staged = session.drafts.clone();
        staged.set_place(place)?;
        staged.set_traveler(traveler)?;
        staged.set_dates(dates)?;
        self.commit(&mut session, staged).await
    }

    // -----------------------------------------------------------------------
    // Queries
    // -----------------------------------------------------------------------

    /// All finalized trips, oldest first.
    pub async fn trips(&self) -> Vec<TripRecord> {
        self.session.lock().await.trips.all()
    }

    pub async fn trip(&self, id: TripId) -> Result<TripRecord, PlannerError> {
        self.session
            .lock()
            .await
            .trips
            .get(id)
            .cloned()
            .ok_or(PlannerError::Core(CoreError::NotFound { entity: "Trip", id }))
    }

    pub async fn is_empty(&self) -> bool {
        self.session.lock().await.trips.is_empty()
    }

    pub async fn store_health(&self) -> Result<(), StoreError> {
        self.repository.health_check().await
    }

    // -----------------------------------------------------------------------
    // Internals
    // -----------------------------------------------------------------------

    fn resolve_place(&self, place: PlaceSelection) -> Result<PlaceSelection, CoreError> {
        let place = place.normalized()?;
        match &self.config.catalog {
            Some(catalog) => catalog.resolve(&place),
            None => Ok(place),
        }
    }

    /// Finalize `staged`, persist the record, then swap `staged` in as the
    /// session's draft store and append. Nothing in `session` changes unless
    /// every step succeeds.
    async fn commit(
        &self,
        session: &mut Session,
        mut staged: TripDraftStore,
    ) -> Result<TripRecord, PlannerError> {
        let record = staged.finalize()?;
        self.persist(&record)
            .await
            .map_err(PlannerError::AppendFailure)?;

        session.drafts = staged;
        session.trips.append(record.clone());

        tracing::info!(
            trip_id = record.id(),
            place = %record.place().name,
            total = session.trips.len(),
            "Trip created"
        );
        self.events.publish(
            TripEvent::new(TRIP_CREATED)
                .with_trip(record.id())
                .with_payload(json!({
                    "place": record.place().name,
                    "traveler_type": record.traveler().traveler_type.as_str(),
                    "start": record.dates().start,
                    "end": record.dates().end,
                })),
        );
        Ok(record)
    }

    async fn persist(&self, record: &TripRecord) -> Result<(), StoreError> {
        let timeout = self.config.persist_timeout;
        let mut attempt = 0;
        loop {
            let result = match tokio::time::timeout(timeout, self.repository.append(record)).await
            {
                Ok(result) => result,
                Err(_) => self.landed_after_timeout(record).await,
            };
            match result {
                Ok(()) => return Ok(()),
                Err(e) if attempt < self.config.persist_retries => {
                    attempt += 1;
                    tracing::warn!(
                        error = %e,
                        trip_id = record.id(),
                        attempt,
                        "Trip write failed, retrying"
                    );
                }
                Err(e) => {
                    tracing::error!(error = %e, trip_id = record.id(), "Trip write failed");
                    return Err(e);
                }
            }
        }
    }

    /// A timed-out append may still complete in the background. Ask the
    /// store whether the record arrived before retrying or giving up.
    async fn landed_after_timeout(&self, record: &TripRecord) -> Result<(), StoreError> {
        let timeout = self.config.persist_timeout;
        match tokio::time::timeout(timeout, self.repository.contains(record.id())).await {
            Ok(Ok(true)) => {
                tracing::info!(trip_id = record.id(), "Trip write finished after timeout");
                Ok(())
            }
            Ok(Ok(false)) | Err(_) => Err(StoreError::Timeout(timeout)),
            Ok(Err(e)) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};

    use assert_matches::assert_matches;
    use async_trait::async_trait;
    use chrono::NaiveDate;
    use travelhunt_core::draft::DraftStep;
    use travelhunt_core::trip::TravelerType;
    use travelhunt_db::{JsonFileTripRepository, MemoryTripRepository};

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn june() -> DateRange {
        DateRange::new(date(2025, 6, 1), date(2025, 6, 10)).unwrap()
    }

    fn place(name: &str) -> PlaceSelection {
        PlaceSelection::new(name).unwrap()
    }

    fn family() -> TravelerSelection {
        TravelerSelection::new(TravelerType::Family, "3 to 5 people")
    }

    fn planner_with(repository: Arc<dyn TripRepository>, config: PlannerConfig) -> TripPlanner {
        TripPlanner::new(repository, Arc::new(EventBus::default()), config)
    }

    fn memory_planner() -> TripPlanner {
        planner_with(
            Arc::new(MemoryTripRepository::new()),
            PlannerConfig::default(),
        )
    }

    /// Repository that fails the first `failures` appends.
    #[derive(Default)]
    struct FlakyRepository {
        failures: u32,
        calls: AtomicU32,
        inner: MemoryTripRepository,
    }

    #[async_trait]
    impl TripRepository for FlakyRepository {
        async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
            self.inner.load_all().await
        }

        async fn append(&self, record: &TripRecord) -> Result<(), StoreError> {
            let call = self.calls.fetch_add(1, Ordering::SeqCst);
            if call < self.failures {
                return Err(StoreError::Unavailable("disk full".to_string()));
            }
            self.inner.append(record).await
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Repository whose appends never finish in time.
    struct StalledRepository;

    #[async_trait]
    impl TripRepository for StalledRepository {
        async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
            Ok(Vec::new())
        }

        async fn append(&self, _record: &TripRecord) -> Result<(), StoreError> {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Ok(())
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    /// Repository whose appends hold a lock and finish on a background task
    /// after `delay`, whether or not the caller is still waiting.
    struct SlowWriteRepository {
        delay: Duration,
        records: Arc<Mutex<Vec<TripRecord>>>,
        appends: AtomicU32,
    }

    impl SlowWriteRepository {
        fn new(delay: Duration) -> Self {
            Self {
                delay,
                records: Arc::new(Mutex::new(Vec::new())),
                appends: AtomicU32::new(0),
            }
        }
    }

    #[async_trait]
    impl TripRepository for SlowWriteRepository {
        async fn load_all(&self) -> Result<Vec<TripRecord>, StoreError> {
            Ok(self.records.lock().await.clone())
        }

        async fn append(&self, record: &TripRecord) -> Result<(), StoreError> {
            self.appends.fetch_add(1, Ordering::SeqCst);
            let mut records = Arc::clone(&self.records).lock_owned().await;
            let delay = self.delay;
            let record = record.clone();
            tokio::spawn(async move {
                tokio::time::sleep(delay).await;
                if !records.iter().any(|r| r.id() == record.id()) {
                    records.push(record);
                }
            })
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))
        }

        async fn contains(&self, id: TripId) -> Result<bool, StoreError> {
            Ok(self.records.lock().await.iter().any(|r| r.id() == id))
        }

        async fn health_check(&self) -> Result<(), StoreError> {
            Ok(())
        }
    }

    // -- step-by-step flow --

    #[tokio::test]
    async fn step_by_step_flow_creates_trip() {
        let planner = memory_planner();
        let draft = planner.set_place(place("Shimla")).await.unwrap();
        assert_eq!(draft.next_step(), Some(DraftStep::Traveler));
        planner.set_traveler(family()).await.unwrap();
        let draft = planner.set_dates(june()).await.unwrap();
        assert!(draft.is_complete());

        let record = planner.finalize_draft().await.unwrap();

        assert_eq!(record.place().name, "Shimla");
        assert!(planner.draft().await.is_empty());
        assert_eq!(planner.trips().await, vec![record]);
    }

    #[tokio::test]
    async fn finalize_after_place_only_is_incomplete() {
        let planner = memory_planner();
        planner.set_place(place("Shimla")).await.unwrap();

        let result = planner.finalize_draft().await;

        assert_matches!(
            result,
            Err(PlannerError::Core(CoreError::IncompleteDraft {
                missing: DraftStep::Traveler
            }))
        );
        assert!(planner.is_empty().await);
        assert_eq!(planner.draft().await.place, Some(place("Shimla")));
    }

    #[tokio::test]
    async fn traveler_before_place_is_out_of_sequence() {
        let planner = memory_planner();
        assert_matches!(
            planner.set_traveler(family()).await,
            Err(PlannerError::Core(CoreError::InvalidSequence { .. }))
        );
    }

    #[tokio::test]
    async fn discard_clears_draft_without_adding_trip() {
        let planner = memory_planner();
        planner.set_place(place("Agra")).await.unwrap();
        planner.set_traveler(family()).await.unwrap();

        planner.discard().await;
        planner.discard().await;

        assert!(planner.draft().await.is_empty());
        assert!(planner.is_empty().await);
    }

    // -- complete_flow --

    #[tokio::test]
    async fn complete_flow_appends_one_trip() {
        let planner = memory_planner();

        let record = planner
            .complete_flow(place("Shimla"), family(), june())
            .await
            .unwrap();

        let trips = planner.trips().await;
        assert_eq!(trips.len(), 1);
        assert_eq!(trips[0], record);
        assert_eq!(trips[0].place().name, "Shimla");
        assert_eq!(trips[0].traveler().traveler_type, TravelerType::Family);
        assert_eq!(trips[0].dates().start, date(2025, 6, 1));
        assert_eq!(trips[0].dates().end, date(2025, 6, 10));
    }

    #[tokio::test]
    async fn complete_flow_preserves_order_and_unique_ids() {
        let planner = memory_planner();
        let first = planner
            .complete_flow(place("Agra"), family(), june())
            .await
            .unwrap();
        let second = planner
            .complete_flow(place("Mumbai"), family(), june())
            .await
            .unwrap();

        assert_ne!(first.id(), second.id());
        assert_eq!(planner.trips().await, vec![first, second]);
        assert_eq!(planner.trips().await, planner.trips().await);
    }

    #[tokio::test]
    async fn failed_complete_flow_leaves_draft_untouched() {
        let planner = memory_planner();
        planner.set_place(place("Jammu")).await.unwrap();
        let before = planner.draft().await;

        let reversed = DateRange {
            start: date(2025, 6, 10),
            end: date(2025, 6, 1),
        };
        let result = planner.complete_flow(place("Agra"), family(), reversed).await;

        assert_matches!(result, Err(PlannerError::Core(CoreError::Validation(_))));
        assert_eq!(planner.draft().await, before);
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn catalog_canonicalizes_and_rejects_places() {
        let config = PlannerConfig {
            catalog: Some(PlaceCatalog::default()),
            ..PlannerConfig::default()
        };
        let planner = planner_with(Arc::new(MemoryTripRepository::new()), config);

        let draft = planner.set_place(place("varanasi")).await.unwrap();
        assert_eq!(draft.place.unwrap().name, "Varanasi");

        assert_matches!(
            planner.set_place(place("Atlantis")).await,
            Err(PlannerError::Core(CoreError::Validation(_)))
        );
    }

    // -- persistence failures --

    #[tokio::test]
    async fn append_failure_changes_nothing() {
        let repo = Arc::new(FlakyRepository {
            failures: u32::MAX,
            ..FlakyRepository::default()
        });
        let planner = planner_with(repo.clone(), PlannerConfig::default());
        planner.set_place(place("Nagpur")).await.unwrap();
        planner.set_traveler(family()).await.unwrap();
        planner.set_dates(june()).await.unwrap();
        let before = planner.draft().await;

        let result = planner.finalize_draft().await;

        assert_matches!(result, Err(PlannerError::AppendFailure(_)));
        assert!(planner.is_empty().await);
        assert_eq!(planner.draft().await, before);
        assert_eq!(
            repo.calls.load(Ordering::SeqCst),
            DEFAULT_PERSIST_RETRIES + 1
        );
    }

    #[tokio::test]
    async fn transient_append_failure_is_retried() {
        let repo = Arc::new(FlakyRepository {
            failures: 1,
            ..FlakyRepository::default()
        });
        let planner = planner_with(repo.clone(), PlannerConfig::default());

        let record = planner
            .complete_flow(place("Agra"), family(), june())
            .await
            .unwrap();

        assert_eq!(planner.trips().await, vec![record.clone()]);
        assert_eq!(repo.load_all().await.unwrap(), vec![record]);
    }

    #[tokio::test]
    async fn stalled_store_times_out() {
        let config = PlannerConfig {
            persist_timeout: Duration::from_millis(20),
            persist_retries: 0,
            ..PlannerConfig::default()
        };
        let planner = planner_with(Arc::new(StalledRepository), config);

        let result = planner.complete_flow(place("Agra"), family(), june()).await;

        assert_matches!(
            result,
            Err(PlannerError::AppendFailure(StoreError::Timeout(_)))
        );
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn write_that_outlives_the_timeout_is_stored_once() {
        let repo = Arc::new(SlowWriteRepository::new(Duration::from_millis(60)));
        let config = PlannerConfig {
            persist_timeout: Duration::from_millis(40),
            persist_retries: 1,
            ..PlannerConfig::default()
        };
        let planner = planner_with(repo.clone(), config);

        let record = planner
            .complete_flow(place("Shimla"), family(), june())
            .await
            .unwrap();
        tokio::time::sleep(Duration::from_millis(100)).await;

        assert_eq!(repo.appends.load(Ordering::SeqCst), 1);
        assert_eq!(planner.trips().await, vec![record.clone()]);
        assert_eq!(repo.load_all().await.unwrap(), vec![record]);

        let restarted = planner_with(repo.clone(), PlannerConfig::default());
        assert_eq!(restarted.restore().await.unwrap(), 1);
    }

    // -- concurrency --

    #[tokio::test]
    async fn concurrent_completions_are_all_kept() {
        let planner = Arc::new(memory_planner());
        let mut handles = Vec::new();
        for name in ["Shimla", "Varanasi", "Agra", "Nagpur", "Mumbai", "Jammu"] {
            let planner = Arc::clone(&planner);
            handles.push(tokio::spawn(async move {
                planner
                    .complete_flow(place(name), family(), june())
                    .await
                    .unwrap()
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        let trips = planner.trips().await;
        assert_eq!(trips.len(), 6);
        let mut ids: Vec<_> = trips.iter().map(TripRecord::id).collect();
        ids.sort_unstable();
        ids.dedup();
        assert_eq!(ids.len(), 6);
    }

    // -- events --

    #[tokio::test]
    async fn trip_created_event_is_published() {
        let events = Arc::new(EventBus::default());
        let mut rx = events.subscribe();
        let planner = TripPlanner::new(
            Arc::new(MemoryTripRepository::new()),
            Arc::clone(&events),
            PlannerConfig::default(),
        );

        let record = planner
            .complete_flow(place("Shimla"), family(), june())
            .await
            .unwrap();

        let event = rx.recv().await.unwrap();
        assert_eq!(event.event_type, TRIP_CREATED);
        assert_eq!(event.trip_id, Some(record.id()));
        assert_eq!(event.payload["place"], "Shimla");
    }

    // -- restore --

    #[tokio::test]
    async fn restore_reloads_trips_and_continues_ids() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trips.json");

        let first = planner_with(
            Arc::new(JsonFileTripRepository::new(&path)),
            PlannerConfig::default(),
        );
        first
            .complete_flow(place("Shimla"), family(), june())
            .await
            .unwrap();
        let last = first
            .complete_flow(place("Agra"), family(), june())
            .await
            .unwrap();
        drop(first);

        let second = planner_with(
            Arc::new(JsonFileTripRepository::new(&path)),
            PlannerConfig::default(),
        );
        assert_eq!(second.restore().await.unwrap(), 2);
        assert_eq!(second.trips().await.len(), 2);

        let next = second
            .complete_flow(place("Jammu"), family(), june())
            .await
            .unwrap();
        assert!(next.id() > last.id());
        assert_eq!(second.trip(next.id()).await.unwrap(), next);
    }

    async fn restore_from_document(
        trips: serde_json::Value,
    ) -> (TripPlanner, Result<usize, PlannerError>) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("trips.json");
        let document = json!({ "version": 1, "trips": trips });
        tokio::fs::write(&path, document.to_string()).await.unwrap();

        let planner = planner_with(
            Arc::new(JsonFileTripRepository::new(&path)),
            PlannerConfig::default(),
        );
        let result = planner.restore().await;
        (planner, result)
    }

    fn stored_trip(id: i64, name: &str, start: &str, end: &str) -> serde_json::Value {
        json!({
            "id": id,
            "place": { "name": name },
            "traveler": { "traveler_type": "family", "people_count_range": "3 to 5 people" },
            "dates": { "start": start, "end": end },
            "created_at": "2025-05-01T10:00:00Z",
        })
    }

    #[tokio::test]
    async fn restore_rejects_duplicate_ids() {
        let (planner, result) = restore_from_document(json!([
            stored_trip(5, "Shimla", "2025-06-01", "2025-06-10"),
            stored_trip(5, "Agra", "2025-06-01", "2025-06-10"),
        ]))
        .await;

        assert_matches!(result, Err(PlannerError::Restore(StoreError::Invalid(_))));
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn restore_rejects_blank_place() {
        let (planner, result) = restore_from_document(json!([
            stored_trip(5, "", "2025-06-01", "2025-06-10"),
        ]))
        .await;

        assert_matches!(result, Err(PlannerError::Restore(StoreError::Invalid(_))));
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn restore_rejects_reversed_dates() {
        let (planner, result) = restore_from_document(json!([
            stored_trip(5, "Shimla", "2025-06-10", "2025-06-01"),
        ]))
        .await;

        assert_matches!(result, Err(PlannerError::Restore(StoreError::Invalid(_))));
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn restore_rejects_exhausted_id_space() {
        let (planner, result) = restore_from_document(json!([
            stored_trip(i64::MAX, "Shimla", "2025-06-01", "2025-06-10"),
        ]))
        .await;

        assert_matches!(
            result,
            Err(PlannerError::Restore(StoreError::Invalid(CoreError::Internal(_))))
        );
        assert!(planner.is_empty().await);
    }

    #[tokio::test]
    async fn unknown_trip_is_not_found() {
        let planner = memory_planner();
        assert_matches!(
            planner.trip(42).await,
            Err(PlannerError::Core(CoreError::NotFound { id: 42, .. }))
        );
    }
}
