//! Append-only, ordered collection of finalized trips.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::trip::TripRecord;
use crate::types::TripId;

/// Finalized trips in creation order, oldest first.
///
/// Only [`TripRecord`]s can be appended, and records are never edited or
/// removed once added.
#[derive(Debug, Clone, Default)]
pub struct TripCollection {
    records: Vec<TripRecord>,
}

impl TripCollection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a collection from previously stored records, keeping their order.
    ///
    /// Every record is re-checked and ids must be unique.
    pub fn from_records(records: Vec<TripRecord>) -> Result<Self, CoreError> {
        let mut seen = HashSet::with_capacity(records.len());
        for record in &records {
            record.check()?;
            if !seen.insert(record.id()) {
                return Err(CoreError::Validation(format!(
                    "Duplicate trip id {}",
                    record.id()
                )));
            }
        }
        Ok(Self { records })
    }

    pub fn append(&mut self, record: TripRecord) {
        self.records.push(record);
    }

    /// Owned snapshot of every record. Later appends do not show up in it.
    pub fn all(&self) -> Vec<TripRecord> {
        self.records.clone()
    }

    pub fn get(&self, id: TripId) -> Option<&TripRecord> {
        self.records.iter().find(|r| r.id() == id)
    }

    /// Highest id held, if any.
    pub fn max_id(&self) -> Option<TripId> {
        self.records.iter().map(TripRecord::id).max()
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draft::TripDraftStore;
    use crate::trip::{DateRange, PlaceSelection, TravelerSelection, TravelerType};
    use chrono::NaiveDate;

    fn record(store: &mut TripDraftStore, name: &str) -> TripRecord {
        let start = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let end = NaiveDate::from_ymd_opt(2025, 6, 3).unwrap();
        store.set_place(PlaceSelection::new(name).unwrap()).unwrap();
        store
            .set_traveler(TravelerSelection::for_type(TravelerType::Couple))
            .unwrap();
        store.set_dates(DateRange::new(start, end).unwrap()).unwrap();
        store.finalize().unwrap()
    }

    #[test]
    fn new_collection_is_empty() {
        let trips = TripCollection::new();
        assert!(trips.is_empty());
        assert_eq!(trips.len(), 0);
        assert!(trips.all().is_empty());
        assert_eq!(trips.max_id(), None);
    }

    #[test]
    fn append_preserves_order() {
        let mut store = TripDraftStore::default();
        let mut trips = TripCollection::new();
        let first = record(&mut store, "Agra");
        let second = record(&mut store, "Mumbai");

        trips.append(first.clone());
        trips.append(second.clone());

        assert_eq!(trips.len(), 2);
        assert_eq!(trips.all(), vec![first, second]);
    }

    #[test]
    fn snapshot_is_not_affected_by_later_appends() {
        let mut store = TripDraftStore::default();
        let mut trips = TripCollection::new();
        trips.append(record(&mut store, "Agra"));

        let snapshot = trips.all();
        trips.append(record(&mut store, "Shimla"));

        assert_eq!(snapshot.len(), 1);
        assert_eq!(trips.len(), 2);
    }

    #[test]
    fn repeated_reads_are_equal() {
        let mut store = TripDraftStore::default();
        let mut trips = TripCollection::new();
        trips.append(record(&mut store, "Nagpur"));
        assert_eq!(trips.all(), trips.all());
    }

    #[test]
    fn from_records_keeps_stored_order() {
        let mut store = TripDraftStore::default();
        let a = record(&mut store, "Agra");
        let b = record(&mut store, "Jammu");

        let trips = TripCollection::from_records(vec![a.clone(), b.clone()]).unwrap();
        assert_eq!(trips.all(), vec![a, b]);
    }

    #[test]
    fn from_records_rejects_duplicate_ids() {
        let mut store = TripDraftStore::default();
        let a = record(&mut store, "Agra");

        let result = TripCollection::from_records(vec![a.clone(), a]);
        let msg = result.unwrap_err().to_string();
        assert!(msg.contains("Duplicate trip id 1"));
    }

    #[test]
    fn get_finds_by_id() {
        let mut store = TripDraftStore::default();
        let mut trips = TripCollection::new();
        let a = record(&mut store, "Agra");
        let b = record(&mut store, "Jammu");
        trips.append(a);
        trips.append(b.clone());

        assert_eq!(trips.get(b.id()), Some(&b));
        assert!(trips.get(99).is_none());
        assert_eq!(trips.max_id(), Some(b.id()));
    }
}
