//! Trip draft accumulation across the trip-creation steps.
//!
//! The flow visits three steps in order: place, traveler, dates. Each step
//! writes one selection into the [`TripDraft`]; [`TripDraftStore::finalize`]
//! turns a complete draft into an immutable [`TripRecord`].

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::id::TripIdGenerator;
use crate::trip::{DateRange, PlaceSelection, TravelerSelection, TripRecord};

// ---------------------------------------------------------------------------
// Steps
// ---------------------------------------------------------------------------

/// The three steps of the trip-creation flow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DraftStep {
    Place,
    Traveler,
    Dates,
}

impl DraftStep {
    /// Human-readable label for the step.
    pub fn label(self) -> &'static str {
        match self {
            Self::Place => "a place",
            Self::Traveler => "a traveler type",
            Self::Dates => "travel dates",
        }
    }
}

// ---------------------------------------------------------------------------
// Draft
// ---------------------------------------------------------------------------

/// The in-progress trip. Any subset of the selections may be present.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripDraft {
    pub place: Option<PlaceSelection>,
    pub traveler: Option<TravelerSelection>,
    pub dates: Option<DateRange>,
}

impl TripDraft {
    /// First step whose selection is still missing, or `None` when complete.
    pub fn next_step(&self) -> Option<DraftStep> {
        if self.place.is_none() {
            Some(DraftStep::Place)
        } else if self.traveler.is_none() {
            Some(DraftStep::Traveler)
        } else if self.dates.is_none() {
            Some(DraftStep::Dates)
        } else {
            None
        }
    }

    pub fn is_complete(&self) -> bool {
        self.next_step().is_none()
    }

    pub fn is_empty(&self) -> bool {
        self.place.is_none() && self.traveler.is_none() && self.dates.is_none()
    }
}

/// Behavior switches for a draft store.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DraftPolicy {
    /// Clear traveler and dates whenever the place changes. Off by default,
    /// in which case a new place keeps the selections made for the old one.
    pub reset_downstream_on_place_change: bool,
}

// ---------------------------------------------------------------------------
// Store
// ---------------------------------------------------------------------------

/// Holds one draft and finalizes it into a [`TripRecord`].
///
/// Setters enforce step order and leave the draft untouched on error.
#[derive(Debug, Clone, Default)]
pub struct TripDraftStore {
    draft: TripDraft,
    ids: TripIdGenerator,
    policy: DraftPolicy,
}

impl TripDraftStore {
    pub fn new(ids: TripIdGenerator, policy: DraftPolicy) -> Self {
        Self {
            draft: TripDraft::default(),
            ids,
            policy,
        }
    }

    pub fn draft(&self) -> &TripDraft {
        &self.draft
    }

    pub fn policy(&self) -> DraftPolicy {
        self.policy
    }

    /// Choose the destination. Always allowed.
    pub fn set_place(&mut self, place: PlaceSelection) -> Result<(), CoreError> {
        let place = place.normalized()?;
        let changed = self.draft.place.as_ref() != Some(&place);
        if changed && self.policy.reset_downstream_on_place_change {
            self.draft.traveler = None;
            self.draft.dates = None;
        }
        self.draft.place = Some(place);
        Ok(())
    }

    /// Choose the party. Requires a place.
    pub fn set_traveler(&mut self, traveler: TravelerSelection) -> Result<(), CoreError> {
        if self.draft.place.is_none() {
            return Err(CoreError::InvalidSequence {
                attempted: DraftStep::Traveler,
                required: DraftStep::Place,
            });
        }
        traveler.check()?;
        self.draft.traveler = Some(traveler);
        Ok(())
    }

    /// Choose the travel window. Requires a place and a traveler.
    pub fn set_dates(&mut self, dates: DateRange) -> Result<(), CoreError> {
        if let Some(required) = self.draft.next_step().filter(|s| *s != DraftStep::Dates) {
            return Err(CoreError::InvalidSequence {
                attempted: DraftStep::Dates,
                required,
            });
        }
        dates.check()?;
        self.draft.dates = Some(dates);
        Ok(())
    }

    /// Turn the complete draft into a record with a fresh id and clear it.
    ///
    /// Fails with [`CoreError::IncompleteDraft`] naming the first missing
    /// step; the draft is left as it was in that case.
    pub fn finalize(&mut self) -> Result<TripRecord, CoreError> {
        if let Some(missing) = self.draft.next_step() {
            return Err(CoreError::IncompleteDraft { missing });
        }
        let TripDraft {
            place: Some(place),
            traveler: Some(traveler),
            dates: Some(dates),
        } = std::mem::take(&mut self.draft)
        else {
            return Err(CoreError::Internal(
                "complete draft is missing a selection".to_string(),
            ));
        };
        Ok(TripRecord::new(self.ids.next_id(), place, traveler, dates))
    }

    /// Drop whatever has been chosen so far. Idempotent.
    pub fn discard(&mut self) {
        self.draft = TripDraft::default();
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
