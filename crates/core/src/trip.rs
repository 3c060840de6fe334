//! Trip data model: the three step selections and the finalized record.
//!
//! A [`TripRecord`] can only be built by
//! [`TripDraftStore::finalize`](crate::draft::TripDraftStore::finalize), so
//! every record that reaches a collection carries a place, a traveler and a
//! validated date range.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::error::CoreError;
use crate::id::FIRST_TRIP_ID;
use crate::types::{Timestamp, TripId};

/// Maximum length of a place name.
pub const MAX_PLACE_NAME_LEN: u64 = 120;

/// Date format used by the trip listing (`Sun Jun 01 2025`).
pub const SUMMARY_DATE_FORMAT: &str = "%a %b %d %Y";

// ---------------------------------------------------------------------------
// Place
// ---------------------------------------------------------------------------

/// The chosen destination.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct PlaceSelection {
    #[validate(length(min = 1, max = MAX_PLACE_NAME_LEN))]
    pub name: String,
}

impl PlaceSelection {
    /// Build a place selection from free text, trimming surrounding whitespace.
    pub fn new(name: impl Into<String>) -> Result<Self, CoreError> {
        Self {
            name: name.into(),
        }
        .normalized()
    }

    /// Trim the name and check it is non-empty and within bounds.
    pub fn normalized(self) -> Result<Self, CoreError> {
        let place = Self {
            name: self.name.trim().to_string(),
        };
        if place.name.is_empty() {
            return Err(CoreError::Validation(
                "Place name must not be empty".to_string(),
            ));
        }
        place.validate()?;
        Ok(place)
    }
}

// ---------------------------------------------------------------------------
// Traveler
// ---------------------------------------------------------------------------

/// Party composition for a trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TravelerType {
    Solo,
    Couple,
    Family,
    Friends,
}

impl TravelerType {
    pub const ALL: [TravelerType; 4] = [Self::Solo, Self::Couple, Self::Family, Self::Friends];

    /// Parse a traveler type from its serialized name.
    pub fn from_str_db(s: &str) -> Result<Self, CoreError> {
        match s {
            "solo" => Ok(Self::Solo),
            "couple" => Ok(Self::Couple),
            "family" => Ok(Self::Family),
            "friends" => Ok(Self::Friends),
            _ => Err(CoreError::Validation(format!(
                "Invalid traveler type '{s}'. Must be one of: solo, couple, family, friends"
            ))),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Solo => "solo",
            Self::Couple => "couple",
            Self::Family => "family",
            Self::Friends => "friends",
        }
    }

    /// Title shown on the traveler option card.
    pub fn label(self) -> &'static str {
        match self {
            Self::Solo => "Just Me",
            Self::Couple => "A Couple",
            Self::Family => "Family",
            Self::Friends => "Friends",
        }
    }

    pub fn description(self) -> &'static str {
        match self {
            Self::Solo => "A sole traveler in exploration",
            Self::Couple => "Two travelers in tandem",
            Self::Family => "A group of fun-loving adventurers",
            Self::Friends => "A bunch of thrill-seekers",
        }
    }

    /// Default party size text for this traveler type.
    pub fn default_people_range(self) -> &'static str {
        match self {
            Self::Solo => "1 person",
            Self::Couple => "2 people",
            Self::Family => "3 to 5 people",
            Self::Friends => "4 to 10 people",
        }
    }
}

/// Who is travelling, and how many of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Validate)]
pub struct TravelerSelection {
    pub traveler_type: TravelerType,
    #[validate(length(min = 1, max = 60))]
    pub people_count_range: String,
}

impl TravelerSelection {
    pub fn new(traveler_type: TravelerType, people_count_range: impl Into<String>) -> Self {
        Self {
            traveler_type,
            people_count_range: people_count_range.into(),
        }
    }

    /// Selection using the catalog's default party size for `traveler_type`.
    pub fn for_type(traveler_type: TravelerType) -> Self {
        Self::new(traveler_type, traveler_type.default_people_range())
    }

    pub fn check(&self) -> Result<(), CoreError> {
        if self.people_count_range.trim().is_empty() {
            return Err(CoreError::Validation(
                "People count range must not be empty".to_string(),
            ));
        }
        self.validate()?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Dates
// ---------------------------------------------------------------------------

/// Inclusive travel window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    /// Build a date range, rejecting `start > end`.
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self, CoreError> {
        let range = Self { start, end };
        range.check()?;
        Ok(range)
    }

    pub fn check(&self) -> Result<(), CoreError> {
        if self.start > self.end {
            return Err(CoreError::Validation(format!(
                "Trip start date {} is after end date {}",
                self.start, self.end
            )));
        }
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Finalized record
// ---------------------------------------------------------------------------

/// A fully specified trip. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TripRecord {
    id: TripId,
    place: PlaceSelection,
    traveler: TravelerSelection,
    dates: DateRange,
    created_at: Timestamp,
}

impl TripRecord {
    pub(crate) fn new(
        id: TripId,
        place: PlaceSelection,
        traveler: TravelerSelection,
        dates: DateRange,
    ) -> Self {
        Self {
            id,
            place,
            traveler,
            dates,
            created_at: chrono::Utc::now(),
        }
    }

    pub fn id(&self) -> TripId {
        self.id
    }

    pub fn place(&self) -> &PlaceSelection {
        &self.place
    }

    pub fn traveler(&self) -> &TravelerSelection {
        &self.traveler
    }

    pub fn dates(&self) -> &DateRange {
        &self.dates
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    /// Re-check a record that was read back from storage.
    ///
    /// Stored records bypass [`TripDraftStore::finalize`](crate::draft::TripDraftStore::finalize),
    /// so the id, place, traveler and dates are validated again here.
    pub fn check(&self) -> Result<(), CoreError> {
        if self.id < FIRST_TRIP_ID {
            return Err(CoreError::Validation(format!(
                "Trip id {} is out of range",
                self.id
            )));
        }
        let place = self.place.clone().normalized()?;
        if place != self.place {
            return Err(CoreError::Validation(format!(
                "Trip {} has an unnormalized place name",
                self.id
            )));
        }
        self.traveler.check()?;
        self.dates.check()
    }

    /// Projection used by the trip listing card.
    pub fn summary(&self) -> TripSummary {
        TripSummary {
            id: self.id,
            title: self.place.name.clone(),
            traveler: format!(
                "{} - {}",
                self.traveler.traveler_type.label(),
                self.traveler.people_count_range
            ),
            dates: format!(
                "{} to {}",
                self.dates.start.format(SUMMARY_DATE_FORMAT),
                self.dates.end.format(SUMMARY_DATE_FORMAT)
            ),
        }
    }
}

/// Display-ready text for one trip card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TripSummary {
    pub id: TripId,
    pub title: String,
    pub traveler: String,
    pub dates: String,
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
