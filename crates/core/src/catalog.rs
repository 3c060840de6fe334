//! Built-in place catalog and traveler options offered by the flow.

use serde::Serialize;

use crate::error::CoreError;
use crate::trip::{PlaceSelection, TravelerType};

/// A destination the search step can offer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Place {
    pub id: String,
    pub name: String,
}

/// Destinations offered when no custom catalog is configured.
pub const DEFAULT_PLACES: &[(&str, &str)] = &[
    ("1", "Shimla"),
    ("2", "Varanasi"),
    ("3", "Agra"),
    ("4", "Nagpur"),
    ("5", "Mumbai"),
    ("6", "Jammu"),
];

/// Searchable list of known destinations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaceCatalog {
    places: Vec<Place>,
}

impl PlaceCatalog {
    pub fn new(places: Vec<Place>) -> Self {
        Self { places }
    }

    pub fn places(&self) -> &[Place] {
        &self.places
    }

    /// Places whose name contains `query`, ignoring case. A blank query
    /// matches everything.
    pub fn search(&self, query: &str) -> Vec<&Place> {
        let needle = query.trim().to_lowercase();
        self.places
            .iter()
            .filter(|p| p.name.to_lowercase().contains(&needle))
            .collect()
    }

    /// Exact, case-insensitive lookup by name.
    pub fn find(&self, name: &str) -> Option<&Place> {
        let name = name.trim();
        self.places.iter().find(|p| p.name.eq_ignore_ascii_case(name))
    }

    /// Map a free-text selection onto the catalog's spelling of the place.
    pub fn resolve(&self, place: &PlaceSelection) -> Result<PlaceSelection, CoreError> {
        self.find(&place.name)
            .map(|p| PlaceSelection {
                name: p.name.clone(),
            })
            .ok_or_else(|| {
                CoreError::Validation(format!(
                    "Unknown place '{}'. Choose one of: {}",
                    place.name,
                    self.places
                        .iter()
                        .map(|p| p.name.as_str())
                        .collect::<Vec<_>>()
                        .join(", ")
                ))
            })
    }
}

impl Default for PlaceCatalog {
    fn default() -> Self {
        Self::new(
            DEFAULT_PLACES
                .iter()
                .map(|(id, name)| Place {
                    id: (*id).to_string(),
                    name: (*name).to_string(),
                })
                .collect(),
        )
    }
}

/// One entry of the traveler selection list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TravelerOption {
    pub traveler_type: TravelerType,
    pub title: &'static str,
    pub description: &'static str,
    pub people: &'static str,
}

/// Traveler options in display order.
pub fn traveler_options() -> Vec<TravelerOption> {
    TravelerType::ALL
        .iter()
        .map(|&t| TravelerOption {
            traveler_type: t,
            title: t.label(),
            description: t.description(),
            people: t.default_people_range(),
        })
        .collect()
}
