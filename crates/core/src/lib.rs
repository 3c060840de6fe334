//! Domain core for TravelHunt trip planning.
//!
//! - [`draft`] accumulates the place, traveler and date selections of one
//!   trip-creation flow and finalizes them into a [`trip::TripRecord`].
//! - [`collection`] keeps finalized trips in creation order.
//! - [`catalog`] holds the places and traveler options the flow offers.

pub mod catalog;
pub mod collection;
pub mod draft;
pub mod error;
pub mod id;
pub mod trip;
pub mod types;
