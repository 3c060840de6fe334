//! Trip-planning domain events.
//!
//! - [`EventBus`]: in-process publish/subscribe hub backed by
//!   `tokio::sync::broadcast`.
//! - [`TripEvent`]: the event envelope published by the planner.
//! - [`ActivityLog`]: background subscriber that writes every event to
//!   the structured log.

pub mod activity;
pub mod bus;

pub use activity::ActivityLog;
pub use bus::{EventBus, TripEvent};
