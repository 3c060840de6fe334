//! Trip-creation orchestration.
//!
//! [`TripPlanner`] owns one planning session (a draft store plus the trip
//! collection) and is the single entry point a flow controller calls at
//! each step boundary. Finalizing, persisting and appending a trip happen
//! under one lock, so concurrent completions serialize.

pub mod error;
pub mod planner;

pub use error::PlannerError;
pub use planner::{PlannerConfig, TripPlanner};
