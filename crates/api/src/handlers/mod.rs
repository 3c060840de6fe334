pub mod catalog;
pub mod trips;
