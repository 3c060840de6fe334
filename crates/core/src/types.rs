/// Trip identifiers are allocated from a monotonic counter starting at 1.
pub type TripId = i64;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
