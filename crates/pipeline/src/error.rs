use travelhunt_core::error::CoreError;
use travelhunt_db::StoreError;

#[derive(Debug, thiserror::Error)]
pub enum PlannerError {
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The trip could not be written to the repository. Neither the draft
    /// nor the collection were changed.
    #[error("Failed to store trip: {0}")]
    AppendFailure(#[source] StoreError),

    #[error("Failed to restore stored trips: {0}")]
    Restore(#[source] StoreError),
}
