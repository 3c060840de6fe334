use crate::draft::DraftStep;
use crate::types::TripId;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum CoreError {
    #[error("Trip draft is incomplete: {} has not been chosen yet", .missing.label())]
    IncompleteDraft { missing: DraftStep },

    #[error(
        "Cannot choose {} before {} has been chosen",
        .attempted.label(),
        .required.label()
    )]
    InvalidSequence {
        attempted: DraftStep,
        required: DraftStep,
    },

    #[error("Entity not found: {entity} with id {id}")]
    NotFound { entity: &'static str, id: TripId },

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<validator::ValidationErrors> for CoreError {
    fn from(errors: validator::ValidationErrors) -> Self {
        CoreError::Validation(errors.to_string())
    }
}
