use axum::extract::rejection::{JsonRejection, PathRejection};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use travelhunt_core::error::CoreError;
use travelhunt_db::StoreError;
use travelhunt_pipeline::PlannerError;

/// Application-level error type for HTTP handlers.
///
/// Implements [`IntoResponse`] to produce `{ "error", "code" }` JSON bodies.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `travelhunt_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// The trip could not be stored; nothing was changed.
    #[error("Failed to store trip: {0}")]
    AppendFailure(#[source] StoreError),

    /// The request body or path could not be parsed.
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<PlannerError> for AppError {
    fn from(err: PlannerError) -> Self {
        match err {
            PlannerError::Core(core) => AppError::Core(core),
            PlannerError::AppendFailure(store) => AppError::AppendFailure(store),
            PlannerError::Restore(store) => AppError::InternalError(store.to_string()),
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(errors: validator::ValidationErrors) -> Self {
        AppError::Core(CoreError::from(errors))
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => match core {
                CoreError::IncompleteDraft { .. } => (
                    StatusCode::UNPROCESSABLE_ENTITY,
                    "INCOMPLETE_DRAFT",
                    core.to_string(),
                ),
                CoreError::InvalidSequence { .. } => {
                    (StatusCode::CONFLICT, "INVALID_SEQUENCE", core.to_string())
                }
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} with id {id} not found"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            AppError::AppendFailure(err) => {
                tracing::error!(error = %err, "Trip store write failed");
                (
                    StatusCode::SERVICE_UNAVAILABLE,
                    "APPEND_FAILURE",
                    "The trip could not be saved. Please try again.".to_string(),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
