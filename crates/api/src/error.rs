use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use formreturn_core::error::CoreError;
use formreturn_db::store::StoreError;
use serde_json::json;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and [`StoreError`] for persistence
/// failures, and adds HTTP-specific variants. Implements [`IntoResponse`] to
/// produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `formreturn_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A record store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Writing or removing an uploaded file failed.
    #[error("File storage error: {0}")]
    FileStorage(#[from] std::io::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// The request body exceeded the configured upload limit.
    #[error("Payload too large: {0}")]
    PayloadTooLarge(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
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
                    internal()
                }
            },

            // --- Store errors ---
            AppError::Store(StoreError::DuplicatePhone(phone)) => (
                StatusCode::CONFLICT,
                "CONFLICT",
                format!("Phone number {phone} is already in use"),
            ),
            // Phone uniqueness is mapped by the store; anything left is a 500.
            AppError::Store(StoreError::Database(err)) => {
                tracing::error!(error = %err, "Database error");
                internal()
            }

            // --- Filesystem errors ---
            AppError::FileStorage(err) => {
                tracing::error!(error = %err, "File storage error");
                internal()
            }

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::PayloadTooLarge(msg) => {
                (StatusCode::PAYLOAD_TOO_LARGE, "PAYLOAD_TOO_LARGE", msg.clone())
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

fn internal() -> (StatusCode, &'static str, String) {
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}
