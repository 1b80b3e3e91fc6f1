use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Error type returned by service layer functions.
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Client sent a request the domain rules reject.
    #[error("{0}")]
    Validation(String),
    /// Requested resource does not exist — callers treat this as "absent",
    /// not a fault.
    #[error("{0}")]
    NotFound(&'static str),
    /// Missing or bad credentials.
    #[error("{0}")]
    Unauthorized(&'static str),
    /// Authenticated, but the role does not allow the operation.
    #[error("Access denied")]
    Forbidden,
    /// Storage/connectivity fault; surfaced generically, no automatic retry.
    #[error(transparent)]
    Database(#[from] sqlx::Error),
    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

pub type ServiceResult<T> = Result<T, ServiceError>;

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServiceError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ServiceError::NotFound(msg) => (StatusCode::NOT_FOUND, (*msg).to_string()),
            ServiceError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, (*msg).to_string()),
            ServiceError::Forbidden => (StatusCode::FORBIDDEN, "Access denied".to_string()),
            ServiceError::Database(e) => {
                tracing::error!(error = %e, "database error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ServiceError::Internal(e) => {
                tracing::error!(error = %e, "internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };
        (status, Json(json!({ "error": message }))).into_response()
    }
}
