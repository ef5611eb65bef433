//! # Board API errors
//!
//! Errors from the validator, the reorder engine and the store pass through
//! unchanged; this layer only decides how each one is reported.

use axum::http::StatusCode;
use thiserror::Error;

use crate::reorder::ReorderError;
use crate::storage::StoreError;
use crate::validator::ValidationError;

/// Result type for board API operations
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error)]
pub enum ApiError {
    // ==================
    // Client Errors (4xx)
    // ==================
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Move body was not valid JSON, or not a JSON object
    #[error("request body must be a JSON object: {0}")]
    InvalidBody(String),

    // ==================
    // Server Errors (5xx)
    // ==================
    #[error(transparent)]
    Reorder(#[from] ReorderError),

    #[error("board store failed: {0}")]
    Store(#[from] StoreError),
}

impl ApiError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => e.code(),
            ApiError::InvalidBody(_) => "INVALID_BODY",
            ApiError::Reorder(e) => e.code(),
            ApiError::Store(_) => "STORE_FAILED",
        }
    }

    /// One-phrase summary; the long form is the `Display` output
    pub fn short_message(&self) -> &'static str {
        match self {
            ApiError::Validation(e) => e.short_message(),
            ApiError::InvalidBody(_) => "Invalid request body.",
            ApiError::Reorder(ReorderError::UnknownRecord(_)) => "Invalid id provided.",
            ApiError::Reorder(_) | ApiError::Store(_) => "Internal server error.",
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(e) if e.is_client_error() => StatusCode::BAD_REQUEST,
            ApiError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            // Vanished between validation and the move: same answer as a bad id
            ApiError::Reorder(ReorderError::UnknownRecord(_)) => StatusCode::BAD_REQUEST,

            ApiError::Validation(_) | ApiError::Reorder(_) | ApiError::Store(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Lane, RecordId};
    use std::io;

    #[test]
    fn test_status_codes() {
        let err = ApiError::from(ValidationError::InvalidLane("done".to_string()));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.code(), "INVALID_LANE");

        let err = ApiError::InvalidBody("expected an object".to_string());
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);

        let err = ApiError::from(ReorderError::UnknownRecord(RecordId::new(9)));
        assert_eq!(err.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(err.short_message(), "Invalid id provided.");

        let err = ApiError::from(ReorderError::StoreCommitFailed(StoreError::commit_failed(
            "disk full",
            io::Error::new(io::ErrorKind::Other, "disk full"),
        )));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(err.code(), "STORE_COMMIT_FAILED");
    }

    #[test]
    fn test_validation_passes_through_unchanged() {
        let inner = ValidationError::InvalidLane(Lane::Backlog.to_string().to_uppercase());
        let long = inner.to_string();
        let err = ApiError::from(inner);
        assert_eq!(err.to_string(), long);
    }

    #[test]
    fn test_store_outage_during_validation_is_a_server_error() {
        let err = ApiError::from(ValidationError::StoreUnavailable(StoreError::unavailable()));
        assert_eq!(err.status_code(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
