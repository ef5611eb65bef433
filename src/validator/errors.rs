//! Validation error types
//!
//! Every variant except `StoreUnavailable` is a caller-input error: it is
//! reported with a short and a long message and never retried.

use thiserror::Error;

use crate::storage::StoreError;

/// Result type for validation
pub type ValidationResult<T> = Result<T, ValidationError>;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("'{raw}' is not a valid client id: {reason}")]
    InvalidId { raw: String, reason: &'static str },

    #[error("'{0}' is not a recognized status; expected one of backlog, in-progress, complete")]
    InvalidLane(String),

    #[error("{raw} is not a valid priority: {reason}")]
    InvalidPriority { raw: String, reason: &'static str },

    /// The existence check could not read the store
    #[error("could not check client id: {0}")]
    StoreUnavailable(#[source] StoreError),
}

impl ValidationError {
    /// Machine-readable error code
    pub fn code(&self) -> &'static str {
        match self {
            ValidationError::InvalidId { .. } => "INVALID_ID",
            ValidationError::InvalidLane(_) => "INVALID_LANE",
            ValidationError::InvalidPriority { .. } => "INVALID_PRIORITY",
            ValidationError::StoreUnavailable(_) => "STORE_UNAVAILABLE",
        }
    }

    /// One-phrase summary suitable for a UI toast
    pub fn short_message(&self) -> &'static str {
        match self {
            ValidationError::InvalidId { .. } => "Invalid id provided.",
            ValidationError::InvalidLane(_) => "Invalid status provided.",
            ValidationError::InvalidPriority { .. } => "Invalid priority provided.",
            ValidationError::StoreUnavailable(_) => "Store unavailable.",
        }
    }

    /// Whether the caller sent bad input (as opposed to an infrastructure fault)
    pub fn is_client_error(&self) -> bool {
        !matches!(self, ValidationError::StoreUnavailable(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_input_errors_are_client_errors() {
        let err = ValidationError::InvalidLane("done".to_string());
        assert!(err.is_client_error());
        assert_eq!(err.code(), "INVALID_LANE");
        assert!(err.to_string().contains("'done'"));

        let err = ValidationError::StoreUnavailable(StoreError::unavailable());
        assert!(!err.is_client_error());
    }

    #[test]
    fn test_short_and_long_messages_differ() {
        let err = ValidationError::InvalidPriority {
            raw: "0".to_string(),
            reason: "must be at least 1",
        };
        assert_eq!(err.short_message(), "Invalid priority provided.");
        assert_eq!(err.to_string(), "0 is not a valid priority: must be at least 1");
    }
}
