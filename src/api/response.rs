//! API response types
//!
//! HTTP errors use a flat body; the CLI wraps every result in a
//! `status` envelope.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::errors::ApiError;

/// Body of every HTTP error response
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    /// HTTP status
    pub code: u16,
    /// Short, user-facing summary
    pub error: String,
    /// Full explanation
    pub message: String,
}

impl From<&ApiError> for ErrorBody {
    fn from(err: &ApiError) -> Self {
        Self {
            code: err.status_code().as_u16(),
            error: err.short_message().to_string(),
            message: err.to_string(),
        }
    }
}

/// CLI success envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuccessResponse {
    pub status: String,
    pub data: Value,
}

impl SuccessResponse {
    pub fn new(data: Value) -> Self {
        Self {
            status: "ok".to_string(),
            data,
        }
    }
}

/// CLI error envelope
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub status: String,
    pub code: String,
    pub message: String,
}

impl ErrorResponse {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            status: "error".to_string(),
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn from_error(err: &ApiError) -> Self {
        Self::new(err.code(), err.to_string())
    }
}
