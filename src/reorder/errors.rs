//! Reorder engine errors
//!
//! Malformed input never reaches the engine, so every variant here is
//! either an infrastructure fault or a record that vanished between
//! validation and the move.

use thiserror::Error;

use crate::board::RecordId;
use crate::storage::StoreError;

pub type ReorderResult<T> = Result<T, ReorderError>;

#[derive(Debug, Error)]
pub enum ReorderError {
    /// The unit of work could not be applied. Nothing was written.
    #[error("move could not be committed: {0}")]
    StoreCommitFailed(#[source] StoreError),

    /// The lane snapshot needed to plan the move could not be read
    #[error("board state could not be read: {0}")]
    StoreReadFailed(#[source] StoreError),

    #[error("client {0} does not exist")]
    UnknownRecord(RecordId),
}

impl ReorderError {
    pub fn code(&self) -> &'static str {
        match self {
            ReorderError::StoreCommitFailed(_) => "STORE_COMMIT_FAILED",
            ReorderError::StoreReadFailed(_) => "STORE_READ_FAILED",
            ReorderError::UnknownRecord(_) => "INVALID_ID",
        }
    }
}
