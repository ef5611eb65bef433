//! Record store error types
//!
//! Error codes:
//! - LANEBOARD_STORE_IO_ERROR (ERROR severity)
//! - LANEBOARD_STORE_COMMIT_FAILED (ERROR severity)
//! - LANEBOARD_STORE_UNKNOWN_RECORD (ERROR severity)
//! - LANEBOARD_STORE_UNAVAILABLE (ERROR severity)
//! - LANEBOARD_STORE_LOCKED (ERROR severity)
//! - LANEBOARD_STORE_CORRUPTION (FATAL severity)

use std::fmt;
use std::io;
use std::path::Path;

use crate::board::RecordId;

/// Severity levels for store errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Operation fails, server continues
    Error,
    /// The board cannot be served
    Fatal,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Severity::Error => write!(f, "ERROR"),
            Severity::Fatal => write!(f, "FATAL"),
        }
    }
}

/// Store-specific error codes
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreErrorCode {
    /// Disk I/O failure outside of a commit
    IoError,
    /// A unit of work could not be made durable
    CommitFailed,
    /// A mutation referenced a record the store does not hold
    UnknownRecord,
    /// Table lock poisoned by a panicking writer
    Unavailable,
    /// Another process holds the data directory
    Locked,
    /// Journal checksum or structure failure
    Corruption,
}

impl StoreErrorCode {
    /// Returns the string code
    pub fn code(&self) -> &'static str {
        match self {
            StoreErrorCode::IoError => "LANEBOARD_STORE_IO_ERROR",
            StoreErrorCode::CommitFailed => "LANEBOARD_STORE_COMMIT_FAILED",
            StoreErrorCode::UnknownRecord => "LANEBOARD_STORE_UNKNOWN_RECORD",
            StoreErrorCode::Unavailable => "LANEBOARD_STORE_UNAVAILABLE",
            StoreErrorCode::Locked => "LANEBOARD_STORE_LOCKED",
            StoreErrorCode::Corruption => "LANEBOARD_STORE_CORRUPTION",
        }
    }

    /// Returns the severity level for this error
    pub fn severity(&self) -> Severity {
        match self {
            StoreErrorCode::Corruption => Severity::Fatal,
            _ => Severity::Error,
        }
    }
}

impl fmt::Display for StoreErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Store error with code, context and optional I/O source
#[derive(Debug)]
pub struct StoreError {
    code: StoreErrorCode,
    message: String,
    details: Option<String>,
    source: Option<io::Error>,
}

impl StoreError {
    fn new(code: StoreErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
            source: None,
        }
    }

    /// Disk I/O failure (open, replay, sync)
    pub fn io_error(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::IoError, message)
        }
    }

    /// A commit's journal frame could not be written or synced
    pub fn commit_failed(message: impl Into<String>, source: io::Error) -> Self {
        Self {
            source: Some(source),
            ..Self::new(StoreErrorCode::CommitFailed, message)
        }
    }

    /// A commit was refused before any write happened
    pub fn commit_refused(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::CommitFailed, message)
    }

    /// A mutation targeted a record that does not exist
    pub fn unknown_record(id: RecordId) -> Self {
        Self {
            details: Some(format!("record_id: {}", id)),
            ..Self::new(StoreErrorCode::UnknownRecord, "no such record")
        }
    }

    /// The table lock was poisoned
    pub fn unavailable() -> Self {
        Self::new(
            StoreErrorCode::Unavailable,
            "record table lock poisoned by an earlier panic",
        )
    }

    /// The data directory lock file already exists
    pub fn locked(lock_path: &Path) -> Self {
        Self {
            details: Some(format!("lock_file: {}", lock_path.display())),
            ..Self::new(
                StoreErrorCode::Locked,
                "data directory is in use by another laneboard process; \
                 remove the lock file if that process is gone",
            )
        }
    }

    /// Journal corruption (FATAL)
    pub fn corruption(message: impl Into<String>) -> Self {
        Self::new(StoreErrorCode::Corruption, message)
    }

    /// Journal corruption with byte offset context
    pub fn corruption_at_offset(offset: u64, reason: impl Into<String>) -> Self {
        Self {
            details: Some(format!("byte_offset: {}", offset)),
            ..Self::corruption(reason)
        }
    }

    pub fn code(&self) -> StoreErrorCode {
        self.code
    }

    pub fn severity(&self) -> Severity {
        self.code.severity()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn details(&self) -> Option<&str> {
        self.details.as_deref()
    }

    /// Returns whether this error means the board must not be served
    pub fn is_fatal(&self) -> bool {
        self.severity() == Severity::Fatal
    }
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] {}: {}",
            self.code.severity(),
            self.code.code(),
            self.message
        )?;
        if let Some(ref details) = self.details {
            write!(f, " ({})", details)?;
        }
        if let Some(ref source) = self.source {
            write!(f, " (caused by: {})", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source.as_ref().map(|e| e as &(dyn std::error::Error + 'static))
    }
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        assert_eq!(StoreErrorCode::IoError.code(), "LANEBOARD_STORE_IO_ERROR");
        assert_eq!(StoreErrorCode::CommitFailed.code(), "LANEBOARD_STORE_COMMIT_FAILED");
        assert_eq!(StoreErrorCode::UnknownRecord.code(), "LANEBOARD_STORE_UNKNOWN_RECORD");
        assert_eq!(StoreErrorCode::Locked.code(), "LANEBOARD_STORE_LOCKED");
        assert_eq!(StoreErrorCode::Corruption.code(), "LANEBOARD_STORE_CORRUPTION");
    }

    #[test]
    fn test_only_corruption_is_fatal() {
        assert!(StoreError::corruption("bad frame").is_fatal());
        assert!(!StoreError::unknown_record(RecordId::new(4)).is_fatal());
        assert!(!StoreError::commit_failed(
            "disk full",
            io::Error::new(io::ErrorKind::Other, "disk full")
        )
        .is_fatal());
    }

    #[test]
    fn test_display_carries_context() {
        let display = StoreError::corruption_at_offset(512, "checksum mismatch").to_string();
        assert!(display.contains("FATAL"));
        assert!(display.contains("LANEBOARD_STORE_CORRUPTION"));
        assert!(display.contains("checksum mismatch"));
        assert!(display.contains("byte_offset: 512"));

        let display = StoreError::unknown_record(RecordId::new(42)).to_string();
        assert!(display.contains("record_id: 42"));
    }
}
