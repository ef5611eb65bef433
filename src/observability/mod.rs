//! Observability for laneboard
//!
//! - Structured logging (JSON lines)
//! - Typed lifecycle and board events
//!
//! Observability is read-only: it never changes the outcome of the
//! operation it reports on.
//!
//! # Usage
//!
//! ```ignore
//! use laneboard::observability::{log_event_with_fields, Event, Logger};
//!
//! log_event_with_fields(Event::MoveCommitted, &[("record_id", "7")]);
//! Logger::warn("SLOW_COMMIT", &[("elapsed_ms", "250")]);
//! ```

mod events;
mod logger;

pub use events::Event;
pub use logger::{Logger, Severity, LOG_LEVEL_ENV};

/// Severity an event is logged at
fn severity_of(event: Event) -> Severity {
    if event.is_fatal() {
        Severity::Fatal
    } else if event.is_failure() {
        Severity::Error
    } else if event == Event::MoveRejected {
        Severity::Warn
    } else {
        Severity::Info
    }
}

/// Log a lifecycle or board event
pub fn log_event(event: Event) {
    Logger::log(severity_of(event), event.as_str(), &[]);
}

/// Log an event with fields
pub fn log_event_with_fields(event: Event, fields: &[(&str, &str)]) {
    Logger::log(severity_of(event), event.as_str(), fields);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_severities() {
        assert_eq!(severity_of(Event::JournalCorruption), Severity::Fatal);
        assert_eq!(severity_of(Event::CommitFailed), Severity::Error);
        assert_eq!(severity_of(Event::MoveRejected), Severity::Warn);
        assert_eq!(severity_of(Event::MoveCommitted), Severity::Info);
    }

    #[test]
    fn test_log_event_does_not_panic() {
        log_event(Event::BootStart);
        log_event_with_fields(Event::ConfigLoaded, &[("data_dir", "/tmp/board")]);
    }
}
