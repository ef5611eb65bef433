//! Observable board events
//!
//! Events are explicit and typed. Each one renders to a fixed
//! SCREAMING_SNAKE name in the `event` field of a log line.

use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Event {
    // Lifecycle
    BootStart,
    ConfigLoaded,
    Serving,
    ShutdownStart,
    ShutdownComplete,

    // Journal
    JournalReplayed,
    /// An unacknowledged, half-written frame was cut off the journal
    JournalTailDiscarded,
    JournalCorruption,
    /// A failed write could not be rolled back; the journal refuses writes
    JournalWriterPoisoned,

    // Board
    ClientAppended,
    MoveCommitted,
    MoveUnchanged,
    /// Input failed validation; nothing was written
    MoveRejected,
    /// The unit of work did not land; nothing was written
    CommitFailed,
}

impl Event {
    pub fn as_str(&self) -> &'static str {
        match self {
            Event::BootStart => "LANEBOARD_STARTUP_BEGIN",
            Event::ConfigLoaded => "CONFIG_LOADED",
            Event::Serving => "LANEBOARD_SERVING",
            Event::ShutdownStart => "SHUTDOWN_START",
            Event::ShutdownComplete => "SHUTDOWN_COMPLETE",

            Event::JournalReplayed => "JOURNAL_REPLAYED",
            Event::JournalTailDiscarded => "JOURNAL_TAIL_DISCARDED",
            Event::JournalCorruption => "JOURNAL_CORRUPTION",
            Event::JournalWriterPoisoned => "JOURNAL_WRITER_POISONED",

            Event::ClientAppended => "CLIENT_APPENDED",
            Event::MoveCommitted => "MOVE_COMMITTED",
            Event::MoveUnchanged => "MOVE_UNCHANGED",
            Event::MoveRejected => "MOVE_REJECTED",
            Event::CommitFailed => "COMMIT_FAILED",
        }
    }

    /// Returns true if this event means the board cannot be served
    pub fn is_fatal(&self) -> bool {
        matches!(self, Event::JournalCorruption)
    }

    /// Returns true if this event reports a failed operation
    pub fn is_failure(&self) -> bool {
        matches!(
            self,
            Event::CommitFailed | Event::JournalCorruption | Event::JournalWriterPoisoned
        )
    }
}

impl fmt::Display for Event {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
