//! Board data model
//!
//! A board is three lanes of client records. Within each lane the
//! priorities of its records are always exactly `1..=count(lane)`.
//!
//! # Invariants
//!
//! - Contiguous, duplicate-free priorities per lane
//! - Every record sits in exactly one lane
//! - Priorities never drop below 1 (enforced by [`Priority`])

mod lane;
mod ordering;
mod record;

pub use lane::{Lane, ParseLaneError};
pub use ordering::{verify_ordering, OrderingViolation};
pub use record::{ClientRecord, NewClient, Position, Priority, RecordId, ZeroPriority};
