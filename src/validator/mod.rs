//! Input validation for board operations
//!
//! Pure checks run before any mutation is attempted. The only one that
//! touches the store is the id existence check, and that is a single
//! point read. Nothing here writes.

mod errors;

pub use errors::{ValidationError, ValidationResult};

use serde_json::Value;

use crate::board::{Lane, Priority, RecordId};
use crate::storage::RecordStore;

/// Parses `raw` as a record id and checks that the record exists.
pub fn validate_identifier<S>(raw: &str, store: &S) -> ValidationResult<RecordId>
where
    S: RecordStore + ?Sized,
{
    let invalid = |reason| ValidationError::InvalidId {
        raw: raw.to_string(),
        reason,
    };

    // `u64::from_str` also takes a leading '+'
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return Err(invalid("not a non-negative integer"));
    }

    let id = raw
        .parse::<u64>()
        .map(RecordId::new)
        .map_err(|_| invalid("out of range"))?;

    match store.get(id) {
        Ok(Some(_)) => Ok(id),
        Ok(None) => Err(invalid("no such client")),
        Err(e) => Err(ValidationError::StoreUnavailable(e)),
    }
}

/// Accepts exactly `backlog`, `in-progress` or `complete`.
pub fn validate_lane(raw: &str) -> ValidationResult<Lane> {
    Lane::from_tag(raw).ok_or_else(|| ValidationError::InvalidLane(raw.to_string()))
}

/// Same as [`validate_lane`] for a JSON body field
pub fn validate_lane_value(raw: &Value) -> ValidationResult<Lane> {
    match raw {
        Value::String(tag) => validate_lane(tag),
        other => Err(ValidationError::InvalidLane(other.to_string())),
    }
}

/// Accepts a JSON integer or an integer string, 1 or greater.
///
/// Floats (including `2.0`), booleans, null and non-numeric strings are
/// rejected.
pub fn validate_priority(raw: &Value) -> ValidationResult<Priority> {
    let shown = match raw {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    let invalid = |reason| ValidationError::InvalidPriority {
        raw: shown.clone(),
        reason,
    };

    let value: i64 = match raw {
        Value::Number(n) => n.as_i64().or_else(|| n.as_u64().map(|_| i64::MAX)),
        Value::String(s) => s.parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| invalid("not an integer"))?;

    if value < 1 {
        return Err(invalid("must be at least 1"));
    }

    u32::try_from(value)
        .ok()
        .and_then(Priority::new)
        .ok_or_else(|| invalid("out of range"))
}
