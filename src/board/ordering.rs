//! Whole-board ordering check
//!
//! Used after journal replay to refuse a board whose lanes are not
//! contiguous, and by tests to check every intermediate state.

use std::collections::BTreeMap;

use thiserror::Error;

use super::lane::Lane;
use super::record::ClientRecord;

/// A lane whose priorities are not exactly `1..=count`
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lane '{lane}' expected priority {expected} but found {found}")]
pub struct OrderingViolation {
    pub lane: Lane,
    pub expected: u32,
    pub found: u32,
}

/// Checks that every lane holds the contiguous, duplicate-free run `1..=count`.
pub fn verify_ordering<'a, I>(records: I) -> Result<(), OrderingViolation>
where
    I: IntoIterator<Item = &'a ClientRecord>,
{
    let mut lanes: BTreeMap<Lane, Vec<u32>> = BTreeMap::new();
    for record in records {
        lanes.entry(record.lane).or_default().push(record.priority.get());
    }

    for (lane, mut priorities) in lanes {
        priorities.sort_unstable();
        for (index, found) in priorities.into_iter().enumerate() {
            let expected = index as u32 + 1;
            if found != expected {
                return Err(OrderingViolation {
                    lane,
                    expected,
                    found,
                });
            }
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{NewClient, Priority, RecordId};
    use chrono::Utc;

    fn record(id: u64, lane: Lane, priority: u32) -> ClientRecord {
        ClientRecord::from_new(
            RecordId::new(id),
            Priority::new(priority).unwrap(),
            Utc::now(),
            NewClient::new(format!("client-{}", id), lane),
        )
    }

    #[test]
    fn test_contiguous_lanes_pass() {
        let records = vec![
            record(1, Lane::Backlog, 2),
            record(2, Lane::Backlog, 1),
            record(3, Lane::Complete, 1),
        ];
        assert!(verify_ordering(&records).is_ok());
    }

    #[test]
    fn test_empty_board_passes() {
        assert!(verify_ordering(&Vec::<ClientRecord>::new()).is_ok());
    }

    #[test]
    fn test_gap_is_reported() {
        let records = vec![record(1, Lane::InProgress, 1), record(2, Lane::InProgress, 3)];
        let err = verify_ordering(&records).unwrap_err();
        assert_eq!(err.lane, Lane::InProgress);
        assert_eq!(err.expected, 2);
        assert_eq!(err.found, 3);
    }

    #[test]
    fn test_duplicate_is_reported() {
        let records = vec![record(1, Lane::Backlog, 1), record(2, Lane::Backlog, 1)];
        let err = verify_ordering(&records).unwrap_err();
        assert_eq!(err.expected, 2);
        assert_eq!(err.found, 1);
    }
}
