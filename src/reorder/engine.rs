//! Reorder engine
//!
//! Serializes every move, and every append, behind one lock covering the
//! whole board. Lanes
//! cross-talk (a cross-lane move rewrites two lanes at once), so a finer
//! lock would have to be taken in a fixed order per pair; one lock is
//! simpler and moves are short.
//!
//! # Flow
//!
//! 1. Acquire the ordering lock
//! 2. Read the target and the affected lane snapshots
//! 3. Plan the unit of work
//! 4. Commit it through the store (skipped when unchanged)
//! 5. Release the lock
//!
//! Appends change a lane's length, so they take the same lock. Anything
//! that writes the store outside the engine can invalidate a planned unit.

use std::sync::{Arc, Mutex, PoisonError};

use serde::Serialize;

use crate::board::{ClientRecord, Lane, NewClient, Position, Priority, RecordId};
use crate::observability::{log_event_with_fields, Event};
use crate::storage::RecordStore;

use super::errors::{ReorderError, ReorderResult};
use super::plan::plan_move;

/// What a move did
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum MoveOutcome {
    /// The request resolved to the record's current position
    Unchanged { at: Position },
    Moved {
        from: Position,
        to: Position,
        /// Neighbours whose priority changed
        shifted: usize,
    },
}

pub struct ReorderEngine<S: RecordStore> {
    store: Arc<S>,
    ordering: Mutex<()>,
}

impl<S: RecordStore> ReorderEngine<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            store,
            ordering: Mutex::new(()),
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Moves record `id` to the requested lane and/or priority.
    ///
    /// `None` keeps the current value; both `None` is a no-op. `id` must
    /// already have been validated.
    ///
    /// # Errors
    ///
    /// - `StoreCommitFailed` if the unit of work does not land; the board is
    ///   exactly as it was before the call
    /// - `StoreReadFailed` if the lanes could not be read
    /// - `UnknownRecord` if `id` is not on the board
    pub fn move_record(
        &self,
        id: RecordId,
        lane: Option<Lane>,
        priority: Option<Priority>,
    ) -> ReorderResult<MoveOutcome> {
        // The guarded value is (), so a poisoned lock has nothing to repair
        let _guard = self.ordering.lock().unwrap_or_else(PoisonError::into_inner);

        let target = self
            .store
            .get(id)
            .map_err(ReorderError::StoreReadFailed)?
            .ok_or(ReorderError::UnknownRecord(id))?;

        let from = target.position();
        let to_lane = lane.unwrap_or(from.lane);
        let to_priority = priority.unwrap_or(from.priority);

        if to_lane == from.lane && to_priority == from.priority {
            return Ok(self.unchanged(id, from));
        }

        let source = self
            .store
            .scan_lane(from.lane)
            .map_err(ReorderError::StoreReadFailed)?;
        let destination = if to_lane == from.lane {
            Vec::new()
        } else {
            self.store
                .scan_lane(to_lane)
                .map_err(ReorderError::StoreReadFailed)?
        };

        let plan = plan_move(&target, to_lane, to_priority, &source, &destination);
        if plan.is_unchanged() {
            return Ok(self.unchanged(id, from));
        }

        if let Err(e) = self.store.commit(&plan.unit) {
            log_event_with_fields(
                Event::CommitFailed,
                &[
                    ("code", e.code().code()),
                    ("error", e.message()),
                    ("record_id", id.to_string().as_str()),
                ],
            );
            return Err(ReorderError::StoreCommitFailed(e));
        }

        log_event_with_fields(
            Event::MoveCommitted,
            &[
                ("from", plan.from.to_string().as_str()),
                ("record_id", id.to_string().as_str()),
                ("shifted", plan.shifted.to_string().as_str()),
                ("to", plan.to.to_string().as_str()),
            ],
        );

        Ok(MoveOutcome::Moved {
            from: plan.from,
            to: plan.to,
            shifted: plan.shifted,
        })
    }

    /// Adds a client at the end of its lane, serialized with moves.
    pub fn append(&self, client: NewClient) -> ReorderResult<ClientRecord> {
        let _guard = self.ordering.lock().unwrap_or_else(PoisonError::into_inner);

        let record = self.store.append(client).map_err(|e| {
            log_event_with_fields(
                Event::CommitFailed,
                &[("code", e.code().code()), ("error", e.message())],
            );
            ReorderError::StoreCommitFailed(e)
        })?;

        log_event_with_fields(
            Event::ClientAppended,
            &[
                ("at", record.position().to_string().as_str()),
                ("record_id", record.id.to_string().as_str()),
            ],
        );
        Ok(record)
    }

    fn unchanged(&self, id: RecordId, at: Position) -> MoveOutcome {
        log_event_with_fields(
            Event::MoveUnchanged,
            &[
                ("at", at.to_string().as_str()),
                ("record_id", id.to_string().as_str()),
            ],
        );
        MoveOutcome::Unchanged { at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn engine_with(lanes: &[(Lane, &[&str])]) -> ReorderEngine<MemoryStore> {
        let store = MemoryStore::new();
        for (lane, names) in lanes {
            for name in *names {
                store.append(NewClient::new(*name, *lane)).unwrap();
            }
        }
        ReorderEngine::new(Arc::new(store))
    }

    fn names(engine: &ReorderEngine<MemoryStore>, lane: Lane) -> Vec<String> {
        engine
            .store()
            .scan_lane(lane)
            .unwrap()
            .into_iter()
            .map(|r| r.name)
            .collect()
    }

    fn p(value: u32) -> Priority {
        Priority::new(value).unwrap()
    }

    #[test]
    fn test_no_change_requested() {
        let engine = engine_with(&[(Lane::Backlog, &["a", "b"])]);
        let before = engine.store().scan_all().unwrap();

        let outcome = engine.move_record(RecordId::new(2), None, None).unwrap();
        assert!(matches!(outcome, MoveOutcome::Unchanged { .. }));

        let outcome = engine
            .move_record(RecordId::new(2), Some(Lane::Backlog), Some(p(2)))
            .unwrap();
        assert!(matches!(outcome, MoveOutcome::Unchanged { .. }));

        assert_eq!(engine.store().scan_all().unwrap(), before);
    }

    #[test]
    fn test_priority_only_move_keeps_lane() {
        let engine = engine_with(&[(Lane::Backlog, &["a", "b", "c"])]);
        let outcome = engine.move_record(RecordId::new(3), None, Some(p(1))).unwrap();

        assert_eq!(
            outcome,
            MoveOutcome::Moved {
                from: Position::new(Lane::Backlog, p(3)),
                to: Position::new(Lane::Backlog, p(1)),
                shifted: 2,
            }
        );
        assert_eq!(names(&engine, Lane::Backlog), vec!["c", "a", "b"]);
    }

    #[test]
    fn test_lane_only_move_keeps_priority() {
        let engine = engine_with(&[
            (Lane::Backlog, &["a", "b"]),
            (Lane::Complete, &["x", "y", "z"]),
        ]);
        engine
            .move_record(RecordId::new(2), Some(Lane::Complete), None)
            .unwrap();

        assert_eq!(names(&engine, Lane::Backlog), vec!["a"]);
        assert_eq!(names(&engine, Lane::Complete), vec!["x", "b", "y", "z"]);
    }

    #[test]
    fn test_unknown_record() {
        let engine = engine_with(&[(Lane::Backlog, &["a"])]);
        let err = engine
            .move_record(RecordId::new(42), Some(Lane::Complete), None)
            .unwrap_err();
        assert!(matches!(err, ReorderError::UnknownRecord(id) if id == RecordId::new(42)));
    }

    #[test]
    fn test_append_goes_to_end_of_lane() {
        let engine = engine_with(&[(Lane::Complete, &["x", "y"])]);
        let record = engine.append(NewClient::new("z", Lane::Complete)).unwrap();

        assert_eq!(record.position(), Position::new(Lane::Complete, p(3)));
        assert_eq!(names(&engine, Lane::Complete), vec!["x", "y", "z"]);
    }

    #[test]
    fn test_last_record_leaves_lane_empty() {
        let engine = engine_with(&[(Lane::InProgress, &["solo"])]);
        engine
            .move_record(RecordId::new(1), Some(Lane::Complete), Some(p(3)))
            .unwrap();

        assert!(names(&engine, Lane::InProgress).is_empty());
        let complete = engine.store().scan_lane(Lane::Complete).unwrap();
        assert_eq!(complete[0].priority, Priority::FIRST);
    }
}
