//! In-memory record table
//!
//! The table is the committed state of the board. It knows nothing about
//! locking or durability; stores wrap it and decide when a unit of work is
//! allowed to reach it.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};

use crate::board::{ClientRecord, Lane, NewClient, Priority, RecordId};

use super::errors::{StoreError, StoreResult};
use super::unit_of_work::{Mutation, UnitOfWork};

#[derive(Debug, Clone, Default)]
pub(crate) struct Table {
    records: BTreeMap<RecordId, ClientRecord>,
}

impl Table {
    pub fn get(&self, id: RecordId) -> Option<&ClientRecord> {
        self.records.get(&id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn records(&self) -> impl Iterator<Item = &ClientRecord> {
        self.records.values()
    }

    /// Records of one lane, by ascending priority
    pub fn scan_lane(&self, lane: Lane) -> Vec<ClientRecord> {
        let mut rows: Vec<_> = self
            .records
            .values()
            .filter(|record| record.lane == lane)
            .cloned()
            .collect();
        rows.sort_by_key(|record| record.priority);
        rows
    }

    /// Every record, by (lane, priority)
    pub fn scan_all(&self) -> Vec<ClientRecord> {
        let mut rows: Vec<_> = self.records.values().cloned().collect();
        rows.sort_by_key(|record| (record.lane, record.priority));
        rows
    }

    fn lane_len(&self, lane: Lane) -> usize {
        self.records.values().filter(|record| record.lane == lane).count()
    }

    /// Builds the record an append would insert, without inserting it.
    ///
    /// Ids continue from the highest id in the table (records are never
    /// deleted, so ids are never reused). The record lands at the end of
    /// its lane.
    pub fn prepare_append(&self, client: NewClient, created_at: DateTime<Utc>) -> ClientRecord {
        let id = self
            .records
            .keys()
            .next_back()
            .map(|last| last.next())
            .unwrap_or_else(|| RecordId::new(1));
        let priority = Priority::after(self.lane_len(client.lane));
        ClientRecord::from_new(id, priority, created_at, client)
    }

    /// Inserts a prepared or replayed record. Fails on a duplicate id.
    pub fn insert(&mut self, record: ClientRecord) -> StoreResult<()> {
        if self.records.contains_key(&record.id) {
            return Err(StoreError::commit_refused(format!(
                "record {} already exists",
                record.id
            )));
        }
        self.records.insert(record.id, record);
        Ok(())
    }

    /// Checks that every mutation in `unit` targets an existing record.
    pub fn check(&self, unit: &UnitOfWork) -> StoreResult<()> {
        unit.mutations()
            .iter()
            .map(Mutation::target)
            .find(|id| !self.records.contains_key(id))
            .map_or(Ok(()), |missing| Err(StoreError::unknown_record(missing)))
    }

    /// Applies `unit` in full, or not at all.
    pub fn apply(&mut self, unit: &UnitOfWork) -> StoreResult<()> {
        self.check(unit)?;
        for mutation in unit.mutations() {
            match *mutation {
                Mutation::Reposition { id, to } => {
                    if let Some(record) = self.records.get_mut(&id) {
                        record.reposition(to);
                    }
                }
            }
        }
        Ok(())
    }
}
