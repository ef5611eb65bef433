//! Volatile record store

use std::sync::RwLock;

use chrono::Utc;

use crate::board::{ClientRecord, Lane, NewClient, RecordId};

use super::errors::{StoreError, StoreResult};
use super::table::Table;
use super::unit_of_work::UnitOfWork;
use super::RecordStore;

/// A record store that lives only as long as the process.
///
/// Commits take the table's write lock, so readers see either the state
/// before a unit of work or the state after it.
#[derive(Debug, Default)]
pub struct MemoryStore {
    table: RwLock<Table>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records held
    pub fn len(&self) -> usize {
        self.table.read().map(|table| table.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl RecordStore for MemoryStore {
    fn get(&self, id: RecordId) -> StoreResult<Option<ClientRecord>> {
        let table = self.table.read().map_err(|_| StoreError::unavailable())?;
        Ok(table.get(id).cloned())
    }

    fn scan_lane(&self, lane: Lane) -> StoreResult<Vec<ClientRecord>> {
        let table = self.table.read().map_err(|_| StoreError::unavailable())?;
        Ok(table.scan_lane(lane))
    }

    fn scan_all(&self) -> StoreResult<Vec<ClientRecord>> {
        let table = self.table.read().map_err(|_| StoreError::unavailable())?;
        Ok(table.scan_all())
    }

    fn commit(&self, unit: &UnitOfWork) -> StoreResult<()> {
        let mut table = self.table.write().map_err(|_| StoreError::unavailable())?;
        table.apply(unit)
    }

    fn append(&self, client: NewClient) -> StoreResult<ClientRecord> {
        let mut table = self.table.write().map_err(|_| StoreError::unavailable())?;
        let record = table.prepare_append(client, Utc::now());
        table.insert(record.clone())?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Position, Priority};

    #[test]
    fn test_append_then_read() {
        let store = MemoryStore::new();
        assert!(store.is_empty());

        let record = store.append(NewClient::new("Acme", Lane::Backlog)).unwrap();
        assert_eq!(store.get(record.id).unwrap(), Some(record.clone()));
        assert_eq!(store.scan_lane(Lane::Backlog).unwrap(), vec![record]);
        assert!(store.scan_lane(Lane::Complete).unwrap().is_empty());
    }

    #[test]
    fn test_missing_record_reads_as_none() {
        let store = MemoryStore::new();
        assert_eq!(store.get(RecordId::new(1)).unwrap(), None);
    }

    #[test]
    fn test_rejected_commit_leaves_table_untouched() {
        let store = MemoryStore::new();
        let a = store.append(NewClient::new("a", Lane::Backlog)).unwrap();
        let before = store.scan_all().unwrap();

        let mut unit = UnitOfWork::new();
        unit.reposition(a.id, Position::new(Lane::Complete, Priority::FIRST))
            .reposition(RecordId::new(77), Position::new(Lane::Backlog, Priority::FIRST));
        assert!(store.commit(&unit).is_err());

        assert_eq!(store.scan_all().unwrap(), before);
    }
}
