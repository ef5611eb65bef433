//! Read-only board queries
//!
//! Every read goes through the store's shared lock, so a listing reflects
//! one committed state and never a unit of work in flight.

use std::sync::Arc;

use crate::board::{ClientRecord, Lane, RecordId};
use crate::storage::{RecordStore, StoreResult};

pub struct BoardQuery<S: RecordStore> {
    store: Arc<S>,
}

impl<S: RecordStore> BoardQuery<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self { store }
    }

    /// Every record, by (lane, priority) in workflow lane order
    pub fn list_all(&self) -> StoreResult<Vec<ClientRecord>> {
        self.store.scan_all()
    }

    /// One lane, by ascending priority
    pub fn list_by_lane(&self, lane: Lane) -> StoreResult<Vec<ClientRecord>> {
        self.store.scan_lane(lane)
    }

    pub fn get(&self, id: RecordId) -> StoreResult<Option<ClientRecord>> {
        self.store.get(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::NewClient;
    use crate::storage::MemoryStore;

    fn seeded() -> BoardQuery<MemoryStore> {
        let store = MemoryStore::new();
        for (name, lane) in [
            ("done", Lane::Complete),
            ("first", Lane::Backlog),
            ("doing", Lane::InProgress),
            ("second", Lane::Backlog),
        ] {
            store.append(NewClient::new(name, lane)).unwrap();
        }
        BoardQuery::new(Arc::new(store))
    }

    #[test]
    fn test_list_all_orders_by_lane_then_priority() {
        let query = seeded();
        let names: Vec<_> = query
            .list_all()
            .unwrap()
            .into_iter()
            .map(|r| (r.lane, r.priority.get(), r.name))
            .collect();

        assert_eq!(
            names,
            vec![
                (Lane::Backlog, 1, "first".to_string()),
                (Lane::Backlog, 2, "second".to_string()),
                (Lane::InProgress, 1, "doing".to_string()),
                (Lane::Complete, 1, "done".to_string()),
            ]
        );
    }

    #[test]
    fn test_list_by_lane() {
        let query = seeded();
        let backlog = query.list_by_lane(Lane::Backlog).unwrap();
        assert_eq!(backlog.len(), 2);
        assert!(backlog.iter().all(|r| r.lane == Lane::Backlog));
    }

    #[test]
    fn test_get() {
        let query = seeded();
        assert_eq!(query.get(RecordId::new(3)).unwrap().unwrap().name, "doing");
        assert!(query.get(RecordId::new(99)).unwrap().is_none());
    }
}
