//! Process-scoped application context
//!
//! Opens the journal once at startup and hands out the shared board API.
//! Nothing else opens the journal while the context is alive.

use std::path::Path;
use std::sync::Arc;

use crate::api::BoardApi;
use crate::observability::{log_event_with_fields, Event};
use crate::storage::{JournalStore, RecordStore, StoreResult};

pub struct AppContext<S: RecordStore = JournalStore> {
    api: Arc<BoardApi<S>>,
}

impl AppContext<JournalStore> {
    /// Opens and replays the journal under `data_dir`.
    ///
    /// # Errors
    ///
    /// Any store error from opening the journal. Corruption is logged as
    /// fatal before it is returned.
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let store = JournalStore::open(data_dir).map_err(|e| {
            if e.is_fatal() {
                log_event_with_fields(
                    Event::JournalCorruption,
                    &[
                        ("code", e.code().code()),
                        ("data_dir", data_dir.display().to_string().as_str()),
                        ("error", e.message()),
                    ],
                );
            }
            e
        })?;
        Ok(Self::with_store(Arc::new(store)))
    }

    /// Syncs the journal. Call once the server has stopped taking requests.
    pub fn shutdown(&self) -> StoreResult<()> {
        self.api.store().sync()?;
        log_event_with_fields(
            Event::ShutdownComplete,
            &[("journal_bytes", self.api.store().journal_len()?.to_string().as_str())],
        );
        Ok(())
    }
}

impl<S: RecordStore> AppContext<S> {
    /// Builds a context around an already-open store
    pub fn with_store(store: Arc<S>) -> Self {
        Self {
            api: Arc::new(BoardApi::new(store)),
        }
    }

    pub fn api(&self) -> Arc<BoardApi<S>> {
        Arc::clone(&self.api)
    }

    pub fn store(&self) -> &Arc<S> {
        self.api.store()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Lane, NewClient};
    use tempfile::TempDir;

    #[test]
    fn test_open_then_shutdown() {
        let temp_dir = TempDir::new().unwrap();
        let context = AppContext::open(temp_dir.path()).unwrap();
        context
            .api()
            .add_client(NewClient::new("Acme", Lane::Backlog))
            .unwrap();
        context.shutdown().unwrap();
        drop(context);

        let reopened = AppContext::open(temp_dir.path()).unwrap();
        assert_eq!(reopened.api().list(None).unwrap().len(), 1);
    }
}
