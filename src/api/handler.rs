//! Board API handler
//!
//! The single entry point both the HTTP server and the CLI go through.
//! Request handling flow for a move:
//!
//! 1. Validate the id (one point read)
//! 2. Validate lane, then priority
//! 3. Hand the move to the reorder engine
//! 4. Return the full listing as committed
//!
//! Nothing is written unless 1 and 2 pass.

use std::sync::Arc;

use serde_json::{Map, Value};

use crate::board::{ClientRecord, NewClient};
use crate::observability::{log_event_with_fields, Event};
use crate::query::BoardQuery;
use crate::reorder::{MoveOutcome, ReorderEngine, ReorderError};
use crate::storage::RecordStore;
use crate::validator::{validate_identifier, validate_lane};

use super::errors::{ApiError, ApiResult};
use super::request::MoveRequest;

pub struct BoardApi<S: RecordStore> {
    store: Arc<S>,
    engine: ReorderEngine<S>,
    query: BoardQuery<S>,
}

impl<S: RecordStore> BoardApi<S> {
    pub fn new(store: Arc<S>) -> Self {
        Self {
            engine: ReorderEngine::new(Arc::clone(&store)),
            query: BoardQuery::new(Arc::clone(&store)),
            store,
        }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Lists one lane when `status` is given, otherwise the whole board
    pub fn list(&self, status: Option<&str>) -> ApiResult<Vec<ClientRecord>> {
        match status {
            Some(raw) => {
                let lane = validate_lane(raw)?;
                Ok(self.query.list_by_lane(lane)?)
            }
            None => Ok(self.query.list_all()?),
        }
    }

    pub fn get(&self, raw_id: &str) -> ApiResult<ClientRecord> {
        let id = validate_identifier(raw_id, self.store.as_ref())?;
        self.query
            .get(id)?
            .ok_or(ApiError::Reorder(ReorderError::UnknownRecord(id)))
    }

    /// Adds a client at the end of its lane
    pub fn add_client(&self, client: NewClient) -> ApiResult<ClientRecord> {
        Ok(self.engine.append(client)?)
    }

    /// Moves a client and returns the board as committed afterwards
    pub fn move_client(
        &self,
        raw_id: &str,
        body: &Map<String, Value>,
    ) -> ApiResult<Vec<ClientRecord>> {
        self.apply_move(raw_id, body)?;
        Ok(self.query.list_all()?)
    }

    /// Validates and applies a move, reporting what it did
    pub fn apply_move(&self, raw_id: &str, body: &Map<String, Value>) -> ApiResult<MoveOutcome> {
        let validated = validate_identifier(raw_id, self.store.as_ref())
            .map_err(ApiError::from)
            .and_then(|id| Ok((id, MoveRequest::from_body(body)?)));

        let (id, request) = match validated {
            Ok(validated) => validated,
            Err(e) => {
                log_event_with_fields(
                    Event::MoveRejected,
                    &[("code", e.code()), ("error", e.to_string().as_str()), ("raw_id", raw_id)],
                );
                return Err(e);
            }
        };

        Ok(self.engine.move_record(id, request.lane, request.priority)?)
    }
}
