//! Unit of work
//!
//! An explicit list of mutations handed to [`RecordStore::commit`] as one
//! indivisible unit. Either every mutation lands or none does.
//!
//! [`RecordStore::commit`]: super::RecordStore::commit

use serde::{Deserialize, Serialize};

use crate::board::{Position, RecordId};

/// A single write inside a unit of work.
///
/// Repositioning is the only mutation there is: records are never
/// deleted, and no other column is ever written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Mutation {
    Reposition { id: RecordId, to: Position },
}

impl Mutation {
    /// The record this mutation writes
    pub fn target(&self) -> RecordId {
        match self {
            Mutation::Reposition { id, .. } => *id,
        }
    }
}

/// Ordered batch of mutations committed atomically
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnitOfWork {
    mutations: Vec<Mutation>,
}

impl UnitOfWork {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a lane/priority write for `id`
    pub fn reposition(&mut self, id: RecordId, to: Position) -> &mut Self {
        self.mutations.push(Mutation::Reposition { id, to });
        self
    }

    pub fn mutations(&self) -> &[Mutation] {
        &self.mutations
    }

    pub fn len(&self) -> usize {
        self.mutations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.mutations.is_empty()
    }
}
