//! Record store subsystem for laneboard
//!
//! The store holds the committed state of the board and is the only
//! shared mutable resource in the process. Nothing above it caches
//! priorities.
//!
//! # Design Principles
//!
//! - Point reads and lane scans only ever see committed state
//! - A unit of work lands in full or not at all
//! - Durable stores sync a unit's journal frame before applying it
//! - Checksums on every journal frame; corruption halts startup
//!
//! # Stores
//!
//! - [`MemoryStore`]: volatile, for tests and embedding
//! - [`JournalStore`]: append-only journal under the data directory

mod errors;
mod frame;
mod journal;
mod lock;
mod memory;
mod reader;
mod table;
mod unit_of_work;
mod writer;

pub use errors::{Severity, StoreError, StoreErrorCode, StoreResult};
pub use frame::{frame_checksum, FrameKind, JournalFrame};
pub use journal::JournalStore;
pub use memory::MemoryStore;
pub use unit_of_work::{Mutation, UnitOfWork};

use crate::board::{ClientRecord, Lane, NewClient, RecordId};

/// Storage seam for the board.
///
/// Implementations must make [`commit`](RecordStore::commit) atomic with
/// respect to every read method: a reader sees either none or all of a
/// unit's mutations.
pub trait RecordStore: Send + Sync {
    /// Point read by id
    fn get(&self, id: RecordId) -> StoreResult<Option<ClientRecord>>;

    /// Records in `lane`, by ascending priority
    fn scan_lane(&self, lane: Lane) -> StoreResult<Vec<ClientRecord>>;

    /// Every record, by (lane, priority)
    fn scan_all(&self) -> StoreResult<Vec<ClientRecord>>;

    /// Applies every mutation in `unit`, or none of them
    fn commit(&self, unit: &UnitOfWork) -> StoreResult<()>;

    /// Creates a record at the end of its lane and returns it
    fn append(&self, client: NewClient) -> StoreResult<ClientRecord>;
}
