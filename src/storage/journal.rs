//! Durable, journal-backed record store
//!
//! The journal at `<data_dir>/journal/board.log` is the source of truth.
//! The in-memory table is rebuilt from it on open and only ever advanced
//! after a frame has been synced. An open store holds `<data_dir>/.lock`,
//! so a second process cannot append behind its back.
//!
//! # Commit flow
//!
//! 1. Take the write lock (readers now wait)
//! 2. Check every mutation targets an existing record
//! 3. Append the COMMIT frame and sync it
//! 4. Apply the unit to the table
//! 5. Release the lock
//!
//! A failure in 2 or 3 leaves both the journal and the table as they were.

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::RwLock;

use chrono::Utc;

use crate::board::{verify_ordering, ClientRecord, Lane, NewClient, RecordId};
use crate::observability::{log_event_with_fields, Event};

use super::errors::{StoreError, StoreResult};
use super::frame::JournalFrame;
use super::lock::DataDirLock;
use super::reader::{JournalReader, ReadOutcome};
use super::table::Table;
use super::unit_of_work::UnitOfWork;
use super::writer::JournalWriter;
use super::RecordStore;

const JOURNAL_DIR: &str = "journal";
const JOURNAL_FILE: &str = "board.log";

struct JournalState {
    table: Table,
    writer: JournalWriter,
}

/// Record store whose every acknowledged write survives a restart
pub struct JournalStore {
    state: RwLock<JournalState>,
    // Dropped after `state`, so the journal is closed before the lock goes
    _lock: DataDirLock,
}

/// What replay found on disk
struct Replayed {
    table: Table,
    frames: u64,
    valid_len: u64,
    torn_at: Option<u64>,
}

impl JournalStore {
    /// Path of the journal file under `data_dir`
    pub fn journal_path(data_dir: &Path) -> PathBuf {
        data_dir.join(JOURNAL_DIR).join(JOURNAL_FILE)
    }

    /// Whether `data_dir` already holds a journal
    pub fn exists(data_dir: &Path) -> bool {
        Self::journal_path(data_dir).exists()
    }

    /// Opens (or creates) the journal under `data_dir` and replays it.
    ///
    /// # Errors
    ///
    /// - `LANEBOARD_STORE_LOCKED` if another process has the data directory open
    /// - `LANEBOARD_STORE_IO_ERROR` if the journal cannot be opened or truncated
    /// - `LANEBOARD_STORE_CORRUPTION` if a complete frame fails verification,
    ///   or the replayed board violates lane ordering
    pub fn open(data_dir: &Path) -> StoreResult<Self> {
        let journal_dir = data_dir.join(JOURNAL_DIR);
        fs::create_dir_all(&journal_dir).map_err(|e| {
            StoreError::io_error(
                format!("failed to create journal directory: {}", journal_dir.display()),
                e,
            )
        })?;

        let lock = DataDirLock::acquire(data_dir)?;

        let path = journal_dir.join(JOURNAL_FILE);
        let replayed = Self::replay(&path)?;

        verify_ordering(replayed.table.records()).map_err(|violation| {
            StoreError::corruption(format!("replayed board is out of order: {}", violation))
        })?;

        if let Some(offset) = replayed.torn_at {
            log_event_with_fields(
                Event::JournalTailDiscarded,
                &[
                    ("offset", offset.to_string().as_str()),
                    ("path", path.display().to_string().as_str()),
                ],
            );
        }

        let writer = JournalWriter::open(&path, replayed.valid_len)?;

        log_event_with_fields(
            Event::JournalReplayed,
            &[
                ("frames", replayed.frames.to_string().as_str()),
                ("records", replayed.table.len().to_string().as_str()),
            ],
        );

        Ok(Self {
            state: RwLock::new(JournalState {
                table: replayed.table,
                writer,
            }),
            _lock: lock,
        })
    }

    fn replay(path: &Path) -> StoreResult<Replayed> {
        let mut replayed = Replayed {
            table: Table::default(),
            frames: 0,
            valid_len: 0,
            torn_at: None,
        };

        if !path.exists() {
            return Ok(replayed);
        }

        let mut reader = JournalReader::open(path)?;
        loop {
            let offset = reader.offset();
            match reader.read_next()? {
                ReadOutcome::Frame(frame) => {
                    Self::replay_frame(&mut replayed.table, frame, offset)?;
                    replayed.frames += 1;
                    replayed.valid_len = reader.offset();
                }
                ReadOutcome::End => break,
                ReadOutcome::TornTail { offset } => {
                    replayed.torn_at = Some(offset);
                    break;
                }
            }
        }

        Ok(replayed)
    }

    fn replay_frame(table: &mut Table, frame: JournalFrame, offset: u64) -> StoreResult<()> {
        let applied = match frame {
            JournalFrame::Append(record) => table.insert(record),
            JournalFrame::Commit(unit) => table.apply(&unit),
        };
        applied.map_err(|e| {
            StoreError::corruption_at_offset(offset, format!("frame does not replay: {}", e.message()))
        })
    }

    /// Syncs the journal file. Called once on shutdown.
    pub fn sync(&self) -> StoreResult<()> {
        let mut state = self.state.write().map_err(|_| StoreError::unavailable())?;
        state.writer.sync()
    }

    /// Current journal length in bytes
    pub fn journal_len(&self) -> StoreResult<u64> {
        let state = self.state.read().map_err(|_| StoreError::unavailable())?;
        Ok(state.writer.len())
    }

    /// Path of the open journal file
    pub fn path(&self) -> StoreResult<PathBuf> {
        let state = self.state.read().map_err(|_| StoreError::unavailable())?;
        Ok(state.writer.path().to_path_buf())
    }
}

impl RecordStore for JournalStore {
    fn get(&self, id: RecordId) -> StoreResult<Option<ClientRecord>> {
        let state = self.state.read().map_err(|_| StoreError::unavailable())?;
        Ok(state.table.get(id).cloned())
    }

    fn scan_lane(&self, lane: Lane) -> StoreResult<Vec<ClientRecord>> {
        let state = self.state.read().map_err(|_| StoreError::unavailable())?;
        Ok(state.table.scan_lane(lane))
    }

    fn scan_all(&self) -> StoreResult<Vec<ClientRecord>> {
        let state = self.state.read().map_err(|_| StoreError::unavailable())?;
        Ok(state.table.scan_all())
    }

    fn commit(&self, unit: &UnitOfWork) -> StoreResult<()> {
        if unit.is_empty() {
            return Ok(());
        }

        let mut guard = self.state.write().map_err(|_| StoreError::unavailable())?;
        let state = &mut *guard;

        state.table.check(unit)?;
        state.writer.append(&JournalFrame::Commit(unit.clone()))?;
        state.table.apply(unit)
    }

    fn append(&self, client: NewClient) -> StoreResult<ClientRecord> {
        let mut guard = self.state.write().map_err(|_| StoreError::unavailable())?;
        let state = &mut *guard;

        let record = state.table.prepare_append(client, Utc::now());
        state.writer.append(&JournalFrame::Append(record.clone()))?;
        state.table.insert(record.clone())?;
        Ok(record)
    }
}
