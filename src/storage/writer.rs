//! Journal writer with sync enforcement
//!
//! - Every frame is written and synced before the caller may apply it
//! - A failed write is rolled back to the last good length, so a later
//!   frame never lands behind a half-written one
//! - If the rollback itself fails the writer is poisoned and refuses every
//!   later frame until the store is reopened

use std::fs::{File, OpenOptions};
use std::io::{Seek, SeekFrom, Write};
use std::path::{Path, PathBuf};

use crate::observability::{log_event_with_fields, Event};

use super::errors::{StoreError, StoreResult};
use super::frame::JournalFrame;

pub(crate) struct JournalWriter {
    path: PathBuf,
    file: File,
    /// Length of the verified prefix of the file
    len: u64,
    /// Set when bytes past `len` may still be on disk
    poisoned: bool,
}

impl JournalWriter {
    /// Opens the journal for writing after `valid_len` bytes.
    ///
    /// Anything past `valid_len` (a torn tail found during replay) is cut off
    /// and the truncation is synced before the writer is handed out.
    pub fn open(path: &Path, valid_len: u64) -> StoreResult<Self> {
        let mut file = OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .open(path)
            .map_err(|e| {
                StoreError::io_error(format!("failed to open journal: {}", path.display()), e)
            })?;

        let on_disk = file
            .metadata()
            .map_err(|e| StoreError::io_error("failed to read journal metadata", e))?
            .len();

        if on_disk > valid_len {
            file.set_len(valid_len)
                .and_then(|_| file.sync_all())
                .map_err(|e| StoreError::io_error("failed to truncate torn journal tail", e))?;
        }

        file.seek(SeekFrom::Start(valid_len))
            .map_err(|e| StoreError::io_error("failed to seek journal", e))?;

        Ok(Self {
            path: path.to_path_buf(),
            file,
            len: valid_len,
            poisoned: false,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn len(&self) -> u64 {
        self.len
    }

    /// Appends one frame and syncs it. Returns the frame's offset.
    pub fn append(&mut self, frame: &JournalFrame) -> StoreResult<u64> {
        if self.poisoned {
            return Err(StoreError::commit_refused(format!(
                "journal writer is poisoned: {} may hold an unacknowledged frame past offset {}",
                self.path.display(),
                self.len
            )));
        }

        let bytes = frame.encode()?;
        let offset = self.len;

        let written = self
            .file
            .write_all(&bytes)
            .and_then(|_| self.file.sync_data());

        if let Err(e) = written {
            self.rollback();
            return Err(StoreError::commit_failed(
                format!("failed to persist journal frame at offset {}", offset),
                e,
            ));
        }

        self.len += bytes.len() as u64;
        Ok(offset)
    }

    /// Flushes file metadata as well as data
    pub fn sync(&mut self) -> StoreResult<()> {
        self.file
            .sync_all()
            .map_err(|e| StoreError::io_error("failed to sync journal", e))
    }

    fn rollback(&mut self) {
        let len = self.len;
        let restored = self
            .file
            .set_len(len)
            .and_then(|_| self.file.seek(SeekFrom::Start(len)).map(|_| ()));

        if let Err(e) = restored {
            self.poisoned = true;
            log_event_with_fields(
                Event::JournalWriterPoisoned,
                &[
                    ("offset", len.to_string().as_str()),
                    ("path", self.path.display().to_string().as_str()),
                    ("error", e.to_string().as_str()),
                ],
            );
        }
    }

    #[cfg(test)]
    pub(crate) fn poison(&mut self) {
        self.poisoned = true;
    }
}
