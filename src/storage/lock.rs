//! Exclusive data directory lock
//!
//! A process that opens the journal first creates `<data_dir>/.lock` with
//! `create_new`, and removes it when the store is dropped. A second opener
//! finds the file and is refused, so only one writer ever appends to the
//! journal. A lock left behind by a crashed process must be removed by hand;
//! it holds the owner's pid to make that call easier.

use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::observability::Logger;

use super::errors::{StoreError, StoreResult};

const LOCK_FILE: &str = ".lock";

#[derive(Debug)]
pub(crate) struct DataDirLock {
    path: PathBuf,
}

impl DataDirLock {
    pub fn lock_path(data_dir: &Path) -> PathBuf {
        data_dir.join(LOCK_FILE)
    }

    /// Takes the lock, failing with `LANEBOARD_STORE_LOCKED` if it is held.
    pub fn acquire(data_dir: &Path) -> StoreResult<Self> {
        let path = Self::lock_path(data_dir);

        let mut file = match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => {
                return Err(StoreError::locked(&path));
            }
            Err(e) => {
                return Err(StoreError::io_error(
                    format!("failed to create lock file: {}", path.display()),
                    e,
                ))
            }
        };

        // From here on the file is ours; Drop removes it even if the pid write fails
        let lock = Self { path };
        writeln!(file, "{}", std::process::id())
            .and_then(|_| file.sync_all())
            .map_err(|e| {
                StoreError::io_error(
                    format!("failed to write lock file: {}", lock.path.display()),
                    e,
                )
            })?;

        Ok(lock)
    }
}

impl Drop for DataDirLock {
    fn drop(&mut self) {
        if let Err(e) = fs::remove_file(&self.path) {
            Logger::warn(
                "LOCK_RELEASE_FAILED",
                &[
                    ("error", e.to_string().as_str()),
                    ("path", self.path.display().to_string().as_str()),
                ],
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::StoreErrorCode;
    use tempfile::TempDir;

    #[test]
    fn test_second_acquire_is_refused() {
        let temp_dir = TempDir::new().unwrap();
        let _lock = DataDirLock::acquire(temp_dir.path()).unwrap();
        assert!(DataDirLock::lock_path(temp_dir.path()).exists());

        let err = DataDirLock::acquire(temp_dir.path()).unwrap_err();
        assert_eq!(err.code(), StoreErrorCode::Locked);
        assert!(!err.is_fatal());
    }

    #[test]
    fn test_drop_releases() {
        let temp_dir = TempDir::new().unwrap();
        drop(DataDirLock::acquire(temp_dir.path()).unwrap());
        assert!(!DataDirLock::lock_path(temp_dir.path()).exists());
        DataDirLock::acquire(temp_dir.path()).unwrap();
    }

    #[test]
    fn test_lock_file_holds_pid() {
        let temp_dir = TempDir::new().unwrap();
        let _lock = DataDirLock::acquire(temp_dir.path()).unwrap();
        let content = fs::read_to_string(DataDirLock::lock_path(temp_dir.path())).unwrap();
        assert_eq!(content.trim(), std::process::id().to_string());
    }
}
