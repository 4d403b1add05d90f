//! Advisory file locking for the resume store
//!
//! The store assumes exactly one writer. Two runs sharing a resume file
//! would silently clobber each other's cursors, so the lock is taken
//! non-blocking at startup and a held lock refuses the second run.

use std::fs::{File, OpenOptions};
use std::path::Path;

use fd_lock::RwLock;

use super::store::ResumeError;

/// Exclusive lock guarding a resume store for the duration of a run.
///
/// The flock stays held until this value is dropped and the underlying
/// file descriptor closes.
#[derive(Debug)]
pub struct ResumeLock {
    _lock: RwLock<File>,
}

impl ResumeLock {
    /// Try to acquire an exclusive lock next to the resume file.
    ///
    /// Returns an error immediately if another run holds the lock.
    pub fn try_acquire(path: &Path) -> Result<Self, ResumeError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }

        let lock_path = path.with_extension("lock");
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)
            .map_err(|e| ResumeError::Lock(format!("failed to open lock file: {e}")))?;

        let mut lock = RwLock::new(file);
        let guard = lock.try_write().map_err(|_| {
            ResumeError::Lock(format!(
                "another run already holds {}; concurrent runs against one \
                 resume file are not supported",
                lock_path.display()
            ))
        })?;

        // Skip the guard's unlock-on-drop; the flock must outlive this
        // scope and is released when the file closes on ResumeLock drop.
        std::mem::forget(guard);

        Ok(Self { _lock: lock })
    }
}
