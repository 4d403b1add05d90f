//! Durable cursor persistence backing crash-safe resume
//!
//! The store keeps one cursor per provider tag and rewrites the whole
//! backing file atomically (temp file + rename) on every persist, so an
//! external kill can never leave a half-updated record for another
//! provider behind.

use std::collections::BTreeMap;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::cursor::{FlatCursor, NestedCursor, ResumeCursor};

/// Resume store errors
#[derive(Debug, thiserror::Error)]
pub enum ResumeError {
    /// Underlying filesystem failure
    #[error("resume store I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A record in the backing file could not be parsed.
    ///
    /// Corruption is fatal by policy: silently discarding a cursor would
    /// re-issue every search the discarded record had already covered.
    /// Recovery is an explicit user action (fix or delete the file).
    #[error("corrupt resume record: {line:?}")]
    Corrupt { line: String },

    /// A stored record has the wrong shape for the requesting provider,
    /// e.g. a flat record under a nested provider's tag
    #[error("resume record for {tag:?} has the wrong cursor kind")]
    KindMismatch { tag: String },

    /// Advisory lock on the backing store could not be acquired
    #[error("resume store lock error: {0}")]
    Lock(String),
}

/// Durable mapping of provider tag to [`ResumeCursor`].
#[derive(Debug)]
pub struct ResumeStore {
    path: PathBuf,
    cursors: BTreeMap<String, ResumeCursor>,
}

impl ResumeStore {
    /// Open a store, loading any existing records.
    ///
    /// A missing backing file is not an error: the run simply starts from
    /// scratch with an empty cursor set.
    pub fn open<P: Into<PathBuf>>(path: P) -> Result<Self, ResumeError> {
        let path = path.into();
        let cursors = match fs::read_to_string(&path) {
            Ok(contents) => {
                let mut cursors = BTreeMap::new();
                for line in contents.lines().filter(|l| !l.trim().is_empty()) {
                    let (tag, cursor) = ResumeCursor::parse_line(line)?;
                    cursors.insert(tag, cursor);
                }
                debug!(
                    path = %path.display(),
                    records = cursors.len(),
                    "loaded resume store"
                );
                cursors
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                info!("resume file not found, starting from scratch");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self { path, cursors })
    }

    /// Path of the backing file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// All known cursors, keyed by provider tag.
    pub fn cursors(&self) -> &BTreeMap<String, ResumeCursor> {
        &self.cursors
    }

    /// Stored cursor for a flat provider, or the all-zero default if the
    /// tag has never been persisted.
    pub fn flat_cursor(&self, tag: &str) -> Result<FlatCursor, ResumeError> {
        match self.cursors.get(tag) {
            None => Ok(FlatCursor::default()),
            Some(ResumeCursor::Flat(c)) => Ok(*c),
            Some(ResumeCursor::Nested(_)) => Err(ResumeError::KindMismatch {
                tag: tag.to_string(),
            }),
        }
    }

    /// Stored cursor for a nested provider, or the all-zero default if the
    /// tag has never been persisted.
    pub fn nested_cursor(&self, tag: &str) -> Result<NestedCursor, ResumeError> {
        match self.cursors.get(tag) {
            None => Ok(NestedCursor::default()),
            Some(ResumeCursor::Nested(c)) => Ok(*c),
            Some(ResumeCursor::Flat(_)) => Err(ResumeError::KindMismatch {
                tag: tag.to_string(),
            }),
        }
    }

    /// Record a cursor for `tag` and synchronously rewrite the backing file
    /// with every known cursor.
    ///
    /// The walker calls this after every traversal step, so the write must
    /// stay cheap: the file holds one short line per provider, never one per
    /// item, regardless of catalog size.
    pub fn persist(
        &mut self,
        tag: &str,
        cursor: impl Into<ResumeCursor>,
    ) -> Result<(), ResumeError> {
        self.cursors.insert(tag.to_string(), cursor.into());
        self.flush()
    }

    /// Atomically rewrite the backing file from the in-memory cursor set.
    fn flush(&self) -> Result<(), ResumeError> {
        let mut contents = String::new();
        for (tag, cursor) in &self.cursors {
            contents.push_str(&cursor.encode(tag));
            contents.push('\n');
        }

        // Write-then-rename so a kill mid-write leaves the previous file intact
        let tmp_path = self.path.with_extension("tmp");
        {
            let mut tmp = fs::File::create(&tmp_path)?;
            tmp.write_all(contents.as_bytes())?;
            tmp.sync_all()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }
}
