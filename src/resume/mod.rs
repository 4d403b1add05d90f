//! Resume capability for traversal runs
//!
//! Persists one cursor per provider in a line-oriented text file, rewritten
//! atomically after every traversal step. Deleting the file resets all
//! progress; the engine never expires state on its own.

pub mod cursor;
pub mod lock;
pub mod store;

pub use cursor::{FlatCursor, NestedCursor, ResumeCursor};
pub use lock::ResumeLock;
pub use store::{ResumeError, ResumeStore};
