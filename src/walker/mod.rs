//! Checkpointed hierarchical traversal engine
//!
//! The heart of the tool: walks a provider's catalog, routes every
//! candidate search through the budgeted dispatcher, and persists the
//! traversal cursor after every step so a killed run resumes exactly
//! where it stopped.
//!
//! Cursor discipline shared by both walk shapes: each cursor field holds
//! the next index to visit at its level. After an executed or skipped step
//! at index `i` the field becomes `i + 1` and is persisted; on budget
//! exhaustion or interrupt the cursor is left as last persisted, so the
//! halted step is retried first on the next run and nothing already done
//! is re-issued.
//!
//! - [`dispatch`] - Budget enforcement and pacing around each search
//! - [`flat`] - Single-level walk for movie libraries
//! - [`nested`] - Series → season → episode walk for TV libraries

use crate::provider::ProviderError;
use crate::resume::ResumeError;

pub mod dispatch;
pub mod flat;
pub mod nested;

pub use dispatch::{DispatchOutcome, SearchDispatcher};
pub use flat::walk_movies;
pub use nested::{walk_series, SeriesWalkOptions};

/// How a walk over one provider ended.
///
/// Anything other than `Completed` is global: the run's remaining
/// providers must be skipped because the budget and the shutdown flag are
/// shared across the whole invocation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WalkStatus {
    /// Every top item at or past the stored cursor was visited
    Completed,
    /// The per-run search budget ran out mid-walk
    BudgetExhausted,
    /// Shutdown was requested mid-walk
    Interrupted,
}

/// Traversal errors
#[derive(Debug, thiserror::Error)]
pub enum WalkError {
    /// Remote adapter failure; aborts the run
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Resume store failure; aborts the run
    #[error("resume error: {0}")]
    Resume(#[from] ResumeError),
}
