//! CLI error types and conversions

use crate::provider::ProviderError;
use crate::resume::ResumeError;
use crate::walker::WalkError;

/// CLI errors
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// Provider error
    #[error("provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Resume store error
    #[error("resume error: {0}")]
    Resume(#[from] ResumeError),

    /// Traversal error
    #[error("walk error: {0}")]
    Walk(#[from] WalkError),
}
