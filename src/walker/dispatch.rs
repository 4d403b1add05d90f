//! Budgeted, paced dispatch of search commands
//!
//! Every candidate action at every hierarchy level funnels through one
//! [`SearchDispatcher`] so the per-run budget is enforced globally: a single
//! series with hundreds of episodes drains the same counter as everything
//! else. The dispatcher never persists anything; recording traversal
//! position is the walker's job.

use std::time::Duration;

use tracing::{debug, info};

use crate::provider::ProviderResult;
use crate::shutdown::SharedShutdown;

/// Outcome of one dispatch attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DispatchOutcome {
    /// The search command was issued and the pacing delay has elapsed
    Executed,
    /// The candidate was not eligible; no command, no budget, no delay
    Skipped,
    /// The per-run budget is spent; no command was issued
    BudgetExhausted,
    /// Shutdown was requested; no command was issued
    Interrupted,
}

/// Enforces the global search budget and the inter-search pacing delay.
pub struct SearchDispatcher {
    issued: u32,
    max: u32,
    delay: Duration,
    shutdown: Option<SharedShutdown>,
}

impl SearchDispatcher {
    /// Create a dispatcher with a per-run budget and pacing delay.
    pub fn new(max: u32, delay: Duration) -> Self {
        Self {
            issued: 0,
            max,
            delay,
            shutdown: None,
        }
    }

    /// Attach a shared shutdown handle checked before every dispatch.
    pub fn with_shutdown(mut self, shutdown: SharedShutdown) -> Self {
        self.shutdown = Some(shutdown);
        self
    }

    /// Number of searches issued so far in this run.
    pub fn issued(&self) -> u32 {
        self.issued
    }

    /// The per-run budget ceiling.
    pub fn max(&self) -> u32 {
        self.max
    }

    /// Attempt to dispatch one search command.
    ///
    /// The budget is checked before the eligibility gate, so an exhausted
    /// budget halts traversal even over a stretch of unmonitored items.
    /// An executed action is followed by the pacing sleep; skips cost
    /// nothing. Remote failures propagate to the caller.
    pub async fn try_dispatch<F, Fut>(
        &mut self,
        eligible: bool,
        action: F,
    ) -> Result<DispatchOutcome, crate::provider::ProviderError>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = ProviderResult<()>>,
    {
        if let Some(shutdown) = &self.shutdown {
            if shutdown.is_shutdown_requested() {
                info!("shutdown requested, halting traversal");
                return Ok(DispatchOutcome::Interrupted);
            }
        }

        if self.issued >= self.max {
            info!(max = self.max, "reached maximum number of searches for this run");
            return Ok(DispatchOutcome::BudgetExhausted);
        }

        if !eligible {
            return Ok(DispatchOutcome::Skipped);
        }

        action().await?;
        self.issued += 1;

        debug!(delay_secs = self.delay.as_secs_f64(), "sleeping between searches");
        tokio::time::sleep(self.delay).await;

        Ok(DispatchOutcome::Executed)
    }
}
