//! Main entry point for the servarr-upgrade-searcher CLI

use std::io::{BufRead, Write};

use anyhow::Context;
use clap::Parser;
use servarr_upgrade_searcher::cli::Cli;
use servarr_upgrade_searcher::shutdown::{SharedShutdown, ShutdownCoordinator};
use tracing::{error, warn};
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber with optional JSON formatting
fn init_tracing(debug: bool) {
    // Check if JSON output is requested via environment variable
    let json_format = std::env::var("LOG_FORMAT")
        .map(|v| v.to_lowercase() == "json")
        .unwrap_or(false);

    let default_level = if debug { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("servarr_upgrade_searcher={default_level}")));

    if json_format {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

/// Warn about long runs and wait for the user to confirm on stdin.
///
/// Kept out of the runner so everything below `main` stays testable
/// without a terminal.
fn confirm_long_run() -> std::io::Result<()> {
    warn!(
        "this tool can run for hours or days depending on the search wait; \
         run it in the background or a headless terminal"
    );
    warn!(
        "it can also hit indexer API limits and cause heavy bandwidth and \
         storage usage while the managers import upgrades"
    );
    print!("Press Enter to continue...");
    std::io::stdout().flush()?;
    let mut line = String::new();
    std::io::stdin().lock().read_line(&mut line)?;
    Ok(())
}

async fn run(cli: Cli, shutdown: SharedShutdown) -> anyhow::Result<()> {
    if !cli.skip_warning {
        confirm_long_run().context("failed to read confirmation")?;
    }
    cli.execute(shutdown).await?;
    Ok(())
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.debug);

    // Ctrl+C halts at the next step boundary with the cursor persisted
    let shutdown = ShutdownCoordinator::shared();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                warn!("Ctrl+C received, pausing after the current step...");
                shutdown.request_shutdown();
            }
        }
    });

    if let Err(e) = run(cli, shutdown).await {
        error!("run failed: {e:#}");
        std::process::exit(1);
    }
}
