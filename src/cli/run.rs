//! Command-line surface and run orchestration
//!
//! Providers run in a fixed order with one shared dispatcher, so the
//! search budget is global: halting on one provider skips the rest. A
//! provider without an API key is skipped with a notice. The long-run
//! confirmation prompt lives in `main`, never here, keeping the runner
//! free of terminal interaction.

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use tracing::{error, info};

use super::CliError;
use crate::provider::{RadarrProvider, SonarrProvider, RADARR_TAG, SONARR_TAG};
use crate::resume::{ResumeLock, ResumeStore};
use crate::shutdown::SharedShutdown;
use crate::walker::{walk_movies, walk_series, SearchDispatcher, SeriesWalkOptions, WalkStatus};

/// Process Servarr libraries and trigger searches for upgrades.
///
/// Walks every monitored movie, series, season, and episode and asks the
/// manager to search for a better-quality file. Kill the process to pause;
/// rerun to resume. Delete the resume file to start over.
#[derive(Debug, Parser)]
#[command(name = "servarr-upgrade-searcher", version)]
pub struct Cli {
    /// Sonarr host URL
    #[arg(long, default_value = "http://127.0.0.1:8989/")]
    pub sonarr_host: String,

    /// Sonarr API key; required for Sonarr processing
    #[arg(long)]
    pub sonarr_api_key: Option<String>,

    /// Do not search for seasons
    #[arg(long)]
    pub sonarr_skip_seasons: bool,

    /// Do not search for individual episodes
    #[arg(long)]
    pub sonarr_skip_episodes: bool,

    /// Radarr host URL
    #[arg(long, default_value = "http://127.0.0.1:7878/")]
    pub radarr_host: String,

    /// Radarr API key; required for Radarr processing
    #[arg(long)]
    pub radarr_api_key: Option<String>,

    /// Lidarr host URL
    #[arg(long, default_value = "http://127.0.0.1:8686/")]
    pub lidarr_host: String,

    /// Lidarr API key
    #[arg(long)]
    pub lidarr_api_key: Option<String>,

    /// Readarr host URL
    #[arg(long, default_value = "http://127.0.0.1:8787/")]
    pub readarr_host: String,

    /// Readarr API key
    #[arg(long)]
    pub readarr_api_key: Option<String>,

    /// Path of the resume file; delete it to reset progress
    #[arg(long, default_value = "servarr-upgrade-searcher.resume")]
    pub resume_file: PathBuf,

    /// Maximum number of searches per run
    #[arg(long, default_value_t = 50)]
    pub max_searches: u32,

    /// Seconds to wait between searches
    #[arg(long, default_value_t = 60)]
    pub search_wait: u64,

    /// Skip the warning about this tool running for a long time
    #[arg(long)]
    pub skip_warning: bool,

    /// Enable debug output
    #[arg(long)]
    pub debug: bool,
}

impl Cli {
    /// Process every configured provider in a fixed order.
    pub async fn execute(&self, shutdown: SharedShutdown) -> Result<(), CliError> {
        // Refuse a second run against the same resume file
        let _lock = ResumeLock::try_acquire(&self.resume_file)?;
        let mut store = ResumeStore::open(&self.resume_file)?;
        let mut dispatcher =
            SearchDispatcher::new(self.max_searches, Duration::from_secs(self.search_wait))
                .with_shutdown(shutdown);

        let mut halted: Option<WalkStatus> = None;

        match &self.sonarr_api_key {
            None => info!("Sonarr API key not provided, skipping Sonarr"),
            Some(key) => {
                let sonarr = SonarrProvider::new(&self.sonarr_host, key)?;
                let options = SeriesWalkOptions {
                    search_seasons: !self.sonarr_skip_seasons,
                    search_episodes: !self.sonarr_skip_episodes,
                };
                let status =
                    walk_series(&sonarr, SONARR_TAG, options, &mut dispatcher, &mut store).await?;
                if status != WalkStatus::Completed {
                    halted = Some(status);
                }
            }
        }

        if halted.is_none() {
            match &self.radarr_api_key {
                None => info!("Radarr API key not provided, skipping Radarr"),
                Some(key) => {
                    let radarr = RadarrProvider::new(&self.radarr_host, key)?;
                    let status =
                        walk_movies(&radarr, RADARR_TAG, &mut dispatcher, &mut store).await?;
                    if status != WalkStatus::Completed {
                        halted = Some(status);
                    }
                }
            }
        }

        if halted.is_none() {
            match &self.lidarr_api_key {
                None => info!("Lidarr API key not provided, skipping Lidarr"),
                Some(_) => error!("Lidarr functionality not implemented yet"),
            }
            match &self.readarr_api_key {
                None => info!("Readarr API key not provided, skipping Readarr"),
                Some(_) => error!("Readarr functionality not implemented yet"),
            }
        } else {
            info!("skipping remaining providers, run halted early");
        }

        info!(
            issued = dispatcher.issued(),
            max = dispatcher.max(),
            halted = ?halted,
            "run finished"
        );
        Ok(())
    }
}
