//! # Servarr Upgrade Searcher Library
//!
//! Walks the catalogs of Servarr media managers and triggers "search for
//! upgrade" commands for every monitored entry. Useful when pointing a fresh
//! Radarr/Sonarr install at an existing library: the tool systematically
//! sweeps movies, series, seasons, and episodes, and the manager decides what
//! to import based on its own quality settings.
//!
//! ## Features
//!
//! - **Hierarchical Traversal**: flat walks for movie libraries, nested
//!   series → season → episode walks for TV libraries
//! - **Search Budget**: a global maximum number of searches per run, shared
//!   across all providers and all hierarchy levels
//! - **Pacing**: a fixed delay after every dispatched search to avoid
//!   flooding downstream indexers
//! - **Resume Capability**: the traversal cursor is persisted after every
//!   step, so a killed run restarts exactly where it left off
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::time::Duration;
//! use servarr_upgrade_searcher::provider::{RadarrProvider, RADARR_TAG};
//! use servarr_upgrade_searcher::resume::ResumeStore;
//! use servarr_upgrade_searcher::walker::{walk_movies, SearchDispatcher};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let radarr = RadarrProvider::new("http://127.0.0.1:7878/", "secret")?;
//! let mut store = ResumeStore::open("./upgrade.resume")?;
//! let mut dispatcher = SearchDispatcher::new(50, Duration::from_secs(60));
//!
//! let status = walk_movies(&radarr, RADARR_TAG, &mut dispatcher, &mut store).await?;
//! println!("walk ended: {status:?}, {} searches issued", dispatcher.issued());
//! # Ok(())
//! # }
//! ```
//!
//! ## Components
//!
//! - [`provider`] - Typed adapters over the Servarr HTTP APIs
//! - [`walker`] - Traversal engine, budget enforcement, and pacing
//! - [`resume`] - Durable cursor store backing crash-safe resume
//! - [`shutdown`] - Graceful Ctrl+C coordination

pub mod cli;
pub mod provider;
pub mod resume;
pub mod shutdown;
pub mod walker;

use serde::Deserialize;

/// A movie entry from a flat (Radarr-like) library.
///
/// Carries only the fields the traversal engine reads; everything else in the
/// API payload is dropped at the adapter boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Movie {
    /// Stable identifier assigned by the media manager
    pub id: u64,
    /// Display title used for progress reporting
    pub title: String,
    /// Whether the user wants this movie actively managed
    pub monitored: bool,
}

/// A series entry from a nested (Sonarr-like) library.
///
/// Seasons are embedded in the series payload; episodes are fetched
/// separately via [`provider::SeriesProvider::list_episodes`].
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    /// Stable identifier assigned by the media manager
    pub id: u64,
    /// Display title used for progress reporting
    pub title: String,
    /// Whether the user wants this series actively managed
    pub monitored: bool,
    /// Seasons embedded in the series payload, in API order
    #[serde(default)]
    pub seasons: Vec<Season>,
}

/// A season within a series.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Season {
    /// Ordinal used when dispatching a season-level search command
    pub season_number: i32,
    /// Whether the user wants this season actively managed
    pub monitored: bool,
}

/// An episode within a series, the innermost traversal unit.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Episode {
    /// Stable identifier assigned by the media manager
    pub id: u64,
    /// Whether the user wants this episode actively managed
    pub monitored: bool,
}
