//! Typed adapters over the Servarr remote APIs
//!
//! Each media manager kind gets one adapter implementing the matching
//! capability trait. Adapters decode API payloads into the narrow record
//! types at the crate root and expose fire-and-forget search commands:
//! success means the command was accepted, the manager performs the actual
//! search and import asynchronously.

use async_trait::async_trait;

use crate::{Episode, Movie, Series};

pub mod http;
pub mod radarr;
pub mod sonarr;

pub use radarr::RadarrProvider;
pub use sonarr::SonarrProvider;

/// Resume-store tag for the Sonarr provider
pub const SONARR_TAG: &str = "sonarr";

/// Resume-store tag for the Radarr provider
pub const RADARR_TAG: &str = "radarr";

/// Provider adapter errors
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Network-level failure (timeout, connection refused)
    #[error("network error: {0}")]
    Network(String),

    /// The API rejected the configured key
    #[error("authentication failed (HTTP {status}): check the API key")]
    AuthFailed { status: u16 },

    /// Non-success API response that is not an auth failure
    #[error("API error: HTTP {status} for {endpoint}")]
    Api { status: u16, endpoint: String },

    /// Response body did not decode into the expected shape
    #[error("unexpected response shape: {0}")]
    Parse(String),

    /// The configured host URL is not usable
    #[error("invalid host URL {url:?}: {reason}")]
    InvalidHost { url: String, reason: String },
}

/// Result type for provider operations
pub type ProviderResult<T> = Result<T, ProviderError>;

/// Capability set of a flat (movie-like) provider.
#[async_trait]
pub trait MovieProvider: Send + Sync {
    /// List every movie in the library, in API order.
    async fn list_movies(&self) -> ProviderResult<Vec<Movie>>;

    /// Trigger an upgrade search for one movie.
    async fn search_movie(&self, id: u64) -> ProviderResult<()>;
}

/// Capability set of a nested (series-like) provider.
#[async_trait]
pub trait SeriesProvider: Send + Sync {
    /// List every series in the library, seasons embedded, in API order.
    async fn list_series(&self) -> ProviderResult<Vec<Series>>;

    /// List every episode of one series, in API order.
    async fn list_episodes(&self, series_id: u64) -> ProviderResult<Vec<Episode>>;

    /// Trigger an upgrade search for a whole series.
    async fn search_series(&self, id: u64) -> ProviderResult<()>;

    /// Trigger an upgrade search for one season of a series.
    async fn search_season(&self, series_id: u64, season_number: i32) -> ProviderResult<()>;

    /// Trigger an upgrade search for one episode.
    async fn search_episode(&self, id: u64) -> ProviderResult<()>;
}
