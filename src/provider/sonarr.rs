//! Sonarr adapter (nested series library)

use async_trait::async_trait;
use serde_json::json;

use super::http::ServarrHttpClient;
use super::{ProviderResult, SeriesProvider};
use crate::{Episode, Series};

/// Adapter for a Sonarr instance.
pub struct SonarrProvider {
    http: ServarrHttpClient,
}

impl SonarrProvider {
    /// Create an adapter for the instance at `host` using `api_key`.
    pub fn new(host: &str, api_key: &str) -> ProviderResult<Self> {
        Ok(Self {
            http: ServarrHttpClient::new(host, api_key)?,
        })
    }
}

#[async_trait]
impl SeriesProvider for SonarrProvider {
    async fn list_series(&self) -> ProviderResult<Vec<Series>> {
        self.http.get("/api/v3/series", &[]).await
    }

    async fn list_episodes(&self, series_id: u64) -> ProviderResult<Vec<Episode>> {
        self.http
            .get("/api/v3/episode", &[("seriesId", series_id.to_string())])
            .await
    }

    async fn search_series(&self, id: u64) -> ProviderResult<()> {
        self.http
            .post_command(json!({
                "name": "SeriesSearch",
                "seriesId": id,
            }))
            .await
    }

    async fn search_season(&self, series_id: u64, season_number: i32) -> ProviderResult<()> {
        self.http
            .post_command(json!({
                "name": "SeasonSearch",
                "seriesId": series_id,
                "seasonNumber": season_number,
            }))
            .await
    }

    async fn search_episode(&self, id: u64) -> ProviderResult<()> {
        self.http
            .post_command(json!({
                "name": "EpisodeSearch",
                "episodeIds": [id],
            }))
            .await
    }
}
