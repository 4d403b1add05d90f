//! Radarr adapter (flat movie library)

use async_trait::async_trait;
use serde_json::json;

use super::http::ServarrHttpClient;
use super::{MovieProvider, ProviderResult};
use crate::Movie;

/// Adapter for a Radarr instance.
pub struct RadarrProvider {
    http: ServarrHttpClient,
}

impl RadarrProvider {
    /// Create an adapter for the instance at `host` using `api_key`.
    pub fn new(host: &str, api_key: &str) -> ProviderResult<Self> {
        Ok(Self {
            http: ServarrHttpClient::new(host, api_key)?,
        })
    }
}

#[async_trait]
impl MovieProvider for RadarrProvider {
    async fn list_movies(&self) -> ProviderResult<Vec<Movie>> {
        self.http.get("/api/v3/movie", &[]).await
    }

    async fn search_movie(&self, id: u64) -> ProviderResult<()> {
        self.http
            .post_command(json!({
                "name": "MoviesSearch",
                "movieIds": [id],
            }))
            .await
    }
}
