//! Shared HTTP client for the Servarr v3 APIs
//!
//! Provides unified request handling for both adapters:
//! - API-key authentication via the `X-Api-Key` header
//! - Generic GET with typed deserialization
//! - Command POSTs for the fire-and-forget search endpoints
//! - Retry with exponential backoff on transient failures

use std::time::Duration;

use reqwest::{Client, Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, warn};

use super::{ProviderError, ProviderResult};

/// Maximum number of retries for a failed request. Covers transient
/// network blips and short server-side outages without looping forever
/// on a persistently broken endpoint.
const MAX_RETRIES: u32 = 3;

/// Initial backoff delay in milliseconds.
const INITIAL_BACKOFF_MS: u64 = 1000;

/// Maximum backoff delay in milliseconds.
const MAX_BACKOFF_MS: u64 = 15_000;

/// Calculate exponential backoff delay for a retry attempt.
pub fn calculate_backoff(retry_count: u32) -> Duration {
    let delay_ms = INITIAL_BACKOFF_MS * 2u64.pow(retry_count);
    Duration::from_millis(delay_ms.min(MAX_BACKOFF_MS))
}

/// HTTP client bound to one Servarr instance.
#[derive(Debug, Clone)]
pub struct ServarrHttpClient {
    client: Client,
    base_url: String,
    api_key: String,
}

impl ServarrHttpClient {
    /// Create a client for one instance.
    ///
    /// `host` is the instance root (with or without a trailing slash),
    /// e.g. `http://127.0.0.1:8989/`.
    pub fn new(host: &str, api_key: &str) -> ProviderResult<Self> {
        let base_url = host.trim_end_matches('/').to_string();
        if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
            return Err(ProviderError::InvalidHost {
                url: host.to_string(),
                reason: "expected an http:// or https:// URL".to_string(),
            });
        }
        Ok(Self {
            client: Client::new(),
            base_url,
            api_key: api_key.to_string(),
        })
    }

    /// Execute a GET against an API path with typed deserialization.
    ///
    /// # Arguments
    /// * `path` - API path starting with `/` (e.g. `/api/v3/movie`)
    /// * `params` - Query parameters as key-value pairs
    pub async fn get<T>(&self, path: &str, params: &[(&str, String)]) -> ProviderResult<T>
    where
        T: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, params = params.len(), "GET");
        let response = self
            .send_with_retry(|| {
                self.client
                    .request(Method::GET, &url)
                    .header("X-Api-Key", &self.api_key)
                    .query(params)
            })
            .await?;
        response
            .json::<T>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }

    /// POST a named command to `/api/v3/command`.
    ///
    /// The body carries the command name plus its parameters; the response
    /// body is ignored because acceptance is all a search command reports.
    pub async fn post_command(&self, body: Value) -> ProviderResult<()> {
        let url = format!("{}/api/v3/command", self.base_url);
        debug!(%url, command = %body["name"], "POST command");
        self.send_with_retry(|| {
            self.client
                .request(Method::POST, &url)
                .header("X-Api-Key", &self.api_key)
                .json(&body)
        })
        .await?;
        Ok(())
    }

    /// Send a request, retrying transient failures with exponential backoff.
    ///
    /// Retries on network errors, 5xx responses, and 429. Does not retry
    /// other 4xx responses; 401/403 map to [`ProviderError::AuthFailed`].
    async fn send_with_retry<F>(&self, build: F) -> ProviderResult<reqwest::Response>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut last_error = ProviderError::Network("request never attempted".to_string());

        for attempt in 0..=MAX_RETRIES {
            let response = match build().send().await {
                Ok(resp) => resp,
                Err(e) => {
                    warn!(
                        attempt = attempt + 1,
                        max = MAX_RETRIES + 1,
                        error = %e,
                        "network error"
                    );
                    last_error = ProviderError::Network(e.to_string());
                    if attempt < MAX_RETRIES {
                        tokio::time::sleep(calculate_backoff(attempt)).await;
                        continue;
                    }
                    break;
                }
            };

            let status = response.status();
            if status.is_success() {
                return Ok(response);
            }

            let endpoint = response.url().path().to_string();
            if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
                return Err(ProviderError::AuthFailed {
                    status: status.as_u16(),
                });
            }

            if status == StatusCode::TOO_MANY_REQUESTS || status.is_server_error() {
                warn!(
                    attempt = attempt + 1,
                    max = MAX_RETRIES + 1,
                    status = status.as_u16(),
                    %endpoint,
                    "retryable API error"
                );
                last_error = ProviderError::Api {
                    status: status.as_u16(),
                    endpoint,
                };
                if attempt < MAX_RETRIES {
                    tokio::time::sleep(calculate_backoff(attempt)).await;
                    continue;
                }
                break;
            }

            return Err(ProviderError::Api {
                status: status.as_u16(),
                endpoint,
            });
        }

        Err(last_error)
    }
}
