//! Client for the internship statistics backend.
//!
//! Two read-only endpoints are used: per-state statistics and the national
//! summary. Responses are decoded into [`Catalog`] and [`SummaryStat`] at this
//! boundary; nothing past it sees raw JSON.

use crate::domain::{is_known_state, state_name, Catalog, StateStat, SummaryStat};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;

pub const STATE_STATISTICS_PATH: &str = "/api/v1/map/state-statistics";
pub const STATISTICS_SUMMARY_PATH: &str = "/api/v1/map/statistics-summary";

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("request to {endpoint} failed: {source}")]
    Request {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    #[error("backend returned {status} for {endpoint}")]
    Status { endpoint: &'static str, status: u16 },

    #[error("could not decode response from {endpoint}: {source}")]
    Decode {
        endpoint: &'static str,
        #[source]
        source: serde_json::Error,
    },

    #[error("could not build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
}

impl ApiError {
    /// The server answered, just not with a success status.
    pub const fn is_status(&self) -> bool {
        matches!(self, Self::Status { .. })
    }
}

/// Source of map statistics. The HTTP client is the production
/// implementation; tests substitute recording fakes.
#[async_trait]
pub trait MapApi: Send + Sync {
    async fn state_statistics(&self) -> Result<Catalog, ApiError>;

    async fn statistics_summary(&self) -> Result<SummaryStat, ApiError>;
}

#[derive(Debug, Clone)]
pub struct HttpMapApi {
    client: Client,
    base_url: String,
}

impl HttpMapApi {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ApiError::Client)?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn get_body(&self, endpoint: &'static str) -> Result<String, ApiError> {
        let url = format!("{}{endpoint}", self.base_url);
        tracing::debug!(%url, "requesting");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(ApiError::Status {
                endpoint,
                status: status.as_u16(),
            });
        }

        response
            .text()
            .await
            .map_err(|source| ApiError::Request { endpoint, source })
    }
}

#[async_trait]
impl MapApi for HttpMapApi {
    async fn state_statistics(&self) -> Result<Catalog, ApiError> {
        let body = self.get_body(STATE_STATISTICS_PATH).await?;
        decode_state_statistics(&body)
    }

    async fn statistics_summary(&self) -> Result<SummaryStat, ApiError> {
        let body = self.get_body(STATISTICS_SUMMARY_PATH).await?;
        serde_json::from_str(&body).map_err(|source| ApiError::Decode {
            endpoint: STATISTICS_SUMMARY_PATH,
            source,
        })
    }
}

#[derive(Deserialize)]
struct StateStatisticsResponse {
    #[serde(rename = "stateStats")]
    state_stats: BTreeMap<String, serde_json::Value>,
}

/// Decodes the per-state payload. Entries for unknown codes or with
/// malformed counters are dropped; the rest become the new catalog.
pub fn decode_state_statistics(body: &str) -> Result<Catalog, ApiError> {
    let response: StateStatisticsResponse =
        serde_json::from_str(body).map_err(|source| ApiError::Decode {
            endpoint: STATE_STATISTICS_PATH,
            source,
        })?;

    let catalog = response
        .state_stats
        .into_iter()
        .filter_map(|(code, value)| {
            let Some(canonical_name) = state_name(&code) else {
                tracing::warn!(%code, "dropping statistics for unknown state code");
                return None;
            };

            match serde_json::from_value::<StateStat>(value) {
                Ok(mut stats) => {
                    if stats.name.is_empty() {
                        stats.name = canonical_name.to_string();
                    }
                    Some((code, stats))
                }
                Err(error) => {
                    tracing::warn!(%code, %error, "dropping malformed state statistics");
                    None
                }
            }
        })
        .collect::<Catalog>();

    debug_assert!(catalog.codes().all(is_known_state));
    Ok(catalog)
}
