//! Retrieval of dashboard data from the spend monitor backend.

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use url::Url;

use super::domain::{ProviderDetailResponse, ProviderSummary, SummaryMetrics};
use crate::config::SourceConfig;

pub const SUMMARY_PATH: [&str; 2] = ["api", "summary"];
pub const FLAGGED_PROVIDERS_PATH: [&str; 2] = ["api", "flagged-providers"];
pub const PROVIDER_PATH: [&str; 2] = ["api", "provider"];

/// Why a retrieval failed. Flows treat every variant the same way.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} responded with status {status}")]
    Status { url: String, status: StatusCode },
    #[error("response from {url} could not be decoded: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
    #[error("api base '{0}' cannot carry a path")]
    InvalidBase(String),
    #[error("http client could not be built: {0}")]
    Client(#[source] reqwest::Error),
}

/// Read-only access to the three dashboard resources.
#[async_trait]
pub trait DashboardSource: Send + Sync {
    async fn summary(&self) -> Result<SummaryMetrics, FetchError>;
    async fn flagged_providers(&self) -> Result<Vec<ProviderSummary>, FetchError>;
    async fn provider_detail(&self, npi: &str) -> Result<ProviderDetailResponse, FetchError>;
}

/// [`DashboardSource`] backed by the backend's JSON endpoints.
#[derive(Debug, Clone)]
pub struct HttpDashboardSource {
    client: Client,
    api_base: Url,
    provider_limit: Option<u32>,
}

impl HttpDashboardSource {
    pub fn new(config: &SourceConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder.build().map_err(FetchError::Client)?;

        Ok(Self {
            client,
            api_base: config.api_base.clone(),
            provider_limit: config.provider_limit,
        })
    }

    pub fn api_base(&self) -> &Url {
        &self.api_base
    }

    /// Append path segments to the base; each segment is percent-encoded.
    fn endpoint<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Result<Url, FetchError> {
        let mut url = self.api_base.clone();
        url.path_segments_mut()
            .map_err(|_| FetchError::InvalidBase(self.api_base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, FetchError> {
        let label = url.to_string();
        tracing::debug!(url = %label, "requesting dashboard resource");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|source| FetchError::Transport {
                url: label.clone(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status { url: label, status });
        }

        let body = response
            .text()
            .await
            .map_err(|source| FetchError::Transport {
                url: label.clone(),
                source,
            })?;

        serde_json::from_str(&body).map_err(|source| FetchError::Decode { url: label, source })
    }
}

#[async_trait]
impl DashboardSource for HttpDashboardSource {
    async fn summary(&self) -> Result<SummaryMetrics, FetchError> {
        let url = self.endpoint(SUMMARY_PATH)?;
        self.get_json(url).await
    }

    async fn flagged_providers(&self) -> Result<Vec<ProviderSummary>, FetchError> {
        let mut url = self.endpoint(FLAGGED_PROVIDERS_PATH)?;
        if let Some(limit) = self.provider_limit {
            url.query_pairs_mut()
                .append_pair("limit", &limit.to_string());
        }
        self.get_json(url).await
    }

    async fn provider_detail(&self, npi: &str) -> Result<ProviderDetailResponse, FetchError> {
        let url = self.endpoint(PROVIDER_PATH.into_iter().chain(std::iter::once(npi)))?;
        self.get_json(url).await
    }
}
