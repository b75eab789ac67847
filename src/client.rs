//! Typed client for the API gateway and the services behind it.
//!
//! One instance lives for the whole process: the base URL is resolved once
//! from configuration at startup, the client is shared through `AppState`,
//! and neither changes afterwards.

use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use serde::de::DeserializeOwned;
use serde::Deserialize;

/// Self-reported health payload from a downstream service.
///
/// A missing `status` field decodes as an empty string, which the dashboard
/// treats as unhealthy rather than as a decode failure.
#[derive(Debug, Clone, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: String,
}

/// Greeting payload from a service's root endpoint.
#[derive(Debug, Clone, Deserialize)]
pub struct RootInfo {
    pub message: String,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("request to {url} failed: {source}")]
    Network {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("API error: {status} {status_text} - {body}")]
    Status {
        status: u16,
        status_text: String,
        body: String,
    },
    #[error("invalid JSON from {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(http: reqwest::Client, base_url: impl Into<String>) -> Self {
        Self {
            http,
            base_url: base_url.into(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET `{base}{endpoint}` and decode the JSON body as `T`.
    pub async fn request<T: DeserializeOwned>(&self, endpoint: &str) -> Result<T, ClientError> {
        self.request_with(endpoint, HeaderMap::new()).await
    }

    /// Like [`ApiClient::request`], with caller headers layered over the
    /// default `Content-Type: application/json`. Caller headers win on
    /// conflict.
    ///
    /// Failures are logged here before propagating; no recovery is attempted
    /// at this layer.
    pub async fn request_with<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        headers: HeaderMap,
    ) -> Result<T, ClientError> {
        let url = format!("{}{}", self.base_url, endpoint);

        let mut merged = HeaderMap::new();
        merged.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        merged.extend(headers);

        let response = self
            .http
            .get(&url)
            .headers(merged)
            .send()
            .await
            .map_err(|e| {
                tracing::warn!(url = %url, error = %e, "api request failed");
                ClientError::Network {
                    url: url.clone(),
                    source: e,
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::warn!(url = %url, status = %status, "api request returned error status");
            return Err(ClientError::Status {
                status: status.as_u16(),
                status_text: status.canonical_reason().unwrap_or("Unknown").to_string(),
                body,
            });
        }

        let body = response.text().await.map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to read api response body");
            ClientError::Network {
                url: url.clone(),
                source: e,
            }
        })?;

        serde_json::from_str(&body).map_err(|e| {
            tracing::warn!(url = %url, error = %e, "failed to decode api response");
            ClientError::Decode { url, source: e }
        })
    }

    /// The gateway's own health endpoint.
    pub async fn gateway_health(&self) -> Result<HealthStatus, ClientError> {
        self.request("/health").await
    }

    pub async fn service_a_health(&self) -> Result<HealthStatus, ClientError> {
        self.request("/service-a/health").await
    }

    pub async fn service_a_root(&self) -> Result<RootInfo, ClientError> {
        self.request("/service-a/").await
    }

    pub async fn service_b_health(&self) -> Result<HealthStatus, ClientError> {
        self.request("/service-b/health").await
    }

    pub async fn service_b_root(&self) -> Result<RootInfo, ClientError> {
        self.request("/service-b/").await
    }
}
