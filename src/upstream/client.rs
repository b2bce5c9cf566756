use std::time::Duration;

use reqwest::header::{ACCEPT, HeaderMap, HeaderValue};
use serde::de::DeserializeOwned;

use crate::error::{AppError, Result};

const GITHUB_ACCEPT: &str = "application/vnd.github.v3+json";

/// Transport settings for every outbound request.
///
/// Certificate validation is only relaxed for the client built from this
/// config; nothing process-wide is touched.
#[derive(Debug, Clone)]
pub struct TransportConfig {
    pub accept_invalid_certs: bool,
    pub timeout: Duration,
    pub user_agent: String,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            accept_invalid_certs: false,
            timeout: Duration::from_secs(10),
            user_agent: concat!("course-showcase/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct UpstreamClient {
    http: reqwest::Client,
}

impl UpstreamClient {
    pub fn new(config: &TransportConfig) -> Result<Self> {
        if config.accept_invalid_certs {
            tracing::warn!("Upstream certificate validation is disabled");
        }

        let mut headers = HeaderMap::new();
        headers.insert(ACCEPT, HeaderValue::from_static(GITHUB_ACCEPT));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .user_agent(config.user_agent.clone())
            .timeout(config.timeout)
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self { http })
    }

    /// GET `url` and decode the body as JSON.
    ///
    /// Transport failures and non-2xx statuses are `UpstreamUnavailable`
    /// regardless of the status code; undecodable bodies are
    /// `MalformedResponse`.
    pub async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T> {
        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::UpstreamUnavailable(format!(
                "{} returned {}",
                url, status
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::UpstreamUnavailable(e.to_string()))?;

        serde_json::from_slice(&bytes).map_err(|e| AppError::MalformedResponse(e.to_string()))
    }
}
