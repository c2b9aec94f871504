//! SERP provider seam and the DataForSEO HTTP client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

use super::SerpQuery;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Source of raw SERP data.
#[async_trait]
pub trait SerpProvider: Send + Sync {
    /// Runs one live search and returns the provider's raw JSON.
    async fn search(&self, query: &SerpQuery) -> Result<Value>;
}

/// DataForSEO Google organic live endpoint, authenticated with HTTP basic auth.
pub struct DataForSeoClient {
    client: Client,
    api_url: String,
    credentials: Option<(String, String)>,
}

impl std::fmt::Debug for DataForSeoClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DataForSeoClient")
            .field("api_url", &self.api_url)
            .field("credentials", &self.credentials.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl DataForSeoClient {
    /// Builds a client. Missing credentials are reported per request rather
    /// than at startup so the rest of the server stays usable.
    pub fn new(api_url: impl Into<String>, login: Option<String>, password: Option<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: api_url.into(),
            credentials: login.zip(password),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            config.dataforseo_api_url.clone(),
            config.dataforseo_login.clone(),
            config.dataforseo_password.clone(),
        )
    }

    /// The one-element task array the live endpoint expects.
    pub fn request_body(query: &SerpQuery) -> Value {
        json!([{
            "keyword": query.keyword,
            "location_code": query.location_code,
            "language_code": query.language_code,
            "device": query.device.as_str(),
            "os": query.os,
            "depth": query.depth,
        }])
    }
}

#[async_trait]
impl SerpProvider for DataForSeoClient {
    async fn search(&self, query: &SerpQuery) -> Result<Value> {
        let (login, password) = self.credentials.as_ref().ok_or_else(|| {
            AppError::MissingCredentials(
                "DataForSEO credentials are not configured. Please set DATAFORSEO_LOGIN and \
                 DATAFORSEO_PASSWORD in your environment variables."
                    .to_string(),
            )
        })?;

        debug!(keyword = %query.keyword, "requesting live SERP");
        let response = self
            .client
            .post(&self.api_url)
            .basic_auth(login, Some(password))
            .json(&Self::request_body(query))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "DataForSEO request failed");
            return Err(AppError::Upstream(format!("DataForSEO API error: {}", status)));
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| AppError::InvalidUpstreamResponse(format!("Invalid DataForSEO JSON: {}", e)))
    }
}
