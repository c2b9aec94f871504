//! Keyword model seam and the OpenAI chat completions client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use crate::error::{AppError, Result};

use super::prompt::SYSTEM_PROMPT;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);
const TEMPERATURE: f64 = 0.3;
const MAX_TOKENS: u32 = 800;

/// Error message when no OpenAI key is available.
pub const MISSING_API_KEY: &str = "OPENAI_API_KEY is not configured.";

/// A language model that turns a prompt into text.
#[async_trait]
pub trait KeywordModel: Send + Sync {
    /// Whether the model has the credentials it needs to be called.
    fn is_configured(&self) -> bool {
        true
    }

    async fn complete(&self, prompt: &str) -> Result<String>;
}

pub struct OpenAiClient {
    client: Client,
    api_url: String,
    api_key: Option<String>,
    model: String,
}

impl std::fmt::Debug for OpenAiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OpenAiClient")
            .field("api_url", &self.api_url)
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .field("model", &self.model)
            .finish()
    }
}

impl OpenAiClient {
    pub fn new(api_url: impl Into<String>, api_key: Option<String>, model: impl Into<String>) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: api_url.into(),
            api_key,
            model: model.into(),
        }
    }

    pub fn from_config(config: &crate::config::Config) -> Self {
        Self::new(
            config.openai_api_url.clone(),
            config.openai_api_key.clone(),
            config.openai_model.clone(),
        )
    }

    pub fn request_body(&self, prompt: &str) -> Value {
        json!({
            "model": self.model,
            "messages": [
                {"role": "system", "content": SYSTEM_PROMPT},
                {"role": "user", "content": prompt},
            ],
            "temperature": TEMPERATURE,
            "max_tokens": MAX_TOKENS,
        })
    }
}

/// Pulls `choices[0].message.content` out of a chat completion, trimmed.
pub fn completion_text(response: &Value) -> Option<String> {
    response
        .pointer("/choices/0/message/content")
        .and_then(Value::as_str)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

#[async_trait]
impl KeywordModel for OpenAiClient {
    fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let api_key = self
            .api_key
            .as_ref()
            .ok_or_else(|| AppError::MissingCredentials(MISSING_API_KEY.to_string()))?;

        debug!(model = %self.model, prompt_chars = prompt.len(), "requesting keyword completion");
        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(api_key)
            .json(&self.request_body(prompt))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            warn!(%status, "OpenAI request failed");
            return Err(AppError::Upstream(format!("OpenAI API error: {}", status)));
        }

        let body: Value = response.json().await?;
        completion_text(&body).ok_or_else(|| AppError::Upstream("No response from OpenAI.".to_string()))
    }
}
