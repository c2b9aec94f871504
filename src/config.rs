//! Configuration Module
//!
//! Loads server configuration from environment variables, after an optional
//! `.env` file has been read into the environment.

use std::env;
use std::str::FromStr;

use crate::cache::DEFAULT_MAX_ENTRIES;

/// Default SERP cache TTL: 15 minutes
pub const DEFAULT_SERP_CACHE_TTL: f64 = 900.0;

pub const DEFAULT_DATAFORSEO_API_URL: &str =
    "https://api.dataforseo.com/v3/serp/google/organic/live/regular";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";

/// Values shipped in `.env.example` that mean "not configured".
const PLACEHOLDER_CREDENTIALS: &[&str] = &[
    "your_dataforseo_login_here",
    "your_dataforseo_password_here",
    "your_openai_api_key_here",
];

/// Server configuration parameters.
#[derive(Debug, Clone)]
pub struct Config {
    /// HTTP server port
    pub server_port: u16,
    /// Capacity guard high-water mark
    pub cache_max_entries: usize,
    /// TTL in seconds for cached SERP results
    pub serp_cache_ttl: f64,
    pub dataforseo_login: Option<String>,
    pub dataforseo_password: Option<String>,
    pub dataforseo_api_url: String,
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub openai_api_url: String,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `SERVER_PORT` - HTTP server port (default: 3000)
    /// - `CACHE_MAX_ENTRIES` - Capacity guard mark (default: 500)
    /// - `SERP_CACHE_TTL` - SERP cache TTL in seconds (default: 900)
    /// - `DATAFORSEO_LOGIN`, `DATAFORSEO_PASSWORD` - SERP provider credentials
    /// - `DATAFORSEO_API_URL` - SERP provider endpoint
    /// - `OPENAI_API_KEY`, `OPENAI_MODEL`, `OPENAI_API_URL` - keyword model
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            cache_max_entries: parse_var("CACHE_MAX_ENTRIES")
                .unwrap_or(defaults.cache_max_entries),
            serp_cache_ttl: parse_var("SERP_CACHE_TTL")
                .filter(|ttl: &f64| ttl.is_finite() && *ttl > 0.0)
                .unwrap_or(defaults.serp_cache_ttl),
            dataforseo_login: credential_var("DATAFORSEO_LOGIN"),
            dataforseo_password: credential_var("DATAFORSEO_PASSWORD"),
            dataforseo_api_url: env::var("DATAFORSEO_API_URL")
                .unwrap_or(defaults.dataforseo_api_url),
            openai_api_key: credential_var("OPENAI_API_KEY"),
            openai_model: env::var("OPENAI_MODEL").unwrap_or(defaults.openai_model),
            openai_api_url: env::var("OPENAI_API_URL").unwrap_or(defaults.openai_api_url),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_port: 3000,
            cache_max_entries: DEFAULT_MAX_ENTRIES,
            serp_cache_ttl: DEFAULT_SERP_CACHE_TTL,
            dataforseo_login: None,
            dataforseo_password: None,
            dataforseo_api_url: DEFAULT_DATAFORSEO_API_URL.to_string(),
            openai_api_key: None,
            openai_model: DEFAULT_OPENAI_MODEL.to_string(),
            openai_api_url: DEFAULT_OPENAI_API_URL.to_string(),
        }
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.trim().parse().ok())
}

fn credential_var(name: &str) -> Option<String> {
    env::var(name).ok().and_then(normalize_credential)
}

/// Drops empty values and `.env.example` placeholders.
pub fn normalize_credential(raw: String) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || PLACEHOLDER_CREDENTIALS.contains(&trimmed) {
        None
    } else {
        Some(trimmed.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_max_entries, 500);
        assert_eq!(config.serp_cache_ttl, 900.0);
        assert!(config.dataforseo_login.is_none());
        assert_eq!(config.openai_model, "gpt-4o-mini");
    }

    #[test]
    fn test_config_from_env_defaults() {
        env::remove_var("SERVER_PORT");
        env::remove_var("CACHE_MAX_ENTRIES");
        env::remove_var("SERP_CACHE_TTL");

        let config = Config::from_env();
        assert_eq!(config.server_port, 3000);
        assert_eq!(config.cache_max_entries, 500);
        assert_eq!(config.serp_cache_ttl, 900.0);
    }

    #[test]
    fn test_placeholder_credentials_are_unset() {
        assert_eq!(normalize_credential("your_dataforseo_login_here".into()), None);
        assert_eq!(normalize_credential("   ".into()), None);
        assert_eq!(
            normalize_credential(" user@example.com ".into()),
            Some("user@example.com".to_string())
        );
    }
}
