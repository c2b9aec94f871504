//! Request DTOs for the server API
//!
//! Defines the structure of incoming HTTP request bodies.

use serde::Deserialize;

use crate::serp::{Device, SerpQuery};

/// Largest result depth accepted from clients
pub const MAX_DEPTH: u32 = 100;

/// Request body for POST /api/search-serp
///
/// Only `keyword` is required; the rest default to a US English desktop
/// search for the top 10 results.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchSerpRequest {
    /// The keyword to search for
    #[serde(default)]
    pub keyword: Option<String>,
    #[serde(default, alias = "locationCode")]
    pub location_code: Option<u32>,
    #[serde(default, alias = "languageCode")]
    pub language_code: Option<String>,
    #[serde(default)]
    pub device: Option<Device>,
    #[serde(default)]
    pub os: Option<String>,
    #[serde(default)]
    pub depth: Option<u32>,
    /// Skip the cache read; the fresh result is still cached
    #[serde(default, alias = "bypassCache")]
    pub bypass_cache: bool,
}

impl SearchSerpRequest {
    /// Validates the request data
    ///
    /// Returns an error message if validation fails, None if valid.
    pub fn validate(&self) -> Option<String> {
        let keyword = self.keyword.as_deref().map(str::trim).unwrap_or_default();
        if keyword.is_empty() {
            return Some("Keyword is required".to_string());
        }
        if let Some(depth) = self.depth {
            if depth == 0 || depth > MAX_DEPTH {
                return Some(format!("Depth must be between 1 and {}", MAX_DEPTH));
            }
        }
        if let Some(language) = &self.language_code {
            if language.trim().is_empty() {
                return Some("Language code cannot be empty".to_string());
            }
        }
        None
    }

    /// Builds the provider query, filling unset fields with defaults.
    pub fn to_query(&self) -> SerpQuery {
        let mut query = SerpQuery::new(self.keyword.clone().unwrap_or_default());
        if let Some(location_code) = self.location_code {
            query.location_code = location_code;
        }
        if let Some(language_code) = &self.language_code {
            query.language_code = language_code.trim().to_string();
        }
        if let Some(device) = self.device {
            query.device = device;
        }
        if let Some(os) = &self.os {
            query.os = os.trim().to_string();
        }
        if let Some(depth) = self.depth {
            query.depth = depth;
        }
        query
    }
}
