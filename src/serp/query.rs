//! SERP query parameters and their cache key.

use serde::{Deserialize, Serialize};

use crate::cache::CacheKey;

/// United States
pub const DEFAULT_LOCATION_CODE: u32 = 2840;
pub const DEFAULT_LANGUAGE_CODE: &str = "en";
pub const DEFAULT_OS: &str = "windows";
/// Top 10 results
pub const DEFAULT_DEPTH: u32 = 10;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    #[default]
    Desktop,
    Mobile,
}

impl Device {
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Desktop => "desktop",
            Device::Mobile => "mobile",
        }
    }
}

/// Everything that determines a SERP result set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SerpQuery {
    pub keyword: String,
    pub location_code: u32,
    pub language_code: String,
    pub device: Device,
    pub os: String,
    pub depth: u32,
}

impl SerpQuery {
    /// A query with the default location, language, device and depth.
    pub fn new(keyword: impl Into<String>) -> Self {
        Self {
            keyword: keyword.into().trim().to_string(),
            location_code: DEFAULT_LOCATION_CODE,
            language_code: DEFAULT_LANGUAGE_CODE.to_string(),
            device: Device::default(),
            os: DEFAULT_OS.to_string(),
            depth: DEFAULT_DEPTH,
        }
    }

    /// Cache key for this query. Logically equal queries (differing only in
    /// keyword case, surrounding or repeated whitespace, or code case) share
    /// a key.
    pub fn cache_key(&self) -> String {
        CacheKey::new("serp")
            .param("keyword", normalize_keyword(&self.keyword))
            .param("location_code", self.location_code)
            .param("language_code", self.language_code.trim().to_lowercase())
            .param("device", self.device.as_str())
            .param("os", self.os.trim().to_lowercase())
            .param("depth", self.depth)
            .build()
    }
}

/// Trims, collapses inner whitespace runs to one space, and lowercases.
pub fn normalize_keyword(keyword: &str) -> String {
    keyword
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}
