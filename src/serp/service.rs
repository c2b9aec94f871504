//! Cached SERP lookups.
//!
//! The cache lock is only held for the synchronous `get` and `set`; the
//! provider call in between runs unlocked, so a slow upstream never blocks
//! other handlers. Two concurrent misses for the same key may both hit the
//! provider; the later `set` wins.

use std::sync::Arc;

use serde::Serialize;
use tracing::{debug, info};

use crate::cache::SharedCache;
use crate::error::{AppError, Result};

use super::{map_organic_results, SearchResult, SerpProvider, SerpQuery};

/// Outcome of a lookup.
#[derive(Debug, Clone, Serialize)]
pub struct SerpLookup {
    pub results: Vec<SearchResult>,
    /// True when served from the cache without calling the provider
    pub cached: bool,
}

pub struct SerpService {
    provider: Arc<dyn SerpProvider>,
    cache: SharedCache,
    ttl_seconds: f64,
}

impl SerpService {
    pub fn new(provider: Arc<dyn SerpProvider>, cache: SharedCache, ttl_seconds: f64) -> Self {
        Self {
            provider,
            cache,
            ttl_seconds,
        }
    }

    /// Returns the organic results for `query`.
    ///
    /// With `bypass_cache` the cached copy is ignored, but the fresh result
    /// still replaces it. Upstream failures are returned unchanged and
    /// nothing is cached for them.
    pub async fn search(&self, query: &SerpQuery, bypass_cache: bool) -> Result<SerpLookup> {
        if query.keyword.trim().is_empty() {
            return Err(AppError::InvalidRequest("Keyword is required".to_string()));
        }

        let key = query.cache_key();

        if !bypass_cache {
            let cached = self.cache.write().await.get(&key);
            if let Some(value) = cached {
                match serde_json::from_value::<Vec<SearchResult>>(value) {
                    Ok(results) => {
                        debug!(%key, "SERP cache hit");
                        return Ok(SerpLookup {
                            results,
                            cached: true,
                        });
                    }
                    // Treated as a miss; the refetch below overwrites it.
                    Err(e) => debug!(%key, error = %e, "discarding undecodable cache entry"),
                }
            } else {
                debug!(%key, "SERP cache miss");
            }
        }

        let raw = self.provider.search(query).await?;
        let results = map_organic_results(&raw)?;

        match serde_json::to_value(&results) {
            Ok(value) => self.cache.write().await.set(key, value, self.ttl_seconds),
            Err(e) => debug!(error = %e, "SERP results not cacheable"),
        }

        info!(
            keyword = %query.keyword,
            results = results.len(),
            bypass_cache,
            "fetched live SERP"
        );

        Ok(SerpLookup {
            results,
            cached: false,
        })
    }
}
