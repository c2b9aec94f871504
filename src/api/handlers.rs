//! API Handlers
//!
//! HTTP request handlers for each server endpoint.

use std::sync::Arc;

use axum::{
    extract::{Multipart, State},
    Json,
};
use tracing::info;

use crate::cache::{shared, CacheStore, SharedCache};
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::keywords::{self, CampaignDetails, KeywordModel, OpenAiClient, MISSING_API_KEY};
use crate::models::{
    ClearCacheResponse, HealthResponse, KeywordsResponse, SearchSerpRequest, SearchSerpResponse,
    StatsResponse,
};
use crate::serp::{DataForSeoClient, SerpProvider, SerpService};

/// Application state shared across all handlers.
///
/// The cache is the process-wide store; the SERP service holds a handle to
/// the same store.
#[derive(Clone)]
pub struct AppState {
    /// Thread-safe cache store
    pub cache: SharedCache,
    pub serp: Arc<SerpService>,
    pub keyword_model: Arc<dyn KeywordModel>,
}

impl AppState {
    /// Creates a new AppState from its collaborators.
    pub fn new(
        cache: CacheStore,
        serp_provider: Arc<dyn SerpProvider>,
        keyword_model: Arc<dyn KeywordModel>,
        serp_cache_ttl: f64,
    ) -> Self {
        let cache = shared(cache);
        let serp = Arc::new(SerpService::new(serp_provider, cache.clone(), serp_cache_ttl));
        Self {
            cache,
            serp,
            keyword_model,
        }
    }

    /// Creates a new AppState wired to the real providers.
    pub fn from_config(config: &Config) -> Self {
        Self::new(
            CacheStore::new(config.cache_max_entries),
            Arc::new(DataForSeoClient::from_config(config)),
            Arc::new(OpenAiClient::from_config(config)),
            config.serp_cache_ttl,
        )
    }
}

/// Handler for POST /api/search-serp
///
/// Returns the top organic results for a keyword, from the cache when a
/// fresh copy exists.
pub async fn search_serp_handler(
    State(state): State<AppState>,
    Json(req): Json<SearchSerpRequest>,
) -> Result<Json<SearchSerpResponse>> {
    if let Some(error_msg) = req.validate() {
        return Err(AppError::InvalidRequest(error_msg));
    }

    let lookup = state.serp.search(&req.to_query(), req.bypass_cache).await?;

    Ok(Json(lookup.into()))
}

/// Handler for POST /api/generate-keywords
///
/// Expects a multipart form with a `file` PDF part plus optional
/// `clientName`, `campaignName`, `campaignUrl` and `seedKeywords` text parts.
/// An unconfigured model is rejected before the form is read.
pub async fn generate_keywords_handler(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<KeywordsResponse>> {
    if !state.keyword_model.is_configured() {
        return Err(AppError::MissingCredentials(MISSING_API_KEY.to_string()));
    }

    let mut details = CampaignDetails::default();
    let mut file: Option<Vec<u8>> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidRequest(format!("Invalid form data: {}", e)))?
    {
        let name = field.name().unwrap_or_default().to_string();
        if name == "file" {
            let bytes = field
                .bytes()
                .await
                .map_err(|e| AppError::InvalidRequest(format!("Invalid file upload: {}", e)))?;
            file = Some(bytes.to_vec());
            continue;
        }

        let target = match name.as_str() {
            "clientName" => &mut details.client_name,
            "campaignName" => &mut details.campaign_name,
            "campaignUrl" => &mut details.campaign_url,
            "seedKeywords" => &mut details.seed_keywords,
            _ => continue,
        };
        *target = field
            .text()
            .await
            .map_err(|e| AppError::InvalidRequest(format!("Invalid form field {}: {}", name, e)))?;
    }

    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::InvalidRequest("No PDF file provided.".to_string()))?;

    let keywords =
        keywords::generate_from_pdf(state.keyword_model.as_ref(), &details, &file).await?;

    Ok(Json(KeywordsResponse { keywords }))
}

/// Handler for GET /api/cache/stats
pub async fn cache_stats_handler(State(state): State<AppState>) -> Json<StatsResponse> {
    let cache = state.cache.read().await;
    Json(StatsResponse::new(&cache.stats(), cache.max_entries()))
}

/// Handler for DELETE /api/cache
///
/// Drops every cached entry, fresh or not.
pub async fn clear_cache_handler(State(state): State<AppState>) -> Json<ClearCacheResponse> {
    let cleared = state.cache.write().await.clear();
    info!(cleared, "cache cleared");
    Json(ClearCacheResponse::new(cleared))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use serde_json::{json, Value};

    use crate::serp::SerpQuery;

    struct FixedProvider;

    #[async_trait]
    impl SerpProvider for FixedProvider {
        async fn search(&self, query: &SerpQuery) -> Result<Value> {
            Ok(json!({"tasks": [{"result": [{"items": [
                {"type": "organic", "title": query.keyword, "url": "https://example.com"}
            ]}]}]}))
        }
    }

    struct EchoModel;

    #[async_trait]
    impl KeywordModel for EchoModel {
        async fn complete(&self, _prompt: &str) -> Result<String> {
            Ok(r#"["echo"]"#.to_string())
        }
    }

    fn test_state() -> AppState {
        AppState::new(
            CacheStore::new(100),
            Arc::new(FixedProvider),
            Arc::new(EchoModel),
            900.0,
        )
    }

    fn search_request(keyword: &str) -> SearchSerpRequest {
        SearchSerpRequest {
            keyword: Some(keyword.to_string()),
            ..Default::default()
        }
    }

    #[tokio::test]
    async fn test_search_handler_caches() {
        let state = test_state();

        let first = search_serp_handler(State(state.clone()), Json(search_request("rust")))
            .await
            .unwrap();
        let second = search_serp_handler(State(state.clone()), Json(search_request("rust")))
            .await
            .unwrap();

        assert!(!first.cached);
        assert!(second.cached);
        assert_eq!(second.results[0].title, "rust");
        assert_eq!(state.cache.read().await.len(), 1);
    }

    #[tokio::test]
    async fn test_search_handler_requires_keyword() {
        let state = test_state();

        let result = search_serp_handler(State(state), Json(SearchSerpRequest::default())).await;
        assert!(matches!(result, Err(AppError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_stats_and_clear_handlers() {
        let state = test_state();
        search_serp_handler(State(state.clone()), Json(search_request("rust")))
            .await
            .unwrap();

        let stats = cache_stats_handler(State(state.clone())).await;
        assert_eq!(stats.total_entries, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.max_entries, 100);

        let cleared = clear_cache_handler(State(state.clone())).await;
        assert_eq!(cleared.cleared, 1);
        assert!(state.cache.read().await.is_empty());
    }

    #[tokio::test]
    async fn test_health_handler() {
        let response = health_handler().await;
        assert_eq!(response.status, "healthy");
    }
}
