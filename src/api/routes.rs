//! API Routes
//!
//! Configures the Axum router with all server endpoints.

use axum::{
    extract::DefaultBodyLimit,
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    cache_stats_handler, clear_cache_handler, generate_keywords_handler, health_handler,
    search_serp_handler, AppState,
};

/// Largest accepted request body (PDF uploads)
pub const MAX_UPLOAD_BYTES: usize = 20 * 1024 * 1024;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /api/search-serp` - Top organic results for a keyword
/// - `POST /api/generate-keywords` - Keyword suggestions from a campaign PDF
/// - `GET /api/cache/stats` - Cache statistics
/// - `DELETE /api/cache` - Clear the cache
/// - `GET /health` - Health check endpoint
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/search-serp", post(search_serp_handler))
        .route("/api/generate-keywords", post(generate_keywords_handler))
        .route("/api/cache/stats", get(cache_stats_handler))
        .route("/api/cache", delete(clear_cache_handler))
        .route("/health", get(health_handler))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
