//! API Module
//!
//! HTTP handlers and routing for the server's JSON API.
//!
//! # Endpoints
//! - `POST /api/search-serp` - Top organic results for a keyword
//! - `POST /api/generate-keywords` - Keyword suggestions from a campaign PDF
//! - `GET /api/cache/stats` - Cache statistics
//! - `DELETE /api/cache` - Clear the cache
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
