//! SERP Module
//!
//! Live organic search results from DataForSEO, memoized in the TTL cache.

mod client;
mod mapping;
mod query;
mod service;

pub use client::{DataForSeoClient, SerpProvider};
pub use mapping::{map_organic_results, SearchResult, MAX_RESULTS};
pub use query::{normalize_keyword, Device, SerpQuery};
pub use service::{SerpLookup, SerpService};
