//! Cache Module
//!
//! Provides in-memory caching with lazy TTL expiration and an
//! expiry-ordered capacity guard.

mod entry;
mod key;
mod stats;
mod store;


use std::sync::Arc;

use tokio::sync::RwLock;

// Re-export public types
pub use entry::{current_timestamp_ms, CacheEntry};
pub use key::CacheKey;
pub use stats::CacheStats;
pub use store::CacheStore;

/// Process-wide handle to the cache, shared by every request handler.
///
/// `get` evicts lazily, so reads take the write lock too.
pub type SharedCache = Arc<RwLock<CacheStore>>;

// == Public Constants ==
/// Default high-water mark for the capacity guard
pub const DEFAULT_MAX_ENTRIES: usize = 500;

/// Fraction of entries the capacity guard evicts when over the mark
pub const EVICTION_FRACTION: f64 = 0.1;

/// Wraps a store for sharing across tasks.
pub fn shared(store: CacheStore) -> SharedCache {
    Arc::new(RwLock::new(store))
}
