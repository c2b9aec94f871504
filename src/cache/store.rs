//! Cache Store Module
//!
//! Main cache engine: HashMap storage with lazy TTL expiry on reads and an
//! expiry-ordered capacity guard on writes.

use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::cache::entry::current_timestamp_ms;
use crate::cache::{CacheEntry, CacheStats, DEFAULT_MAX_ENTRIES, EVICTION_FRACTION};

// == Cache Store ==
/// In-memory key/value store with per-entry TTL.
///
/// Nothing here can fail: a miss is an ordinary outcome and callers are
/// expected to recompute the value.
#[derive(Debug)]
pub struct CacheStore {
    /// Key-value storage
    entries: HashMap<String, CacheEntry>,
    /// Performance statistics
    stats: CacheStats,
    /// Size above which the capacity guard evicts
    max_entries: usize,
}

impl CacheStore {
    // == Constructor ==
    /// Creates a new CacheStore with the given high-water mark.
    pub fn new(max_entries: usize) -> Self {
        Self {
            entries: HashMap::new(),
            stats: CacheStats::new(),
            max_entries,
        }
    }

    // == Get ==
    /// Retrieves a value by key.
    ///
    /// Returns `None` if the key is absent or its TTL has elapsed. Expired
    /// entries are removed as a side effect.
    pub fn get(&mut self, key: &str) -> Option<Value> {
        self.get_at(key, current_timestamp_ms())
    }

    pub(crate) fn get_at(&mut self, key: &str, now: u64) -> Option<Value> {
        let expired = match self.entries.get(key) {
            None => {
                self.stats.record_miss();
                return None;
            }
            Some(entry) => entry.is_expired_at(now),
        };

        if expired {
            self.entries.remove(key);
            self.stats.record_miss();
            self.stats.record_expirations(1);
            self.stats.set_total_entries(self.entries.len());
            debug!(key, "cache entry expired on read");
            return None;
        }

        self.stats.record_hit();
        self.entries.get(key).map(|entry| entry.value.clone())
    }

    // == Set ==
    /// Stores `value` under `key` for `ttl_seconds` (fractional allowed).
    ///
    /// Runs the capacity guard first, then overwrites any existing entry,
    /// restarting its TTL window from now.
    pub fn set(&mut self, key: impl Into<String>, value: Value, ttl_seconds: f64) {
        self.set_at(key.into(), value, ttl_seconds, current_timestamp_ms());
    }

    pub(crate) fn set_at(&mut self, key: String, value: Value, ttl_seconds: f64, now: u64) {
        self.enforce_capacity(now);
        self.entries
            .insert(key, CacheEntry::with_now(value, ttl_seconds, now));
        self.stats.set_total_entries(self.entries.len());
    }

    // == Clear ==
    /// Removes every entry regardless of expiry. Returns how many were removed.
    pub fn clear(&mut self) -> usize {
        let removed = self.entries.len();
        self.entries.clear();
        self.stats.set_total_entries(0);
        removed
    }

    // == Prune Expired ==
    /// Removes every entry whose TTL has elapsed. Returns the number removed.
    pub fn prune_expired(&mut self) -> usize {
        self.prune_expired_at(current_timestamp_ms())
    }

    fn prune_expired_at(&mut self, now: u64) -> usize {
        let before = self.entries.len();
        self.entries.retain(|_, entry| !entry.is_expired_at(now));
        let removed = before - self.entries.len();

        self.stats.record_expirations(removed);
        self.stats.set_total_entries(self.entries.len());
        removed
    }

    // == Capacity Guard ==
    /// Prunes expired entries, then, if still above `max_entries`, evicts the
    /// `ceil(10%)` entries closest to expiry.
    fn enforce_capacity(&mut self, now: u64) {
        self.prune_expired_at(now);

        let count = self.entries.len();
        if count <= self.max_entries {
            return;
        }

        let to_remove = (count as f64 * EVICTION_FRACTION).ceil() as usize;

        let mut by_expiry: Vec<(u64, String)> = self
            .entries
            .iter()
            .map(|(key, entry)| (entry.expires_at, key.clone()))
            .collect();
        by_expiry.sort_unstable();

        for (_, key) in by_expiry.into_iter().take(to_remove) {
            self.entries.remove(&key);
        }

        self.stats.record_evictions(to_remove);
        self.stats.set_total_entries(self.entries.len());
        debug!(
            evicted = to_remove,
            remaining = self.entries.len(),
            max_entries = self.max_entries,
            "capacity guard evicted entries closest to expiry"
        );
    }

    // == Stats ==
    /// Returns current cache statistics.
    pub fn stats(&self) -> CacheStats {
        let mut stats = self.stats.clone();
        stats.set_total_entries(self.entries.len());
        stats
    }

    // == Length ==
    /// Returns the current number of entries, including expired ones that
    /// have not been pruned yet.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for CacheStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ENTRIES)
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::thread::sleep;
    use std::time::Duration;

    #[test]
    fn test_store_new() {
        let store = CacheStore::default();
        assert_eq!(store.len(), 0);
        assert!(store.is_empty());
        assert_eq!(store.max_entries(), 500);
    }

    #[test]
    fn test_store_set_and_get() {
        let mut store = CacheStore::default();
        let data = json!({"test": "data"});

        store.set("test-key", data.clone(), 60.0);

        assert_eq!(store.get("test-key"), Some(data));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_get_nonexistent() {
        let mut store = CacheStore::default();
        assert_eq!(store.get("non-existent-key"), None);
    }

    #[test]
    fn test_store_ttl_expiration() {
        let mut store = CacheStore::default();
        let data = json!({"ephemeral": true});

        store.set("expires-quickly", data.clone(), 0.1);
        assert_eq!(store.get("expires-quickly"), Some(data));

        sleep(Duration::from_millis(150));

        assert_eq!(store.get("expires-quickly"), None);
        assert!(store.is_empty(), "expired entry should be evicted on read");
    }

    #[test]
    fn test_store_keeps_data_for_full_ttl() {
        let mut store = CacheStore::default();
        let data = json!({"fresh": true});

        store.set("not-expired", data.clone(), 0.2);
        sleep(Duration::from_millis(100));

        assert_eq!(store.get("not-expired"), Some(data));
    }

    #[test]
    fn test_store_overwrite() {
        let mut store = CacheStore::default();

        store.set("overridden", json!({"version": 1}), 60.0);
        store.set("overridden", json!({"version": 2}), 60.0);

        assert_eq!(store.get("overridden"), Some(json!({"version": 2})));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_store_reset_ttl_on_update() {
        let mut store = CacheStore::default();
        let data = json!({"version": 1});

        store.set("extended", data.clone(), 0.1);
        sleep(Duration::from_millis(50));
        store.set("extended", data.clone(), 0.2);
        sleep(Duration::from_millis(100));

        assert_eq!(store.get("extended"), Some(data));
    }

    #[test]
    fn test_store_reset_ttl_can_shorten() {
        let mut store = CacheStore::default();

        store.set_at("k".to_string(), json!(1), 60.0, 1_000);
        store.set_at("k".to_string(), json!(1), 1.0, 2_000);

        assert_eq!(store.get_at("k", 2_999), Some(json!(1)));
        assert_eq!(store.get_at("k", 3_000), None);
    }

    #[test]
    fn test_store_sub_millisecond_ttl_is_readable() {
        let mut store = CacheStore::default();

        store.set_at("tiny".to_string(), json!("v"), 0.0004, 1_000);
        assert_eq!(store.get_at("tiny", 1_000), Some(json!("v")));

        store.set_at("fractional".to_string(), json!(1), 0.0014, 1_000);
        assert_eq!(store.get_at("fractional", 1_001), Some(json!(1)));
        assert_eq!(store.get_at("fractional", 1_002), None);
    }

    #[test]
    fn test_store_null_round_trips() {
        let mut store = CacheStore::default();

        store.set("null-data", Value::Null, 60.0);

        assert_eq!(store.get("null-data"), Some(Value::Null));
        assert_eq!(store.get("never-set"), None);
    }

    #[test]
    fn test_store_independent_expiry() {
        let mut store = CacheStore::default();

        store.set_at("short-lived".to_string(), json!({"ttl": "short"}), 0.1, 0);
        store.set_at("long-lived".to_string(), json!({"ttl": "long"}), 0.3, 0);

        assert_eq!(store.get_at("short-lived", 0), Some(json!({"ttl": "short"})));
        assert_eq!(store.get_at("long-lived", 0), Some(json!({"ttl": "long"})));

        assert_eq!(store.get_at("short-lived", 150), None);
        assert_eq!(store.get_at("long-lived", 150), Some(json!({"ttl": "long"})));

        assert_eq!(store.get_at("short-lived", 350), None);
        assert_eq!(store.get_at("long-lived", 350), None);
    }

    #[test]
    fn test_store_clear() {
        let mut store = CacheStore::default();
        store.set("a", json!(1), 60.0);
        store.set("b", json!(2), 60.0);

        assert_eq!(store.clear(), 2);

        assert!(store.is_empty());
        assert_eq!(store.get("a"), None);
        assert_eq!(store.get("b"), None);
    }

    #[test]
    fn test_store_len_counts_unpruned_expired_entries() {
        let mut store = CacheStore::default();
        store.set_at("stale".to_string(), json!(1), 0.1, 0);
        store.set_at("fresh".to_string(), json!(2), 60.0, 0);

        // Nothing has touched "stale" since it expired.
        assert_eq!(store.len(), 2);
    }

    #[test]
    fn test_store_set_prunes_expired_entries() {
        let mut store = CacheStore::default();
        store.set_at("stale".to_string(), json!(1), 1.0, 0);
        store.set_at("fresh".to_string(), json!(2), 60.0, 5_000);

        assert_eq!(store.len(), 1);
        assert_eq!(store.stats().expirations, 1);
        assert_eq!(store.get_at("fresh", 5_000), Some(json!(2)));
    }

    #[test]
    fn test_store_prune_expired() {
        let mut store = CacheStore::default();
        store.set("key1", json!("v1"), 0.05);
        store.set("key2", json!("v2"), 10.0);

        sleep(Duration::from_millis(80));

        assert_eq!(store.prune_expired(), 1);
        assert_eq!(store.len(), 1);
        assert!(store.get("key2").is_some());
    }

    #[test]
    fn test_capacity_guard_not_triggered_at_max() {
        let mut store = CacheStore::new(5);
        for i in 0..6 {
            store.set_at(format!("key{}", i), json!(i), 60.0 + i as f64, 0);
        }

        // The guard only ran while size was <= 5, so the sixth insert lands.
        assert_eq!(store.len(), 6);
        assert_eq!(store.stats().evictions, 0);
    }

    #[test]
    fn test_capacity_guard_evicts_soonest_to_expire() {
        let mut store = CacheStore::new(10);
        for i in 0..11 {
            // Insert in reverse expiry order so insertion order != expiry order.
            let ttl = 100.0 - i as f64;
            store.set_at(format!("key{}", i), json!(i), ttl, 0);
        }
        assert_eq!(store.len(), 11);

        store.set_at("trigger".to_string(), json!("t"), 1_000.0, 0);

        // 11 > 10, so ceil(1.1) = 2 evicted before the insert.
        assert_eq!(store.len(), 10);
        assert_eq!(store.stats().evictions, 2);
        assert_eq!(store.get_at("key10", 0), None);
        assert_eq!(store.get_at("key9", 0), None);
        for i in 0..9 {
            assert!(store.get_at(&format!("key{}", i), 0).is_some());
        }
        assert_eq!(store.get_at("trigger", 0), Some(json!("t")));
    }

    #[test]
    fn test_capacity_guard_default_max() {
        let mut store = CacheStore::default();
        for i in 0..501 {
            store.set_at(format!("key{}", i), json!(i), 1.0 + i as f64, 0);
        }
        assert_eq!(store.len(), 501);

        store.set_at("key501".to_string(), json!(501), 10_000.0, 0);

        // ceil(501 * 0.1) = 51 evicted, then one inserted.
        assert_eq!(store.len(), 451);
        for i in 0..51 {
            assert_eq!(store.get_at(&format!("key{}", i), 0), None);
        }
        assert!(store.get_at("key51", 0).is_some());
    }

    #[test]
    fn test_capacity_guard_prefers_pruning_over_eviction() {
        let mut store = CacheStore::new(3);
        for i in 0..4 {
            store.set_at(format!("old{}", i), json!(i), 1.0, 0);
        }

        store.set_at("new".to_string(), json!("n"), 60.0, 2_000);

        assert_eq!(store.len(), 1);
        let stats = store.stats();
        assert_eq!(stats.expirations, 4);
        assert_eq!(stats.evictions, 0);
    }

    #[test]
    fn test_store_stats() {
        let mut store = CacheStore::default();

        store.set("key1", json!("value1"), 60.0);
        store.get("key1"); // hit
        store.get("nonexistent"); // miss

        let stats = store.stats();
        assert_eq!(stats.hits, 1);
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.total_entries, 1);
    }

    #[test]
    fn test_expired_read_counts_as_miss_and_expiration() {
        let mut store = CacheStore::default();
        store.set_at("k".to_string(), json!(1), 1.0, 0);

        assert_eq!(store.get_at("k", 1_000), None);

        let stats = store.stats();
        assert_eq!(stats.misses, 1);
        assert_eq!(stats.expirations, 1);
        assert_eq!(stats.total_entries, 0);
    }
}
