//! Cache Entry Module
//!
//! Defines a single cache entry: an opaque JSON value and its absolute expiry.

use std::time::{SystemTime, UNIX_EPOCH};

use serde_json::Value;

// == Cache Entry ==
/// Represents a single cache entry with value and expiry metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct CacheEntry {
    /// The stored value, untyped from the cache's perspective
    pub value: Value,
    /// Expiration timestamp (Unix milliseconds)
    pub expires_at: u64,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates a new entry expiring `ttl_seconds` after `now`.
    ///
    /// # Arguments
    /// * `value` - The value to store
    /// * `ttl_seconds` - TTL in seconds, fractional values allowed
    /// * `now` - Current time (Unix milliseconds)
    pub fn with_now(value: Value, ttl_seconds: f64, now: u64) -> Self {
        Self {
            value,
            expires_at: now.saturating_add(ttl_to_ms(ttl_seconds)),
        }
    }

    // == Is Expired ==
    /// Checks expiry against `now` (Unix milliseconds).
    ///
    /// Boundary condition: an entry is expired once the current time is greater
    /// than or equal to its expiration time.
    pub fn is_expired_at(&self, now: u64) -> bool {
        self.expires_at <= now
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
///
/// A clock set before the epoch reads as zero.
pub fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}

/// Converts a TTL in (possibly fractional) seconds to whole milliseconds.
///
/// Fractions of a millisecond round up, so a positive TTL is never shortened
/// and always lasts at least 1 ms. Float noise from the seconds-to-ms
/// multiplication (e.g. `0.007 * 1000.0`) is not treated as a fraction.
/// NaN and non-positive TTLs map to zero, i.e. an entry that is already
/// expired. Float-to-int casts saturate, so very large TTLs clamp to `u64::MAX`.
pub(crate) fn ttl_to_ms(ttl_seconds: f64) -> u64 {
    if ttl_seconds.is_nan() || ttl_seconds <= 0.0 {
        return 0;
    }
    let ms = ttl_seconds * 1000.0;
    let nearest = ms.round();
    let whole = if (ms - nearest).abs() < 1e-6 {
        nearest
    } else {
        ms.ceil()
    };
    whole.max(1.0) as u64
}
