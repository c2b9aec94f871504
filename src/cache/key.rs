//! Cache Key Module
//!
//! Builds cache keys from an operation name plus the parameters that
//! determine its result. Parameters are sorted by name so insertion order
//! never matters, and delimiter characters inside names or values are
//! escaped so distinct parameter sets cannot collide.

use std::collections::BTreeMap;

const SEPARATOR: char = '|';
const ASSIGN: char = '=';
const ESCAPE: char = '\\';

// == Cache Key Builder ==
/// Order-stable builder for cache keys.
///
/// ```
/// use serp_scout::cache::CacheKey;
///
/// let a = CacheKey::new("serp").param("keyword", "rust").param("depth", 10).build();
/// let b = CacheKey::new("serp").param("depth", 10).param("keyword", "rust").build();
/// assert_eq!(a, b);
/// assert_eq!(a, "serp|depth=10|keyword=rust");
/// ```
#[derive(Debug, Clone)]
pub struct CacheKey {
    operation: String,
    params: BTreeMap<String, String>,
}

impl CacheKey {
    // == Constructor ==
    /// Starts a key for `operation` with no parameters.
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            params: BTreeMap::new(),
        }
    }

    // == Param ==
    /// Adds a parameter. Setting the same name twice keeps the last value.
    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }

    // == Build ==
    /// Renders `operation|name=value|...` with parameters in name order.
    pub fn build(&self) -> String {
        let mut key = escape(&self.operation);
        for (name, value) in &self.params {
            key.push(SEPARATOR);
            key.push_str(&escape(name));
            key.push(ASSIGN);
            key.push_str(&escape(value));
        }
        key
    }
}

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        if matches!(c, SEPARATOR | ASSIGN | ESCAPE) {
            out.push(ESCAPE);
        }
        out.push(c);
    }
    out
}
