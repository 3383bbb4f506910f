//! In-memory TTL cache for upstream weather payloads.
//!
//! Uses `DashMap` so concurrent handlers can read and replace entries
//! without a global lock.

use dashmap::DashMap;
use std::time::{Duration, Instant};

/// Cache key for a coordinate pair: both values rounded to 3 decimals.
pub fn cache_key(lat: f64, lon: f64) -> String {
    format!("{lat:.3}|{lon:.3}")
}

/// A cached upstream payload with its expiry.
#[derive(Debug, Clone)]
pub struct CacheEntry {
    pub payload: serde_json::Value,
    pub expires_at: Instant,
}

impl CacheEntry {
    pub fn is_expired(&self, now: Instant) -> bool {
        now >= self.expires_at
    }
}

/// Storage seam for the weather gateway. Implementations must never return
/// an entry at or after its expiry.
pub trait WeatherCache: Send + Sync {
    fn get(&self, key: &str, now: Instant) -> Option<serde_json::Value>;

    /// Store a payload valid for `ttl` from `now`, replacing any previous
    /// entry for the key.
    fn insert(&self, key: String, payload: serde_json::Value, now: Instant, ttl: Duration);
}

/// Process-local cache keyed by rounded coordinates.
#[derive(Debug, Default)]
pub struct InMemoryWeatherCache {
    entries: DashMap<String, CacheEntry>,
}

impl InMemoryWeatherCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

impl WeatherCache for InMemoryWeatherCache {
    fn get(&self, key: &str, now: Instant) -> Option<serde_json::Value> {
        let entry = self.entries.get(key)?;
        if entry.is_expired(now) {
            return None;
        }
        Some(entry.payload.clone())
    }

    /// Expired entries are swept on every insert.
    fn insert(&self, key: String, payload: serde_json::Value, now: Instant, ttl: Duration) {
        self.entries.retain(|_, entry| !entry.is_expired(now));
        self.entries.insert(
            key,
            CacheEntry {
                payload,
                expires_at: now + ttl,
            },
        );
    }
}
