//! Per-client fixed-window rate limiter for the weather endpoint.
//!
//! Default: 30 requests per client per 60-second window.

use dashmap::DashMap;
use std::time::{Duration, Instant};
use tracing::warn;

/// Request counter for one client.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RateBucket {
    pub count: u32,
    pub reset_at: Instant,
}

/// Fixed-window limiter keyed by client id (IP or forwarded-for address).
#[derive(Debug)]
pub struct RateLimiter {
    buckets: DashMap<String, RateBucket>,
    window: Duration,
    limit: u32,
}

impl RateLimiter {
    pub fn new(window: Duration, limit: u32) -> Self {
        Self {
            buckets: DashMap::new(),
            window,
            limit,
        }
    }

    /// Count a request at `now`. Returns false once the client is over the
    /// limit.
    ///
    /// The bucket resets to zero only when `now` is strictly past
    /// `reset_at`; until then every request, allowed or not, counts.
    /// A client without a bucket triggers a sweep of lapsed buckets.
    pub fn check_at(&self, client_id: &str, now: Instant) -> bool {
        if !self.buckets.contains_key(client_id) {
            self.buckets.retain(|_, bucket| now <= bucket.reset_at);
        }

        let mut bucket = self
            .buckets
            .entry(client_id.to_string())
            .or_insert_with(|| RateBucket {
                count: 0,
                reset_at: now + self.window,
            });

        if now > bucket.reset_at {
            bucket.count = 0;
            bucket.reset_at = now + self.window;
        }

        bucket.count = bucket.count.saturating_add(1);
        if bucket.count > self.limit {
            warn!(
                "Rate limit exceeded for {} ({}/{})",
                client_id, bucket.count, self.limit
            );
            return false;
        }
        true
    }

    #[cfg(test)]
    pub(crate) fn bucket(&self, client_id: &str) -> Option<RateBucket> {
        self.buckets.get(client_id).map(|b| *b)
    }
}

impl Default for RateLimiter {
    fn default() -> Self {
        Self::new(Duration::from_secs(60), 30)
    }
}
