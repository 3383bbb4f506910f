//! Weather gateway: rate limit → validate → cache → upstream.

use std::sync::Arc;
use std::time::{Duration, Instant};

use common::Error;
use tracing::{debug, info};

use crate::cache::{cache_key, WeatherCache};
use crate::rate_limit::RateLimiter;
use crate::WeatherSource;

/// Parse raw `lat`/`lon` query values.
///
/// Missing, unparseable or non-finite values fail with "must be numbers";
/// finite values outside [-90, 90] / [-180, 180] fail with "out of range".
pub fn parse_coordinates(lat: Option<&str>, lon: Option<&str>) -> Result<(f64, f64), Error> {
    let parse = |raw: Option<&str>| -> Option<f64> {
        raw.and_then(|s| s.trim().parse::<f64>().ok())
            .filter(|v| v.is_finite())
    };

    let (Some(lat), Some(lon)) = (parse(lat), parse(lon)) else {
        return Err(Error::InvalidInput("lat/lon must be numbers".into()));
    };

    if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
        return Err(Error::InvalidInput("lat/lon out of range".into()));
    }

    Ok((lat, lon))
}

pub struct WeatherGateway {
    source: Arc<dyn WeatherSource>,
    cache: Arc<dyn WeatherCache>,
    limiter: RateLimiter,
    ttl: Duration,
}

impl WeatherGateway {
    pub fn new(
        source: Arc<dyn WeatherSource>,
        cache: Arc<dyn WeatherCache>,
        limiter: RateLimiter,
        ttl: Duration,
    ) -> Self {
        Self {
            source,
            cache,
            limiter,
            ttl,
        }
    }

    /// Weather payload for a client request.
    pub async fn fetch(
        &self,
        client_id: &str,
        lat: Option<&str>,
        lon: Option<&str>,
    ) -> Result<serde_json::Value, Error> {
        self.fetch_at(client_id, lat, lon, Instant::now()).await
    }

    pub async fn fetch_at(
        &self,
        client_id: &str,
        lat: Option<&str>,
        lon: Option<&str>,
        now: Instant,
    ) -> Result<serde_json::Value, Error> {
        if !self.limiter.check_at(client_id, now) {
            return Err(Error::RateLimited);
        }

        let (lat, lon) = parse_coordinates(lat, lon)?;
        let key = cache_key(lat, lon);

        if let Some(payload) = self.cache.get(&key, now) {
            debug!("Weather cache hit for {}", key);
            return Ok(payload);
        }

        let payload = self.source.fetch(lat, lon).await?;
        self.cache.insert(key.clone(), payload.clone(), now, self.ttl);
        info!("Weather cached for {} (ttl={}s)", key, self.ttl.as_secs());

        Ok(payload)
    }
}
