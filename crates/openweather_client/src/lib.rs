//! OpenWeatherMap current-weather client and the weather gateway.
//!
//! The client fetches the upstream payload for a coordinate pair; the
//! gateway wraps it with per-client rate limiting, input validation and a
//! short-lived cache keyed by rounded coordinates.

pub mod cache;
pub mod gateway;
pub mod rate_limit;

pub use cache::{cache_key, InMemoryWeatherCache, WeatherCache};
pub use gateway::{parse_coordinates, WeatherGateway};
pub use rate_limit::{RateBucket, RateLimiter};

use async_trait::async_trait;
use common::config::WeatherConfig;
use common::Error;
use tracing::debug;

/// Anything that can produce a weather payload for a coordinate pair.
#[async_trait]
pub trait WeatherSource: Send + Sync {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<serde_json::Value, Error>;
}

/// OpenWeatherMap client. Requests imperial units so temperatures are °F
/// and wind speed is mph.
#[derive(Debug, Clone)]
pub struct OpenWeatherClient {
    client: reqwest::Client,
    base_url: String,
    api_key: Option<String>,
}

impl OpenWeatherClient {
    pub fn new(config: &WeatherConfig) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent("bass-advisor/0.1")
            .pool_max_idle_per_host(4)
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| Error::Http(format!("failed to build weather HTTP client: {e}")))?;

        let api_key = Some(config.api_key.trim().to_string()).filter(|k| !k.is_empty());

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key,
        })
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.is_some()
    }
}

#[async_trait]
impl WeatherSource for OpenWeatherClient {
    async fn fetch(&self, lat: f64, lon: f64) -> Result<serde_json::Value, Error> {
        let Some(api_key) = self.api_key.as_deref() else {
            return Err(Error::Config("Missing OPENWEATHER_API_KEY".into()));
        };

        debug!("Fetching current weather: {} lat={} lon={}", self.base_url, lat, lon);

        let query = [
            ("lat", lat.to_string()),
            ("lon", lon.to_string()),
            ("units", "imperial".to_string()),
            ("appid", api_key.to_string()),
        ];

        let resp = self
            .client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(|e| Error::Http(format!("weather request for ({lat},{lon}) failed: {e}")))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Upstream {
                status: status.as_u16(),
                body,
            });
        }

        resp.json()
            .await
            .map_err(|e| Error::Http(format!("weather JSON for ({lat},{lon}) unreadable: {e}")))
    }
}
