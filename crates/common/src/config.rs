//! Service configuration types.

use serde::{Deserialize, Serialize};

/// Top-level service configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// HTTP listener settings.
    #[serde(default)]
    pub server: ServerConfig,

    /// Upstream weather settings.
    #[serde(default)]
    pub weather: WeatherConfig,

    /// Local language model settings.
    #[serde(default)]
    pub model: ModelConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind. Localhost only unless overridden.
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

/// Weather gateway settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WeatherConfig {
    /// OpenWeatherMap API key. Only the weather endpoint needs it.
    #[serde(default)]
    pub api_key: String,

    #[serde(default = "default_weather_url")]
    pub base_url: String,

    /// Cache lifetime for a rounded coordinate pair (seconds).
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_secs: u64,

    /// Fixed rate-limit window (seconds).
    #[serde(default = "default_rate_window")]
    pub rate_window_secs: u64,

    /// Requests allowed per client per window.
    #[serde(default = "default_rate_limit")]
    pub rate_limit: u32,

    #[serde(default = "default_weather_timeout")]
    pub timeout_secs: u64,
}

/// Local model (Ollama) settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    #[serde(default = "default_model")]
    pub model: String,

    /// Chat endpoint, e.g. `http://localhost:11434/api/chat`.
    #[serde(default = "default_ollama_url")]
    pub url: String,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_num_ctx")]
    pub num_ctx: u32,

    #[serde(default = "default_model_timeout")]
    pub timeout_ms: u64,
}

// ── Defaults ──────────────────────────────────────────────────────────

fn default_bind_addr() -> String {
    "127.0.0.1".into()
}
fn default_port() -> u16 {
    3000
}

fn default_weather_url() -> String {
    "https://api.openweathermap.org/data/2.5/weather".into()
}
fn default_cache_ttl() -> u64 {
    600
}
fn default_rate_window() -> u64 {
    60
}
fn default_rate_limit() -> u32 {
    30
}
fn default_weather_timeout() -> u64 {
    15
}

fn default_model() -> String {
    "phi3:3.8b".into()
}
fn default_ollama_url() -> String {
    "http://localhost:11434/api/chat".into()
}
fn default_temperature() -> f64 {
    0.6
}
fn default_num_ctx() -> u32 {
    4096
}
fn default_model_timeout() -> u64 {
    120_000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            port: default_port(),
        }
    }
}

impl Default for WeatherConfig {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            base_url: default_weather_url(),
            cache_ttl_secs: default_cache_ttl(),
            rate_window_secs: default_rate_window(),
            rate_limit: default_rate_limit(),
            timeout_secs: default_weather_timeout(),
        }
    }
}

impl Default for ModelConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            url: default_ollama_url(),
            temperature: default_temperature(),
            num_ctx: default_num_ctx(),
            timeout_ms: default_model_timeout(),
        }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig::default(),
            weather: WeatherConfig::default(),
            model: ModelConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.server.port, 3000);
        assert_eq!(config.model.model, "phi3:3.8b");
        assert_eq!(config.model.url, "http://localhost:11434/api/chat");
        assert_eq!(config.weather.cache_ttl_secs, 600);
        assert_eq!(config.weather.rate_limit, 30);
        assert_eq!(config.weather.rate_window_secs, 60);
        assert!(config.weather.api_key.is_empty());
    }

    #[test]
    fn test_partial_document_uses_defaults() {
        let parsed: AppConfig = serde_json::from_str(r#"{"server":{"port":8080}}"#)
            .expect("partial config should deserialize");
        assert_eq!(parsed.server.port, 8080);
        assert_eq!(parsed.server.bind_addr, "127.0.0.1");
        assert!((parsed.model.temperature - 0.6).abs() < f64::EPSILON);
        assert_eq!(parsed.model.num_ctx, 4096);
    }
}
