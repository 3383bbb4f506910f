//! Configuration loader: merges env vars, .env file, and config.toml.

use common::config::AppConfig;
use common::Error;
use std::path::Path;

fn parse_positive_u64(raw: &str, env_name: &str) -> Result<u64, Error> {
    let parsed = raw
        .trim()
        .parse::<u64>()
        .map_err(|_| Error::Config(format!("{env_name} must be an integer > 0")))?;
    if parsed == 0 {
        return Err(Error::Config(format!("{env_name} must be an integer > 0")));
    }
    Ok(parsed)
}

fn validate_config(config: &AppConfig) -> Result<(), Error> {
    let mut issues: Vec<String> = Vec::new();

    if config.server.port == 0 {
        issues.push("server.port must be > 0".into());
    }
    if config.server.bind_addr.trim().is_empty() {
        issues.push("server.bind_addr must not be empty".into());
    }

    if config.weather.base_url.trim().is_empty() {
        issues.push("weather.base_url must not be empty".into());
    }
    if config.weather.cache_ttl_secs == 0 {
        issues.push("weather.cache_ttl_secs must be > 0".into());
    }
    if config.weather.rate_window_secs == 0 {
        issues.push("weather.rate_window_secs must be > 0".into());
    }
    if config.weather.rate_limit == 0 {
        issues.push("weather.rate_limit must be > 0".into());
    }
    if config.weather.timeout_secs == 0 {
        issues.push("weather.timeout_secs must be > 0".into());
    }

    if config.model.model.trim().is_empty() {
        issues.push("model.model must not be empty".into());
    }
    if !config.model.url.starts_with("http://") && !config.model.url.starts_with("https://") {
        issues.push("model.url must be an http(s) URL".into());
    }
    if !(0.0..=2.0).contains(&config.model.temperature) {
        issues.push("model.temperature must be in [0,2]".into());
    }
    if config.model.num_ctx == 0 {
        issues.push("model.num_ctx must be > 0".into());
    }
    if config.model.timeout_ms == 0 {
        issues.push("model.timeout_ms must be > 0".into());
    }

    if issues.is_empty() {
        Ok(())
    } else {
        Err(Error::Config(format!(
            "Invalid config:\n - {}",
            issues.join("\n - ")
        )))
    }
}

/// Apply environment overrides on top of file/default values.
fn apply_env_overrides(
    config: &mut AppConfig,
    var: impl Fn(&str) -> Option<String>,
) -> Result<(), Error> {
    if let Some(model) = var("LOCAL_MODEL") {
        config.model.model = model;
    }
    if let Some(url) = var("OLLAMA_URL") {
        config.model.url = url;
    }
    if let Some(key) = var("OPENWEATHER_API_KEY") {
        config.weather.api_key = key;
    }
    if let Some(url) = var("OPENWEATHER_URL") {
        config.weather.base_url = url;
    }
    if let Some(addr) = var("BIND_ADDR") {
        config.server.bind_addr = addr;
    }
    if let Some(port) = var("PORT") {
        let parsed = parse_positive_u64(&port, "PORT")?;
        config.server.port = u16::try_from(parsed)
            .map_err(|_| Error::Config("PORT must be <= 65535".into()))?;
    }
    Ok(())
}

/// Load service configuration from environment and optional config file.
pub fn load_config() -> Result<AppConfig, Error> {
    // 1. Load .env file from project root or parent directories.
    if let Err(e) = dotenvy::dotenv() {
        tracing::debug!("No .env file loaded: {}", e);
    }

    // 2. Start with defaults.
    let mut config = AppConfig::default();

    // 3. Try loading config.toml if it exists.
    let config_path = Path::new("config.toml");
    if config_path.exists() {
        let contents = std::fs::read_to_string(config_path)
            .map_err(|e| Error::Config(format!("Failed to read config.toml: {}", e)))?;
        config = toml::from_str(&contents)
            .map_err(|e| Error::Config(format!("Failed to parse config.toml: {}", e)))?;
    }

    // 4. Override with environment variables (highest priority).
    apply_env_overrides(&mut config, |name| std::env::var(name).ok())?;

    // 5. The weather key is only needed by /api/weather; its absence is
    //    reported per request rather than at startup.
    if config.weather.api_key.trim().is_empty() {
        tracing::warn!("OPENWEATHER_API_KEY is not set; /api/weather will return 500");
    }

    validate_config(&config)?;

    Ok(config)
}
