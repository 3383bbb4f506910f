//! HTTP server: weather proxy and local-model recommendation endpoints.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use axum::{
    extract::{rejection::JsonRejection, ConnectInfo, Query, State},
    http::{header, HeaderMap, HeaderValue, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use common::{AppConfig, Conditions, Error};
use ollama_client::{AiError, OllamaClient};
use openweather_client::{
    InMemoryWeatherCache, OpenWeatherClient, RateLimiter, WeatherGateway, WeatherSource,
};
use serde_json::json;
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

/// Application state shared across handlers.
pub struct AppState {
    pub weather: WeatherGateway,
    pub ai: OllamaClient,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        let source = OpenWeatherClient::new(&config.weather)?;
        let ai = OllamaClient::new(&config.model)?;
        Ok(Self::with_source(config, Arc::new(source), ai))
    }

    /// Build state around an arbitrary upstream weather source.
    pub fn with_source(
        config: &AppConfig,
        source: Arc<dyn WeatherSource>,
        ai: OllamaClient,
    ) -> Self {
        let limiter = RateLimiter::new(
            Duration::from_secs(config.weather.rate_window_secs),
            config.weather.rate_limit,
        );
        let weather = WeatherGateway::new(
            source,
            Arc::new(InMemoryWeatherCache::new()),
            limiter,
            Duration::from_secs(config.weather.cache_ttl_secs),
        );
        Self { weather, ai }
    }
}

type AppStateArc = Arc<AppState>;

// ============================================================================
// Errors
// ============================================================================

/// Error body returned by every endpoint: `{error, upstream?}`.
#[derive(Debug)]
pub struct ApiError {
    status: StatusCode,
    message: String,
    upstream: Option<serde_json::Value>,
}

impl From<Error> for ApiError {
    fn from(err: Error) -> Self {
        let status =
            StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let upstream = match &err {
            Error::Upstream { body, .. } => Some(
                serde_json::from_str(body)
                    .unwrap_or_else(|_| serde_json::Value::String(body.clone())),
            ),
            _ => None,
        };
        Self {
            status,
            message: err.to_string(),
            upstream,
        }
    }
}

impl From<AiError> for ApiError {
    fn from(err: AiError) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: err.to_string(),
            upstream: None,
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: rejection.body_text(),
            upstream: None,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            error!("{} {}", self.status.as_u16(), self.message);
        } else {
            warn!("{} {}", self.status.as_u16(), self.message);
        }

        let mut body = json!({ "error": self.message });
        if let Some(upstream) = self.upstream {
            body["upstream"] = upstream;
        }
        (self.status, Json(body)).into_response()
    }
}

// ============================================================================
// Routes
// ============================================================================

pub fn router(state: AppStateArc) -> Router {
    Router::new()
        .route("/api/weather", get(weather))
        .route("/ai-recommend", post(ai_recommend))
        .route("/health", get(health))
        .with_state(state)
        .layer(cors_layer())
        .layer(TraceLayer::new_for_http())
}

fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(|origin: &HeaderValue, _| {
            origin.to_str().map(is_local_origin).unwrap_or(false)
        }))
        .allow_methods([Method::GET, Method::POST])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT])
}

/// `http://localhost:<port>` or `http://127.0.0.1:<port>`.
fn is_local_origin(origin: &str) -> bool {
    ["http://localhost:", "http://127.0.0.1:"]
        .iter()
        .filter_map(|prefix| origin.strip_prefix(prefix))
        .any(|port| !port.is_empty() && port.bytes().all(|b| b.is_ascii_digit()))
}

/// Client id for rate limiting: first forwarded-for hop, else socket address.
fn client_id(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    if let Some(forwarded) = headers.get("x-forwarded-for") {
        if let Ok(forwarded_str) = forwarded.to_str() {
            if let Some(first_ip) = forwarded_str.split(',').next() {
                let first_ip = first_ip.trim();
                if !first_ip.is_empty() {
                    return first_ip.to_string();
                }
            }
        }
    }

    peer.map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string())
}

async fn weather(
    State(state): State<AppStateArc>,
    connect: Option<ConnectInfo<SocketAddr>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let client = client_id(&headers, connect.map(|ConnectInfo(addr)| addr));
    let payload = state
        .weather
        .fetch(
            &client,
            params.get("lat").map(String::as_str),
            params.get("lon").map(String::as_str),
        )
        .await?;
    Ok(Json(payload))
}

async fn ai_recommend(
    State(state): State<AppStateArc>,
    body: Result<Json<Conditions>, JsonRejection>,
) -> Result<Json<serde_json::Value>, ApiError> {
    let Json(conditions) = body?;
    info!(
        "AI recommend: {} / {} at {}",
        conditions.species, conditions.season, conditions.location_name
    );
    let recommendation = state.ai.recommend(&conditions).await?;
    Ok(Json(recommendation))
}

async fn health(State(state): State<AppStateArc>) -> Json<serde_json::Value> {
    Json(json!({ "status": "ok", "model": state.ai.model() }))
}

/// Run the HTTP server until the process is stopped.
pub async fn run(config: AppConfig) -> Result<()> {
    let state = Arc::new(AppState::from_config(&config)?);
    let app = router(state);

    let addr = format!("{}:{}", config.server.bind_addr, config.server.port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(
        "Listening on http://{} using model {}",
        addr, config.model.model
    );

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;
    Ok(())
}
