//! Client-side advisory flow: weather → conditions → local AI, falling back
//! to the rule engine when the model is unavailable.

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use chrono::{Datelike, Local, NaiveDateTime, Timelike};
use common::{Clarity, Conditions, Pick, Species};
use lure_engine::{classify_cloud, classify_wind, infer_season, recommend, time_of_day, RuleInput};
use ollama_client::AiRecommendation;
use serde_json::Value;
use tracing::{info, warn};

pub const FALLBACK_STATUS: &str = "(Local AI unavailable — showing rule-based picks)";

const CLIENT_TIMEOUT_SECS: u64 = 130;

/// What the angler supplies.
#[derive(Debug, Clone, PartialEq)]
pub struct AdviseRequest {
    pub lat: f64,
    pub lon: f64,
    pub species: Species,
    pub water_temp_f: Option<f64>,
    pub clarity: Option<Clarity>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PickSource {
    LocalAi,
    Rules,
}

/// Final advice shown to the angler.
#[derive(Debug, Clone, PartialEq)]
pub struct Advice {
    pub conditions: Conditions,
    pub picks: Vec<Pick>,
    pub notes: Vec<String>,
    pub source: PickSource,
    pub status: Option<String>,
}

/// HTTP client for a running `bass-advisor serve` instance.
pub struct AdvisorClient {
    client: reqwest::Client,
    base_url: String,
}

impl AdvisorClient {
    pub fn new(base_url: &str) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(CLIENT_TIMEOUT_SECS))
            .build()
            .context("failed to build advisor HTTP client")?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub async fn fetch_weather(&self, lat: f64, lon: f64) -> Result<Value> {
        let response = self
            .client
            .get(format!("{}/api/weather", self.base_url))
            .query(&[("lat", lat.to_string()), ("lon", lon.to_string())])
            .header("accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(anyhow!("Weather error ({}): {}", status.as_u16(), body));
        }
        Ok(response.json().await?)
    }

    pub async fn ask_ai(&self, conditions: &Conditions) -> Result<AiRecommendation> {
        let response = self
            .client
            .post(format!("{}/ai-recommend", self.base_url))
            .json(conditions)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(anyhow!("AI HTTP {}: {}", status.as_u16(), text));
        }
        let body: Value = response.json().await?;
        Ok(AiRecommendation::from_value(&body))
    }

    /// Run the full flow. Weather failures abort; AI failures fall back.
    pub async fn advise(&self, request: &AdviseRequest) -> Result<Advice> {
        info!("Fetching weather for {:.3},{:.3}", request.lat, request.lon);
        let weather = self.fetch_weather(request.lat, request.lon).await?;
        let conditions = derive_conditions(request, &weather, Local::now().naive_local());

        info!(
            "Asking local AI: {} / {} ({})",
            conditions.species, conditions.season, conditions.location_name
        );
        let ai = self.ask_ai(&conditions).await;
        Ok(resolve(conditions, ai))
    }
}

/// Build request conditions from the weather payload and local time.
pub fn derive_conditions(
    request: &AdviseRequest,
    weather: &Value,
    now: NaiveDateTime,
) -> Conditions {
    let air_temp_f = weather["main"]["temp"].as_f64();
    let wind_mph = weather["wind"]["speed"].as_f64().unwrap_or(0.0);
    let cloud_pct = weather["clouds"]["all"].as_f64().unwrap_or(0.0);

    Conditions {
        species: request.species,
        season: infer_season(now.month(), air_temp_f, request.water_temp_f),
        air_temp_f,
        water_temp_f: request.water_temp_f,
        cloud: classify_cloud(cloud_pct),
        wind: classify_wind(wind_mph),
        clarity: request.clarity,
        time_of_day: time_of_day(now.hour()),
        lat: request.lat,
        lon: request.lon,
        location_name: location_name(weather),
    }
}

/// "City, CC", whichever parts are present, or "Your area".
pub fn location_name(weather: &Value) -> String {
    let parts: Vec<&str> = [weather["name"].as_str(), weather["sys"]["country"].as_str()]
        .into_iter()
        .flatten()
        .filter(|part| !part.is_empty())
        .collect();

    if parts.is_empty() {
        "Your area".to_string()
    } else {
        parts.join(", ")
    }
}

/// Map model picks onto the display shape. Explicit notes win over the
/// first recommendation's `why`.
pub fn picks_from_ai(ai: AiRecommendation) -> (Vec<Pick>, Vec<String>) {
    let mut recommendations = ai.recommendations;
    let notes = match ai.notes {
        Some(notes) => notes,
        None => recommendations
            .first_mut()
            .and_then(|first| first.why.take())
            .map(|why| why.into_lines())
            .unwrap_or_default(),
    };

    let picks = recommendations
        .into_iter()
        .map(|r| Pick {
            lure: r.lure,
            color: r.color.unwrap_or_default(),
            weight: r.weight.unwrap_or_default(),
            technique: r.technique,
        })
        .collect();
    (picks, notes)
}

/// Choose between the model's answer and the rule engine.
pub fn resolve(conditions: Conditions, ai: Result<AiRecommendation>) -> Advice {
    match ai {
        Ok(recommendation) => {
            let (picks, notes) = picks_from_ai(recommendation);
            Advice {
                conditions,
                picks,
                notes,
                source: PickSource::LocalAi,
                status: None,
            }
        }
        Err(e) => {
            warn!("Local AI failed, using rule engine: {:#}", e);
            let rules = recommend(&RuleInput {
                species: conditions.species,
                season: conditions.season,
                clarity: conditions.clarity,
                cloud: conditions.cloud,
                wind: conditions.wind,
                water_temp_f: conditions.water_temp_f,
            });
            Advice {
                conditions,
                picks: rules.picks,
                notes: rules.notes,
                source: PickSource::Rules,
                status: Some(FALLBACK_STATUS.to_string()),
            }
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Plain-text report.
pub fn render(advice: &Advice) -> String {
    let c = &advice.conditions;
    let mut out = String::new();

    let _ = writeln!(out, "Today's Conditions");
    let _ = writeln!(out, "  {}", c.location_name);
    let _ = writeln!(out, "  Season: {}", capitalize(c.season.as_str()));
    match c.air_temp_f {
        Some(t) => {
            let _ = writeln!(out, "  Air: {}°F", t.round());
        }
        None => {
            let _ = writeln!(out, "  Air: n/a");
        }
    }
    if let Some(t) = c.water_temp_f {
        let _ = writeln!(out, "  Water: {}°F", t.round());
    }
    let _ = writeln!(out, "  Clouds: {}", capitalize(c.cloud.as_str()));
    let _ = writeln!(out, "  Wind: {}", capitalize(c.wind.as_str()));

    let _ = writeln!(out);
    let _ = writeln!(out, "Recommendations");
    for pick in &advice.picks {
        let _ = writeln!(out, "- {}", pick.lure);
        let detail: Vec<&str> = [pick.color.as_str(), pick.weight.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        if !detail.is_empty() {
            let _ = writeln!(out, "    {}", detail.join(" • "));
        }
        let _ = writeln!(out, "    {}", pick.technique);
    }

    if !advice.notes.is_empty() {
        let _ = writeln!(out);
        let _ = writeln!(out, "Why these work");
        for note in &advice.notes {
            let _ = writeln!(out, "  • {}", note);
        }
    }

    if let Some(status) = &advice.status {
        let _ = writeln!(out);
        let _ = writeln!(out, "{}", status);
    }
    out
}
