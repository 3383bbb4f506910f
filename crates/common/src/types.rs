//! Domain types shared across the advisor.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

// ── Categorical inputs ────────────────────────────────────────────────

/// Bass species the angler is targeting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Species {
    Smallmouth,
    Largemouth,
    Spotted,
}

/// Bass-activity phase derived from water temperature and month.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Season {
    Winter,
    PreSpawn,
    Spawn,
    PostSpawn,
    Summer,
    Fall,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cloud {
    Clear,
    Partly,
    Overcast,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Wind {
    Calm,
    Breezy,
    Windy,
}

/// Qualitative water transparency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Clarity {
    Clear,
    Stained,
    Muddy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimeOfDay {
    LowLight,
    Midday,
    Evening,
}

impl Species {
    pub fn as_str(&self) -> &'static str {
        match self {
            Species::Smallmouth => "smallmouth",
            Species::Largemouth => "largemouth",
            Species::Spotted => "spotted",
        }
    }
}

impl Season {
    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::PreSpawn => "pre-spawn",
            Season::Spawn => "spawn",
            Season::PostSpawn => "post-spawn",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }
}

impl Cloud {
    pub fn as_str(&self) -> &'static str {
        match self {
            Cloud::Clear => "clear",
            Cloud::Partly => "partly",
            Cloud::Overcast => "overcast",
        }
    }
}

impl Wind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Wind::Calm => "calm",
            Wind::Breezy => "breezy",
            Wind::Windy => "windy",
        }
    }
}

impl Clarity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Clarity::Clear => "clear",
            Clarity::Stained => "stained",
            Clarity::Muddy => "muddy",
        }
    }
}

impl TimeOfDay {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::LowLight => "low-light",
            TimeOfDay::Midday => "midday",
            TimeOfDay::Evening => "evening",
        }
    }
}

macro_rules! display_as_str {
    ($($ty:ty),*) => {
        $(
            impl fmt::Display for $ty {
                fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                    f.write_str(self.as_str())
                }
            }
        )*
    };
}

display_as_str!(Species, Season, Cloud, Wind, Clarity, TimeOfDay);

impl FromStr for Species {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "smallmouth" => Ok(Species::Smallmouth),
            "largemouth" => Ok(Species::Largemouth),
            "spotted" => Ok(Species::Spotted),
            other => Err(Error::InvalidInput(format!(
                "unknown species '{other}' (expected smallmouth, largemouth, spotted)"
            ))),
        }
    }
}

impl FromStr for Clarity {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "clear" => Ok(Clarity::Clear),
            "stained" => Ok(Clarity::Stained),
            "muddy" => Ok(Clarity::Muddy),
            other => Err(Error::InvalidInput(format!(
                "unknown clarity '{other}' (expected clear, stained, muddy)"
            ))),
        }
    }
}

// ── Request / result types ────────────────────────────────────────────

/// Conditions for a single recommendation request. Built per request and
/// sent verbatim to the local model.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Conditions {
    pub species: Species,
    pub season: Season,
    #[serde(rename = "airTempF", default)]
    pub air_temp_f: Option<f64>,
    #[serde(rename = "waterTempF", default, skip_serializing_if = "Option::is_none")]
    pub water_temp_f: Option<f64>,
    pub cloud: Cloud,
    pub wind: Wind,
    #[serde(rename = "waterClarity", default, skip_serializing_if = "Option::is_none")]
    pub clarity: Option<Clarity>,
    #[serde(rename = "timeOfDay")]
    pub time_of_day: TimeOfDay,
    pub lat: f64,
    pub lon: f64,
    #[serde(rename = "locationName", default)]
    pub location_name: String,
}

/// A single lure/color/weight/technique recommendation.
///
/// Equality and hashing cover all four fields; the recommender relies on
/// that for de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Pick {
    pub lure: String,
    pub color: String,
    #[serde(default)]
    pub weight: String,
    pub technique: String,
}

impl Pick {
    pub fn new(
        lure: impl Into<String>,
        color: impl Into<String>,
        weight: impl Into<String>,
        technique: impl Into<String>,
    ) -> Self {
        Self {
            lure: lure.into(),
            color: color.into(),
            weight: weight.into(),
            technique: technique.into(),
        }
    }
}

/// Ordered picks (at most four) plus advisory notes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Recommendation {
    pub picks: Vec<Pick>,
    pub notes: Vec<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_conditions_wire_names() {
        let conditions = Conditions {
            species: Species::Smallmouth,
            season: Season::PreSpawn,
            air_temp_f: Some(58.2),
            water_temp_f: Some(50.0),
            cloud: Cloud::Partly,
            wind: Wind::Breezy,
            clarity: Some(Clarity::Stained),
            time_of_day: TimeOfDay::LowLight,
            lat: 40.0,
            lon: -75.0,
            location_name: "Philadelphia, US".into(),
        };

        let value = serde_json::to_value(&conditions).expect("conditions serialize");
        assert_eq!(value["species"], "smallmouth");
        assert_eq!(value["season"], "pre-spawn");
        assert_eq!(value["airTempF"], 58.2);
        assert_eq!(value["waterTempF"], 50.0);
        assert_eq!(value["waterClarity"], "stained");
        assert_eq!(value["timeOfDay"], "low-light");
        assert_eq!(value["locationName"], "Philadelphia, US");
    }

    #[test]
    fn test_conditions_optional_fields_absent() {
        let raw = r#"{
            "species": "spotted",
            "season": "post-spawn",
            "cloud": "overcast",
            "wind": "calm",
            "timeOfDay": "midday",
            "lat": 34.1,
            "lon": -84.2
        }"#;
        let parsed: Conditions = serde_json::from_str(raw).expect("conditions should deserialize");
        assert_eq!(parsed.season, Season::PostSpawn);
        assert!(parsed.air_temp_f.is_none());
        assert!(parsed.water_temp_f.is_none());
        assert!(parsed.clarity.is_none());
        assert!(parsed.location_name.is_empty());
    }

    #[test]
    fn test_unknown_species_rejected() {
        let raw = r#"{"species":"striper","season":"fall","cloud":"clear","wind":"calm",
            "timeOfDay":"midday","lat":0,"lon":0}"#;
        assert!(serde_json::from_str::<Conditions>(raw).is_err());
        assert!("striper".parse::<Species>().is_err());
        assert_eq!("Largemouth".parse::<Species>().unwrap(), Species::Largemouth);
    }

    #[test]
    fn test_display_matches_wire() {
        assert_eq!(Season::PostSpawn.to_string(), "post-spawn");
        assert_eq!(TimeOfDay::LowLight.to_string(), "low-light");
        assert_eq!(Clarity::Muddy.to_string(), "muddy");
    }
}
