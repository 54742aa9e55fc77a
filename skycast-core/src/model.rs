use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// A single fetch request: free-text location plus forecast length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeatherQuery {
    pub location: String,
    pub days: u8,
}

impl WeatherQuery {
    pub fn new(location: impl Into<String>, days: u8) -> Self {
        Self { location: location.into(), days }
    }
}

/// Place the provider resolved the query to. Replaced wholesale on each query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub country: String,
}

impl std::fmt::Display for Location {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}, {}", self.name, self.country)
    }
}

/// Current observed conditions. Temperatures are always stored in Celsius;
/// the display unit is applied by the renderer, never here.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CurrentConditions {
    pub temp_c: f64,
    pub condition: String,
    pub humidity_pct: u8,
    pub wind_kph: f64,
    pub feelslike_c: f64,
    pub uv: f64,
}

/// One calendar day's aggregated high/low/condition summary.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub max_temp_c: f64,
    pub min_temp_c: f64,
    pub condition: String,
}

/// The joined result of one fetch cycle, mapped to domain types.
/// `forecast` keeps the provider's chronological order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeatherSnapshot {
    pub location: Location,
    pub current: CurrentConditions,
    pub forecast: Vec<ForecastDay>,
    pub fetched_at: DateTime<Utc>,
}
