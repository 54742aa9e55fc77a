//! Projection of a [`WeatherSnapshot`] into a renderer-agnostic plan.
//!
//! The plan is a static description of what the display should show. It does
//! no aggregation or filtering, and rebuilding it always replaces the whole
//! previous plan.

use serde::{Deserialize, Serialize};

use crate::model::{ForecastDay, WeatherSnapshot};
use crate::settings::{Settings, TemperatureUnit, Theme};

/// One labeled value in the current-conditions metric row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metric {
    pub label: String,
    pub value: String,
}

/// The current-conditions panel: location line, large temperature reading,
/// condition text, and the four-metric row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CurrentPanel {
    pub location: String,
    pub temperature: String,
    pub condition: String,
    pub metrics: Vec<Metric>,
}

/// One forecast card: abbreviated weekday, high, low, condition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ForecastCard {
    pub weekday: String,
    pub high: String,
    pub low: String,
    pub condition: String,
}

/// Everything the display needs for one refresh, decoupled from any toolkit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RenderPlan {
    pub theme: Theme,
    pub transparency: f64,
    pub current: CurrentPanel,
    pub forecast: Vec<ForecastCard>,
}

/// Build the render plan for one snapshot under the given settings.
///
/// Stored values are Celsius; the settings' unit is applied here and only
/// here, at format time.
pub fn build_plan(snapshot: &WeatherSnapshot, settings: &Settings) -> RenderPlan {
    let unit = settings.temp_unit;
    let current = &snapshot.current;

    let metrics = vec![
        Metric { label: "Humidity".to_string(), value: format!("{}%", current.humidity_pct) },
        Metric { label: "Wind".to_string(), value: format!("{} km/h", current.wind_kph) },
        Metric { label: "Feels Like".to_string(), value: format_temp(current.feelslike_c, unit) },
        Metric { label: "UV Index".to_string(), value: format!("{}", current.uv) },
    ];

    let panel = CurrentPanel {
        location: snapshot.location.to_string(),
        temperature: format_temp(current.temp_c, unit),
        condition: current.condition.clone(),
        metrics,
    };

    let forecast = snapshot
        .forecast
        .iter()
        .map(|day| forecast_card(day, unit))
        .collect();

    RenderPlan {
        theme: settings.theme,
        transparency: settings.transparency,
        current: panel,
        forecast,
    }
}

fn forecast_card(day: &ForecastDay, unit: TemperatureUnit) -> ForecastCard {
    ForecastCard {
        weekday: day.date.format("%a").to_string(),
        high: format_temp(day.max_temp_c, unit),
        low: format_temp(day.min_temp_c, unit),
        condition: day.condition.clone(),
    }
}

/// Format a stored Celsius value in the display unit, one decimal at most.
fn format_temp(temp_c: f64, unit: TemperatureUnit) -> String {
    let shown = (unit.from_celsius(temp_c) * 10.0).round() / 10.0;
    format!("{}{}", shown, unit.suffix())
}
