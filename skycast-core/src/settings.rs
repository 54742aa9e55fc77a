use serde::{Deserialize, Serialize};
use std::convert::TryFrom;

/// Appearance theme for the display layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
    System,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
            Theme::System => "system",
        }
    }
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for Theme {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "dark" => Ok(Theme::Dark),
            "light" => Ok(Theme::Light),
            "system" => Ok(Theme::System),
            _ => Err(anyhow::anyhow!(
                "Unknown theme '{value}'. Supported themes: dark, light, system."
            )),
        }
    }
}

/// Display unit for temperatures. Stored values are always Celsius; this only
/// selects the conversion applied when a value is formatted for display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum TemperatureUnit {
    #[default]
    Celsius,
    Fahrenheit,
}

impl TemperatureUnit {
    pub fn as_str(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "celsius",
            TemperatureUnit::Fahrenheit => "fahrenheit",
        }
    }

    /// Unit suffix shown after a temperature reading.
    pub fn suffix(&self) -> &'static str {
        match self {
            TemperatureUnit::Celsius => "°C",
            TemperatureUnit::Fahrenheit => "°F",
        }
    }

    /// Convert a stored Celsius value into this display unit.
    pub fn from_celsius(&self, temp_c: f64) -> f64 {
        match self {
            TemperatureUnit::Celsius => temp_c,
            TemperatureUnit::Fahrenheit => temp_c * 9.0 / 5.0 + 32.0,
        }
    }
}

impl std::fmt::Display for TemperatureUnit {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<&str> for TemperatureUnit {
    type Error = anyhow::Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        match value.to_lowercase().as_str() {
            "celsius" | "c" => Ok(TemperatureUnit::Celsius),
            "fahrenheit" | "f" => Ok(TemperatureUnit::Fahrenheit),
            _ => Err(anyhow::anyhow!(
                "Unknown temperature unit '{value}'. Supported units: celsius, fahrenheit."
            )),
        }
    }
}

/// Transparency is a window alpha; anything below 0.5 makes the display
/// unreadable, anything above 1.0 is meaningless.
pub const TRANSPARENCY_MIN: f64 = 0.5;
pub const TRANSPARENCY_MAX: f64 = 1.0;

/// User-adjustable viewer settings. In-memory only; mutated exclusively
/// through [`Settings::apply`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub theme: Theme,
    pub temp_unit: TemperatureUnit,
    pub transparency: f64,
    pub auto_refresh: bool,
    pub refresh_interval_min: u32,
    pub weather_alerts: bool,
    pub severe_warnings: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            theme: Theme::Dark,
            temp_unit: TemperatureUnit::Celsius,
            transparency: 0.95,
            auto_refresh: true,
            refresh_interval_min: 30,
            weather_alerts: true,
            severe_warnings: false,
        }
    }
}

/// A single settings mutation, applied through [`Settings::apply`].
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsUpdate {
    Theme(Theme),
    TempUnit(TemperatureUnit),
    Transparency(f64),
    AutoRefresh(bool),
    RefreshIntervalMin(u32),
    WeatherAlerts(bool),
    SevereWarnings(bool),
}

impl Settings {
    /// Apply one update. Transparency is clamped to its valid range rather
    /// than rejected, matching slider semantics.
    pub fn apply(&mut self, update: SettingsUpdate) {
        match update {
            SettingsUpdate::Theme(theme) => self.theme = theme,
            SettingsUpdate::TempUnit(unit) => self.temp_unit = unit,
            SettingsUpdate::Transparency(alpha) => {
                self.transparency = alpha.clamp(TRANSPARENCY_MIN, TRANSPARENCY_MAX);
            }
            SettingsUpdate::AutoRefresh(enabled) => self.auto_refresh = enabled,
            SettingsUpdate::RefreshIntervalMin(minutes) => self.refresh_interval_min = minutes,
            SettingsUpdate::WeatherAlerts(enabled) => self.weather_alerts = enabled,
            SettingsUpdate::SevereWarnings(enabled) => self.severe_warnings = enabled,
        }
    }
}
