//! Core library for the `skycast` weather viewer.
//!
//! This crate defines:
//! - Configuration & credentials handling
//! - The WeatherAPI.com client and its error taxonomy
//! - User-adjustable viewer settings
//! - The render-plan projection and the refresh coordinator
//!
//! It is used by `skycast-cli`, but can also be reused by other front-ends.

pub mod client;
pub mod config;
pub mod model;
pub mod render;
pub mod service;
pub mod settings;

pub use client::{DEFAULT_BASE_URL, FetchError, WeatherApiClient, WeatherSource};
pub use config::{API_KEY_ENV, Config};
pub use model::{CurrentConditions, ForecastDay, Location, WeatherQuery, WeatherSnapshot};
pub use render::{CurrentPanel, ForecastCard, Metric, RenderPlan, build_plan};
pub use service::WeatherService;
pub use settings::{Settings, SettingsUpdate, TemperatureUnit, Theme};
