use anyhow::Context;
use async_trait::async_trait;
use chrono::{NaiveDate, Utc};
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::model::{CurrentConditions, ForecastDay, Location, WeatherQuery, WeatherSnapshot};

pub const DEFAULT_BASE_URL: &str = "http://api.weatherapi.com/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Why a fetch cycle failed. Both requests must succeed; the first failure
/// aborts the cycle and no partial snapshot is surfaced. None of these are
/// retried automatically.
#[derive(Debug, Error)]
pub enum FetchError {
    /// The request never completed (connect failure, timeout, broken body).
    #[error("request to {endpoint} did not complete: {source}")]
    Network {
        endpoint: &'static str,
        #[source]
        source: reqwest::Error,
    },

    /// The provider answered with a non-200 status.
    #[error("{endpoint} request failed with status {status}: {body}")]
    HttpStatus {
        endpoint: &'static str,
        status: StatusCode,
        body: String,
    },

    /// The body was not valid JSON or was missing expected fields.
    #[error("failed to parse {endpoint} response: {detail}")]
    Parse {
        endpoint: &'static str,
        detail: String,
    },
}

impl FetchError {
    /// HTTP status carried by the error, if the provider answered at all.
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            FetchError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Anything that can produce a [`WeatherSnapshot`] for a query. The service
/// depends on this seam rather than on the HTTP client directly.
#[async_trait]
pub trait WeatherSource: Send + Sync + std::fmt::Debug {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError>;
}

/// HTTP client for WeatherAPI.com.
#[derive(Debug, Clone)]
pub struct WeatherApiClient {
    api_key: String,
    base_url: String,
    http: Client,
}

impl WeatherApiClient {
    pub fn new(api_key: String) -> anyhow::Result<Self> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client for WeatherAPI.com")?;

        Ok(Self { api_key, base_url: DEFAULT_BASE_URL.to_string(), http })
    }

    /// Override the endpoint base, e.g. to point at a mock server in tests.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &'static str,
        query: &WeatherQuery,
    ) -> Result<T, FetchError> {
        let url = format!("{}/{}", self.base_url, endpoint);
        let days = query.days.to_string();

        debug!(endpoint, location = %query.location, days = %days, "fetching weather");

        // Both endpoints take the same parameter set.
        let res = self
            .http
            .get(&url)
            .query(&[
                ("key", self.api_key.as_str()),
                ("q", query.location.as_str()),
                ("days", days.as_str()),
                ("aqi", "yes"),
            ])
            .send()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        let status = res.status();
        let body = res
            .text()
            .await
            .map_err(|source| FetchError::Network { endpoint, source })?;

        if !status.is_success() {
            return Err(FetchError::HttpStatus { endpoint, status, body: truncate_body(&body) });
        }

        serde_json::from_str(&body)
            .map_err(|e| FetchError::Parse { endpoint, detail: e.to_string() })
    }

    async fn fetch_current(
        &self,
        query: &WeatherQuery,
    ) -> Result<(Location, CurrentConditions), FetchError> {
        let parsed: WaCurrentResponse = self.get_json("current.json", query).await?;

        let location =
            Location { name: parsed.location.name, country: parsed.location.country };

        let current = CurrentConditions {
            temp_c: parsed.current.temp_c,
            condition: parsed.current.condition.text,
            humidity_pct: parsed.current.humidity,
            wind_kph: parsed.current.wind_kph,
            feelslike_c: parsed.current.feelslike_c,
            uv: parsed.current.uv,
        };

        Ok((location, current))
    }

    async fn fetch_forecast(&self, query: &WeatherQuery) -> Result<Vec<ForecastDay>, FetchError> {
        let parsed: WaForecastResponse = self.get_json("forecast.json", query).await?;

        let days = parsed
            .forecast
            .forecastday
            .into_iter()
            .map(|entry| ForecastDay {
                date: entry.date,
                max_temp_c: entry.day.maxtemp_c,
                min_temp_c: entry.day.mintemp_c,
                condition: entry.day.condition.text,
            })
            .collect();

        Ok(clamp_forecast(days, query.days))
    }
}

#[async_trait]
impl WeatherSource for WeatherApiClient {
    async fn fetch(&self, query: &WeatherQuery) -> Result<WeatherSnapshot, FetchError> {
        // The two requests are independent; issue them concurrently and join
        // both before anything is surfaced.
        let ((location, current), forecast) =
            tokio::try_join!(self.fetch_current(query), self.fetch_forecast(query))?;

        Ok(WeatherSnapshot { location, current, forecast, fetched_at: Utc::now() })
    }
}

/// The provider occasionally returns more days than asked for; keep exactly
/// the requested count. Fewer days is surfaced as-is, the display just shows
/// a shorter row.
fn clamp_forecast(mut days: Vec<ForecastDay>, requested: u8) -> Vec<ForecastDay> {
    let requested = usize::from(requested);

    if days.len() > requested {
        days.truncate(requested);
    } else if days.len() < requested {
        warn!(
            requested,
            returned = days.len(),
            "provider returned fewer forecast days than requested"
        );
    }

    days
}

fn truncate_body(body: &str) -> String {
    const MAX: usize = 200;
    if body.len() > MAX { format!("{}...", &body[..MAX]) } else { body.to_string() }
}

#[derive(Debug, Deserialize)]
struct WaLocation {
    name: String,
    country: String,
}

#[derive(Debug, Deserialize)]
struct WaCondition {
    text: String,
}

#[derive(Debug, Deserialize)]
struct WaCurrent {
    temp_c: f64,
    feelslike_c: f64,
    humidity: u8,
    wind_kph: f64,
    uv: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaCurrentResponse {
    location: WaLocation,
    current: WaCurrent,
}

#[derive(Debug, Deserialize)]
struct WaDaySummary {
    maxtemp_c: f64,
    mintemp_c: f64,
    condition: WaCondition,
}

#[derive(Debug, Deserialize)]
struct WaForecastEntry {
    date: NaiveDate,
    day: WaDaySummary,
}

#[derive(Debug, Deserialize)]
struct WaForecast {
    forecastday: Vec<WaForecastEntry>,
}

#[derive(Debug, Deserialize)]
struct WaForecastResponse {
    forecast: WaForecast,
}
