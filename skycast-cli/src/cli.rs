use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};
use std::convert::TryFrom;
use std::sync::Arc;
use std::time::Duration;

use skycast_core::{
    API_KEY_ENV, Config, Settings, SettingsUpdate, TemperatureUnit, WeatherApiClient,
    WeatherQuery, WeatherService,
};

use crate::view;

/// Top-level CLI struct.
#[derive(Debug, Parser)]
#[command(name = "skycast", version, about = "Weather viewer for the terminal")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Store the WeatherAPI.com credential and defaults interactively.
    Configure,

    /// Fetch and show the weather once.
    Show {
        /// Location name; falls back to the configured default.
        location: Option<String>,

        /// Forecast length in days.
        #[arg(long)]
        days: Option<u8>,

        /// Display unit, "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,
    },

    /// Refresh on a timer until interrupted.
    Watch {
        /// Location name; falls back to the configured default.
        location: Option<String>,

        /// Forecast length in days.
        #[arg(long)]
        days: Option<u8>,

        /// Display unit, "celsius" or "fahrenheit".
        #[arg(long)]
        unit: Option<String>,

        /// Minutes between refreshes; falls back to the settings default.
        #[arg(long)]
        interval: Option<u32>,
    },
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Command::Configure => configure(),
            Command::Show { location, days, unit } => {
                let app = App::prepare(location, days, unit)?;
                app.show_once().await
            }
            Command::Watch { location, days, unit, interval } => {
                let app = App::prepare(location, days, unit)?;
                app.watch(interval).await
            }
        }
    }
}

fn configure() -> Result<()> {
    let mut config = Config::load()?;

    let api_key = inquire::Password::new("WeatherAPI.com API key:")
        .without_confirmation()
        .prompt()
        .context("Failed to read API key")?;
    config.set_api_key(api_key);

    let location = inquire::Text::new("Default location (blank to skip):")
        .prompt()
        .context("Failed to read default location")?;
    if !location.trim().is_empty() {
        config.location = Some(location.trim().to_string());
    }

    config.save()?;
    println!("Saved configuration to {}", Config::config_file_path()?.display());

    Ok(())
}

/// One prepared viewer session: the service, the effective settings, and the
/// query every refresh uses.
struct App {
    service: WeatherService,
    settings: Settings,
    query: WeatherQuery,
}

impl App {
    fn prepare(location: Option<String>, days: Option<u8>, unit: Option<String>) -> Result<Self> {
        let config = Config::load()?;

        let api_key = std::env::var(API_KEY_ENV).ok().or_else(|| config.api_key.clone());
        let Some(api_key) = api_key else {
            bail!(
                "No API key configured.\n\
                 Hint: run `skycast configure` or set {API_KEY_ENV}."
            );
        };

        let Some(location) = location.or_else(|| config.location.clone()) else {
            bail!(
                "No location given and no default configured.\n\
                 Hint: `skycast show <location>`, or set a default with `skycast configure`."
            );
        };

        let days = days.unwrap_or(config.forecast_days);

        let mut settings = Settings::default();
        if let Some(unit) = unit.as_deref() {
            settings.apply(SettingsUpdate::TempUnit(TemperatureUnit::try_from(unit)?));
        }

        let client = WeatherApiClient::new(api_key)?.with_base_url(config.base_url.clone());
        let service = WeatherService::new(Arc::new(client));

        Ok(Self { service, settings, query: WeatherQuery::new(location, days) })
    }

    async fn show_once(&self) -> Result<()> {
        let plan = self
            .service
            .refresh(&self.query, &self.settings)
            .await
            .with_context(|| format!("Could not fetch weather for '{}'", self.query.location))?;

        if let Some(plan) = plan {
            view::print_plan(&plan);
        }

        Ok(())
    }

    async fn watch(&self, interval_min: Option<u32>) -> Result<()> {
        let minutes = interval_min.unwrap_or(self.settings.refresh_interval_min).max(1);
        let mut ticker = tokio::time::interval(Duration::from_secs(u64::from(minutes) * 60));

        println!("Refreshing '{}' every {minutes} min. Ctrl-C to stop.", self.query.location);

        loop {
            ticker.tick().await;
            match self.service.refresh(&self.query, &self.settings).await {
                Ok(Some(plan)) => {
                    println!("[{}]", chrono::Local::now().format("%H:%M"));
                    view::print_plan(&plan);
                }
                Ok(None) => {}
                // A failed tick keeps the loop alive and the last output on screen.
                Err(err) => eprintln!("refresh failed: {err}"),
            }
        }
    }
}
