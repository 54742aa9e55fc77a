use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use tokio::sync::Mutex;
use tracing::debug;

use crate::client::{FetchError, WeatherSource};
use crate::model::WeatherQuery;
use crate::render::{RenderPlan, build_plan};
use crate::settings::Settings;

/// Coordinates fetch-and-render cycles against a [`WeatherSource`].
///
/// Cycles are serialized so two fetches never interleave their display
/// updates, and each cycle is generation-stamped: a result that finishes
/// after a newer cycle was requested is discarded instead of overwriting
/// the newer display.
#[derive(Debug)]
pub struct WeatherService {
    source: Arc<dyn WeatherSource>,
    fetch_lock: Mutex<()>,
    latest: AtomicU64,
}

impl WeatherService {
    pub fn new(source: Arc<dyn WeatherSource>) -> Self {
        Self { source, fetch_lock: Mutex::new(()), latest: AtomicU64::new(0) }
    }

    /// Run one fetch-and-render cycle.
    ///
    /// Returns `Ok(None)` when a newer cycle was requested while this one was
    /// in flight; the stale result carries no plan. A failed fetch surfaces
    /// the [`FetchError`] and leaves whatever the caller last displayed
    /// untouched.
    pub async fn refresh(
        &self,
        query: &WeatherQuery,
        settings: &Settings,
    ) -> Result<Option<RenderPlan>, FetchError> {
        let generation = self.latest.fetch_add(1, Ordering::SeqCst) + 1;

        let _guard = self.fetch_lock.lock().await;
        let snapshot = self.source.fetch(query).await?;

        if self.latest.load(Ordering::SeqCst) != generation {
            debug!(generation, location = %query.location, "discarding stale fetch result");
            return Ok(None);
        }

        Ok(Some(build_plan(&snapshot, settings)))
    }
}
