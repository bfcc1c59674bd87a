use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use crate::errors::CoreError;
use crate::models::item::MappingEntry;
use crate::models::price::{PriceSnapshot, SnapshotWindow};
use crate::models::recipe::Recipe;
use crate::models::tax::TaxExemptSet;
use crate::providers::registry::SourceRegistry;
use crate::providers::traits::MarketDataSource;

/// Seconds between automatic refreshes.
pub const REFRESH_INTERVAL_SECS: u32 = 299;

/// Everything a full refresh downloads, fetched together so it is consistent.
#[derive(Debug, Clone, Default)]
pub struct MarketData {
    pub mapping: Vec<MappingEntry>,
    /// Ordered as `SnapshotWindow::ALL`: latest first.
    pub snapshots: Vec<PriceSnapshot>,
    pub recipes: Vec<Recipe>,
}

/// Downloads market data from the registered sources.
///
/// Each operation tries sources in registration order and returns the first
/// success. Within one source, the mapping, all seven snapshots and the
/// recipe list are fetched concurrently and only returned if every request
/// succeeded; a partial data set is never handed back.
pub struct RefreshService {
    registry: SourceRegistry,
}

impl RefreshService {
    pub fn new(registry: SourceRegistry) -> Self {
        Self { registry }
    }

    pub fn source_names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Whether prices must be re-downloaded, given the locally recorded and
    /// remote data set timestamps. An unknown remote timestamp means "yes".
    pub fn needs_fetch(local: Option<DateTime<Utc>>, remote: Option<DateTime<Utc>>) -> bool {
        match (local, remote) {
            (_, None) | (None, _) => true,
            (Some(local), Some(remote)) => remote > local,
        }
    }

    /// Remote data set timestamp, or `None` if no source could report one.
    pub async fn remote_timestamp(&self) -> Option<DateTime<Utc>> {
        for source in self.registry.sources() {
            match source.fetch_last_fetched().await {
                Ok(ts) => return Some(ts),
                Err(e) => warn!(source = source.name(), error = %e, "could not read last fetched time"),
            }
        }
        None
    }

    /// Fetch mapping, snapshots and recipes.
    pub async fn fetch_market(&self) -> Result<MarketData, CoreError> {
        let mut last_error = None;
        for source in self.registry.sources() {
            match Self::fetch_from(source).await {
                Ok(data) => {
                    info!(
                        source = source.name(),
                        items = data.mapping.len(),
                        recipes = data.recipes.len(),
                        "market data fetched"
                    );
                    return Ok(data);
                }
                Err(e) => {
                    warn!(source = source.name(), error = %e, "market data fetch failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(CoreError::NoSource))
    }

    /// Fetch only the recipe list.
    pub async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CoreError> {
        let mut last_error = None;
        for source in self.registry.sources() {
            match source.fetch_recipes().await {
                Ok(recipes) => return Ok(recipes),
                Err(e) => {
                    warn!(source = source.name(), error = %e, "recipe fetch failed");
                    last_error = Some(e);
                }
            }
        }
        Err(last_error.unwrap_or(CoreError::NoSource))
    }

    /// Fetch the tax exemption list. Never fails: with no source able to
    /// provide it, nothing is exempt.
    pub async fn fetch_tax_exempt(&self) -> TaxExemptSet {
        for source in self.registry.sources() {
            match source.fetch_tax_exempt().await {
                Ok(set) => {
                    debug!(source = source.name(), entries = set.len(), "loaded tax exempt items");
                    return set;
                }
                Err(e) => warn!(
                    source = source.name(),
                    error = %e,
                    "failed to load tax exempt items"
                ),
            }
        }
        warn!("no tax exempt list available, treating every item as taxable");
        TaxExemptSet::new()
    }

    async fn fetch_from(source: &dyn MarketDataSource) -> Result<MarketData, CoreError> {
        let (mapping, latest, m5, m10, m30, h1, h6, h24, recipes) = tokio::try_join!(
            source.fetch_mapping(),
            source.fetch_snapshot(SnapshotWindow::Latest),
            source.fetch_snapshot(SnapshotWindow::FiveMinutes),
            source.fetch_snapshot(SnapshotWindow::TenMinutes),
            source.fetch_snapshot(SnapshotWindow::ThirtyMinutes),
            source.fetch_snapshot(SnapshotWindow::OneHour),
            source.fetch_snapshot(SnapshotWindow::SixHours),
            source.fetch_snapshot(SnapshotWindow::TwentyFourHours),
            source.fetch_recipes(),
        )?;

        Ok(MarketData {
            mapping,
            snapshots: vec![latest, m5, m10, m30, h1, h6, h24],
            recipes,
        })
    }
}

/// Countdown driving automatic refreshes, one tick per second.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RefreshSchedule {
    remaining: u32,
}

impl RefreshSchedule {
    pub fn new() -> Self {
        Self {
            remaining: REFRESH_INTERVAL_SECS,
        }
    }

    pub fn remaining(&self) -> u32 {
        self.remaining
    }

    /// Restart the countdown from the full interval.
    pub fn reset(&mut self) {
        self.remaining = REFRESH_INTERVAL_SECS;
    }

    /// Advance one second. Returns `true` when the countdown hits zero, in
    /// which case it has already restarted.
    pub fn tick(&mut self) -> bool {
        self.remaining = self.remaining.saturating_sub(1);
        if self.remaining == 0 {
            self.reset();
            true
        } else {
            false
        }
    }
}

impl Default for RefreshSchedule {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RefreshSchedule {
    /// `(m:ss)`, e.g. `(4:59)`.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}:{:02})", self.remaining / 60, self.remaining % 60)
    }
}
