use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;

use crate::errors::CoreError;
use crate::models::item::MappingEntry;
use crate::models::price::{PriceSnapshot, SnapshotWindow};
use crate::models::recipe::Recipe;
use crate::models::tax::TaxExemptSet;

/// Cache file names shared by every data source.
pub const MAPPING_FILE: &str = "mapping.json";
pub const RECIPES_FILE: &str = "recipes.json";
pub const TAX_EXEMPT_FILE: &str = "taxExemptItems.json";
pub const LAST_FETCHED_FILE: &str = "last_fetched.json";

/// Source of the static market data set: item mapping, price snapshots,
/// recipes, tax exemptions and the data set's timestamp.
///
/// Implementations only fetch and decode; all aggregation happens in the
/// services. Swapping where data lives (HTTP cache, local directory, test
/// fixture) touches nothing else.
#[async_trait]
pub trait MarketDataSource: Send + Sync {
    /// Human-readable name of this source (for logs/errors).
    fn name(&self) -> &str;

    async fn fetch_mapping(&self) -> Result<Vec<MappingEntry>, CoreError>;

    async fn fetch_snapshot(&self, window: SnapshotWindow) -> Result<PriceSnapshot, CoreError>;

    async fn fetch_recipes(&self) -> Result<Vec<Recipe>, CoreError>;

    async fn fetch_tax_exempt(&self) -> Result<TaxExemptSet, CoreError>;

    /// When the upstream data set was last regenerated.
    async fn fetch_last_fetched(&self) -> Result<DateTime<Utc>, CoreError>;
}

/// Raw per-skill levels as reported by a hiscores service, keyed by the
/// service's own skill names (see `Skill::api_name`).
pub type RawSkillLevels = HashMap<String, i64>;

/// Player level lookup.
#[async_trait]
pub trait HiscoresProvider: Send + Sync {
    fn name(&self) -> &str;

    /// Fetch a player's levels. Failures should be `CoreError::Hiscores` so
    /// the caller can show the manual fallback link.
    async fn fetch_levels(&self, player: &str) -> Result<RawSkillLevels, CoreError>;
}
