pub mod errors;
pub mod models;
pub mod providers;
pub mod services;
pub mod storage;

use chrono::{DateTime, Utc};
use models::{
    filter::FilterOutcome,
    item::{Item, ItemTable},
    profit::{ProfitResult, SortOrder},
    recipe::Recipe,
    settings::Settings,
    skills::{Skill, SkillLevels},
    tax::TaxExemptSet,
};
use providers::{
    registry::SourceRegistry,
    traits::{HiscoresProvider, MarketDataSource},
    wise_old_man::WiseOldManProvider,
};
use services::{
    filter_service::FilterService,
    hiscores_service::HiscoresService,
    price_service::PriceService,
    profit_service::ProfitService,
    recipe_service::RecipeService,
    refresh_service::{RefreshSchedule, RefreshService},
};
use std::path::Path;
use storage::manager::StorageManager;
use tracing::{debug, info};

use errors::CoreError;

/// What a call to `ProfitTracker::refresh` did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RefreshOutcome {
    /// Whether prices and recipes were re-downloaded.
    pub fetched: bool,
    /// Upstream timestamp of the data set now loaded, if known.
    pub last_fetched: Option<DateTime<Utc>>,
    /// When this check ran.
    pub checked_at: DateTime<Utc>,
}

/// Main entry point for the profit library.
///
/// Owns every piece of shared state (item table, recipe list, tax exemptions,
/// user settings) and the services that operate on it. The pure services
/// only ever see this state by reference, so profit and filter results are
/// always computed from one committed snapshot.
#[must_use]
pub struct ProfitTracker {
    settings: Settings,
    items: ItemTable,
    recipes: Vec<Recipe>,
    /// User-entered recipes; kept apart so a recipe reload does not drop them.
    custom_recipes: Vec<Recipe>,
    tax_exempt: TaxExemptSet,
    tax_exempt_loaded: bool,
    schedule: RefreshSchedule,
    price_service: PriceService,
    profit_service: ProfitService,
    filter_service: FilterService,
    recipe_service: RecipeService,
    refresh_service: RefreshService,
    hiscores_service: HiscoresService,
    /// Tracks whether settings changed since the last save/load.
    dirty: bool,
}

impl std::fmt::Debug for ProfitTracker {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProfitTracker")
            .field("items", &self.items.len())
            .field("recipes", &self.recipes.len())
            .field("custom_recipes", &self.custom_recipes.len())
            .field("tax_exempt", &self.tax_exempt.len())
            .field("settings", &self.settings)
            .field("dirty", &self.dirty)
            .finish()
    }
}

impl ProfitTracker {
    /// Create a tracker with default settings.
    pub fn create_new() -> Result<Self, CoreError> {
        Self::with_settings(Settings::default())
    }

    /// Create a tracker whose data sources follow `settings`.
    pub fn with_settings(settings: Settings) -> Result<Self, CoreError> {
        let registry = SourceRegistry::from_location(&settings.data_location)?;
        let hiscores = WiseOldManProvider::with_base_url(&settings.hiscores_url)?;
        Ok(Self::build(settings, registry, Box::new(hiscores)))
    }

    /// Create a tracker around explicit sources (tests, embedding, offline fixtures).
    pub fn with_sources(
        settings: Settings,
        source: Box<dyn MarketDataSource>,
        hiscores: Box<dyn HiscoresProvider>,
    ) -> Self {
        let mut registry = SourceRegistry::new();
        registry.register(source);
        Self::build(settings, registry, hiscores)
    }

    /// Load settings from a file written by `save_settings_to_file`.
    /// A missing file yields default settings.
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self, CoreError> {
        let settings = StorageManager::load_or_default(path)?;
        Self::with_settings(settings)
    }

    /// Save settings to disk. Clears the unsaved-changes flag on success.
    pub fn save_settings_to_file(&mut self, path: impl AsRef<Path>) -> Result<(), CoreError> {
        StorageManager::save_to_file(&self.settings, path)?;
        self.dirty = false;
        Ok(())
    }

    /// Serialize settings to bytes for callers that own their storage.
    /// Clears the unsaved-changes flag on success.
    pub fn save_settings_to_bytes(&mut self) -> Result<Vec<u8>, CoreError> {
        let bytes = StorageManager::save_to_bytes(&self.settings)?;
        self.dirty = false;
        Ok(bytes)
    }

    // ── Data Refresh ────────────────────────────────────────────────

    /// Bring prices and recipes up to date.
    ///
    /// Loads the tax exemption list on first use. Re-downloads the data set
    /// when the remote timestamp is newer than the one recorded in settings,
    /// when no timestamp is recorded, when the remote one cannot be read, or
    /// when nothing has been loaded yet. On error the previously loaded state
    /// is left untouched.
    pub async fn refresh(&mut self) -> Result<RefreshOutcome, CoreError> {
        if !self.tax_exempt_loaded {
            self.tax_exempt = self.refresh_service.fetch_tax_exempt().await;
            self.tax_exempt_loaded = true;
        }

        let remote = self.refresh_service.remote_timestamp().await;
        let needs_update = RefreshService::needs_fetch(self.settings.last_fetched, remote);

        let fetched = if needs_update || self.items.is_empty() {
            info!("fetching updated market data");
            let data = self.refresh_service.fetch_market().await?;
            self.items = self.price_service.aggregate(&data.mapping, &data.snapshots);
            self.recipes = data.recipes;
            true
        } else {
            debug!("market data is current, skipping fetch");
            false
        };

        // Only a download updates the recorded timestamp; an older remote one is ignored.
        if fetched && remote.is_some() && remote != self.settings.last_fetched {
            self.settings.last_fetched = remote;
            self.dirty = true;
        }

        Ok(RefreshOutcome {
            fetched,
            last_fetched: self.settings.last_fetched,
            checked_at: Utc::now(),
        })
    }

    /// Reload only the recipe list, keeping prices.
    pub async fn load_recipes(&mut self) -> Result<usize, CoreError> {
        self.recipes = self.refresh_service.fetch_recipes().await?;
        Ok(self.recipes.len())
    }

    /// Advance the auto-refresh countdown by one second, refreshing when it
    /// expires and auto-refresh is enabled.
    pub async fn tick_auto_refresh(&mut self) -> Result<Option<RefreshOutcome>, CoreError> {
        if self.schedule.tick() && self.settings.auto_refresh {
            return self.refresh().await.map(Some);
        }
        Ok(None)
    }

    /// Manual refresh that also restarts the auto-refresh countdown.
    pub async fn refresh_now(&mut self) -> Result<RefreshOutcome, CoreError> {
        let outcome = self.refresh().await?;
        if self.settings.auto_refresh {
            self.schedule.reset();
        }
        Ok(outcome)
    }

    #[must_use]
    pub fn schedule(&self) -> &RefreshSchedule {
        &self.schedule
    }

    // ── Results ─────────────────────────────────────────────────────

    /// Profit breakdown for one recipe against the current prices.
    #[must_use]
    pub fn calculate(&self, recipe: &Recipe) -> ProfitResult {
        self.profit_service
            .calculate(recipe, &self.items, &self.tax_exempt)
    }

    /// Visible results plus hidden counts, in recipe order, using the
    /// current skill levels, cost ceiling and skill-filter toggle.
    #[must_use]
    pub fn display(&self) -> FilterOutcome {
        self.filter_service.filter(
            self.all_recipes(),
            &self.items,
            &self.tax_exempt,
            &self.settings.filter_criteria(),
        )
    }

    /// Same as `display`, with the visible list reordered.
    #[must_use]
    pub fn display_sorted(&self, order: SortOrder) -> FilterOutcome {
        let mut outcome = self.display();
        self.filter_service.sort(&mut outcome.visible, order);
        outcome
    }

    // ── Recipes ─────────────────────────────────────────────────────

    /// Parse custom recipe text and add it to the live recipe list.
    pub fn add_custom_recipe(&mut self, text: &str) -> &Recipe {
        let recipe = self
            .recipe_service
            .append_custom(&mut self.custom_recipes, text);
        debug!(inputs = recipe.inputs.len(), output = %recipe.output.item, "custom recipe added");
        recipe
    }

    /// Loaded recipes followed by custom ones.
    pub fn all_recipes(&self) -> impl Iterator<Item = &Recipe> {
        self.recipes.iter().chain(self.custom_recipes.iter())
    }

    #[must_use]
    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    #[must_use]
    pub fn custom_recipes(&self) -> &[Recipe] {
        &self.custom_recipes
    }

    /// Remove every custom recipe. Returns how many were removed.
    pub fn clear_custom_recipes(&mut self) -> usize {
        let removed = self.custom_recipes.len();
        self.custom_recipes.clear();
        removed
    }

    // ── Items ───────────────────────────────────────────────────────

    #[must_use]
    pub fn items(&self) -> &ItemTable {
        &self.items
    }

    /// Case-insensitive item lookup.
    #[must_use]
    pub fn find_item(&self, name: &str) -> Option<&Item> {
        self.items.find_by_name(name)
    }

    #[must_use]
    pub fn tax_exempt(&self) -> &TaxExemptSet {
        &self.tax_exempt
    }

    // ── Skills ──────────────────────────────────────────────────────

    #[must_use]
    pub fn skill_levels(&self) -> &SkillLevels {
        &self.settings.skill_levels
    }

    /// Set one skill (clamped to 1..=99). Returns the stored level.
    pub fn set_skill_level(&mut self, skill: Skill, level: i64) -> u8 {
        self.dirty = true;
        self.settings.skill_levels.set(skill, level)
    }

    pub fn set_skill_levels(&mut self, levels: SkillLevels) {
        self.settings.skill_levels = levels;
        self.dirty = true;
    }

    #[must_use]
    pub fn total_level(&self) -> u32 {
        self.settings.skill_levels.total()
    }

    /// Replace skill levels with those from the hiscores for the saved player name.
    pub async fn import_hiscores(&mut self) -> Result<&SkillLevels, CoreError> {
        let player = self.settings.player_name.clone().unwrap_or_default();
        self.import_hiscores_for(&player).await
    }

    /// Replace skill levels with those from the hiscores for `player`.
    ///
    /// On failure the error's `user_message()` names the manual fallback link.
    pub async fn import_hiscores_for(&mut self, player: &str) -> Result<&SkillLevels, CoreError> {
        let levels = self.hiscores_service.lookup(player).await?;
        self.settings.skill_levels = levels;
        self.dirty = true;
        Ok(&self.settings.skill_levels)
    }

    // ── Settings ────────────────────────────────────────────────────

    #[must_use]
    pub fn get_settings(&self) -> &Settings {
        &self.settings
    }

    /// Set or clear the cost ceiling. Negative ceilings are rejected.
    pub fn set_max_cost(&mut self, max_cost: Option<i64>) -> Result<(), CoreError> {
        if let Some(cost) = max_cost {
            if cost < 0 {
                return Err(CoreError::ValidationError(format!(
                    "Max cost must not be negative (got {cost})"
                )));
            }
        }
        self.settings.max_cost = max_cost;
        self.dirty = true;
        Ok(())
    }

    pub fn set_filter_by_skills(&mut self, enabled: bool) {
        self.settings.filter_by_skills = enabled;
        self.dirty = true;
    }

    /// Store the player name; blank names clear it.
    pub fn set_player_name(&mut self, name: &str) {
        let trimmed = name.trim();
        self.settings.player_name = if trimmed.is_empty() {
            None
        } else {
            Some(trimmed.to_string())
        };
        self.dirty = true;
    }

    pub fn set_auto_refresh(&mut self, enabled: bool) {
        self.settings.auto_refresh = enabled;
        if enabled {
            self.schedule.reset();
        }
        self.dirty = true;
    }

    /// Returns `true` if settings were modified since the last save or load.
    #[must_use]
    pub fn has_unsaved_changes(&self) -> bool {
        self.dirty
    }

    #[must_use]
    pub fn source_names(&self) -> Vec<String> {
        self.refresh_service.source_names()
    }

    #[must_use]
    pub fn hiscores_provider_name(&self) -> &str {
        self.hiscores_service.provider_name()
    }

    // ── Internal ────────────────────────────────────────────────────

    fn build(
        settings: Settings,
        registry: SourceRegistry,
        hiscores: Box<dyn HiscoresProvider>,
    ) -> Self {
        Self {
            settings,
            items: ItemTable::new(),
            recipes: Vec::new(),
            custom_recipes: Vec::new(),
            tax_exempt: TaxExemptSet::new(),
            tax_exempt_loaded: false,
            schedule: RefreshSchedule::new(),
            price_service: PriceService::new(),
            profit_service: ProfitService::new(),
            filter_service: FilterService::new(),
            recipe_service: RecipeService::new(),
            refresh_service: RefreshService::new(registry),
            hiscores_service: HiscoresService::new(hiscores),
            dirty: false,
        }
    }
}
