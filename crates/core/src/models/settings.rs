use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::filter::FilterCriteria;
use super::skills::SkillLevels;

/// Where price, mapping and recipe files are read from when nothing else is configured.
pub const DEFAULT_DATA_LOCATION: &str = "data/";

/// Wise Old Man API root.
pub const DEFAULT_HISCORES_URL: &str = "https://api.wiseoldman.net/v2/";

/// User-configurable settings, persisted between sessions by `StorageManager`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// HTTP(S) base URL or local directory holding the data files.
    pub data_location: String,

    /// Base URL of the hiscores service.
    pub hiscores_url: String,

    pub skill_levels: SkillLevels,

    /// Hide recipes whose total input cost exceeds this; `None` = no limit.
    pub max_cost: Option<i64>,

    /// Hide recipes the player lacks the levels for.
    pub filter_by_skills: bool,

    /// Player name used for hiscores lookups.
    pub player_name: Option<String>,

    pub auto_refresh: bool,

    /// Timestamp of the data set last loaded; compared against the remote
    /// one to decide whether a refresh must re-download prices.
    pub last_fetched: Option<DateTime<Utc>>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_location: DEFAULT_DATA_LOCATION.to_string(),
            hiscores_url: DEFAULT_HISCORES_URL.to_string(),
            skill_levels: SkillLevels::default(),
            max_cost: None,
            filter_by_skills: false,
            player_name: None,
            auto_refresh: false,
            last_fetched: None,
        }
    }
}

impl Settings {
    /// The subset of settings the filter engine consumes.
    pub fn filter_criteria(&self) -> FilterCriteria {
        FilterCriteria {
            skill_levels: self.skill_levels.clone(),
            max_cost: self.max_cost,
            filter_by_skills: self.filter_by_skills,
        }
    }
}
