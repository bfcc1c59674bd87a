use tracing::info;

use crate::errors::CoreError;
use crate::models::skills::{Skill, SkillLevels, MIN_LEVEL};
use crate::providers::traits::HiscoresProvider;

/// Turns a hiscores lookup into clamped `SkillLevels`.
///
/// Skills the service does not report are set to level 1.
pub struct HiscoresService {
    provider: Box<dyn HiscoresProvider>,
}

impl HiscoresService {
    pub fn new(provider: Box<dyn HiscoresProvider>) -> Self {
        Self { provider }
    }

    pub fn provider_name(&self) -> &str {
        self.provider.name()
    }

    pub async fn lookup(&self, player: &str) -> Result<SkillLevels, CoreError> {
        let player = player.trim();
        if player.is_empty() {
            return Err(CoreError::ValidationError("Please enter a username.".into()));
        }

        let raw = self.provider.fetch_levels(player).await?;

        let mut levels = SkillLevels::uniform(MIN_LEVEL as i64);
        for skill in Skill::ALL {
            let level = raw.get(&skill.api_name()).copied().unwrap_or(MIN_LEVEL as i64);
            levels.set(skill, level);
        }

        info!(
            player,
            provider = self.provider.name(),
            total = levels.total(),
            "hiscores loaded"
        );
        Ok(levels)
    }
}
