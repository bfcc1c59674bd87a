use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::str::FromStr;

use crate::errors::CoreError;

pub const MIN_LEVEL: u8 = 1;
pub const MAX_LEVEL: u8 = 99;

/// The 23 trainable skills.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Skill {
    Attack,
    Hitpoints,
    Mining,
    Strength,
    Agility,
    Smithing,
    Defence,
    Herblore,
    Fishing,
    Ranged,
    Thieving,
    Cooking,
    Prayer,
    Crafting,
    Firemaking,
    Magic,
    Fletching,
    Woodcutting,
    Runecraft,
    Slayer,
    Farming,
    Construction,
    Hunter,
}

impl Skill {
    /// Skill-panel order.
    pub const ALL: [Skill; 23] = [
        Skill::Attack,
        Skill::Hitpoints,
        Skill::Mining,
        Skill::Strength,
        Skill::Agility,
        Skill::Smithing,
        Skill::Defence,
        Skill::Herblore,
        Skill::Fishing,
        Skill::Ranged,
        Skill::Thieving,
        Skill::Cooking,
        Skill::Prayer,
        Skill::Crafting,
        Skill::Firemaking,
        Skill::Magic,
        Skill::Fletching,
        Skill::Woodcutting,
        Skill::Runecraft,
        Skill::Slayer,
        Skill::Farming,
        Skill::Construction,
        Skill::Hunter,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Attack => "Attack",
            Skill::Hitpoints => "Hitpoints",
            Skill::Mining => "Mining",
            Skill::Strength => "Strength",
            Skill::Agility => "Agility",
            Skill::Smithing => "Smithing",
            Skill::Defence => "Defence",
            Skill::Herblore => "Herblore",
            Skill::Fishing => "Fishing",
            Skill::Ranged => "Ranged",
            Skill::Thieving => "Thieving",
            Skill::Cooking => "Cooking",
            Skill::Prayer => "Prayer",
            Skill::Crafting => "Crafting",
            Skill::Firemaking => "Firemaking",
            Skill::Magic => "Magic",
            Skill::Fletching => "Fletching",
            Skill::Woodcutting => "Woodcutting",
            Skill::Runecraft => "Runecraft",
            Skill::Slayer => "Slayer",
            Skill::Farming => "Farming",
            Skill::Construction => "Construction",
            Skill::Hunter => "Hunter",
        }
    }

    /// Exact, case-sensitive match on `name()`.
    pub fn from_display_name(name: &str) -> Option<Skill> {
        Skill::ALL.iter().copied().find(|skill| skill.name() == name)
    }

    /// Key used by the Wise Old Man API. Only Runecraft differs from the
    /// lowercased display name.
    pub fn api_name(&self) -> String {
        match self {
            Skill::Runecraft => "runecrafting".to_string(),
            other => other.name().to_lowercase(),
        }
    }
}

impl std::fmt::Display for Skill {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for Skill {
    type Err = CoreError;

    /// Accepts display names and API names, case-insensitively.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim().to_lowercase();
        Skill::ALL
            .iter()
            .copied()
            .find(|skill| skill.name().to_lowercase() == needle || skill.api_name() == needle)
            .ok_or_else(|| CoreError::ValidationError(format!("Unknown skill: '{s}'")))
    }
}

/// A player's level in every skill, always clamped to `1..=99`.
///
/// Serialized as `{"<Skill>": level}`. Unknown names are dropped on load and
/// missing skills fall back to 99.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<String, i64>", into = "BTreeMap<String, u8>")]
pub struct SkillLevels {
    levels: BTreeMap<Skill, u8>,
}

impl Default for SkillLevels {
    fn default() -> Self {
        Self::uniform(MAX_LEVEL as i64)
    }
}

impl SkillLevels {
    /// Every skill at the same (clamped) level.
    pub fn uniform(level: i64) -> Self {
        let level = clamp_level(level);
        Self {
            levels: Skill::ALL.iter().map(|s| (*s, level)).collect(),
        }
    }

    pub fn get(&self, skill: Skill) -> u8 {
        self.levels.get(&skill).copied().unwrap_or(MAX_LEVEL)
    }

    /// Set one skill; out-of-range values are clamped. Returns the stored level.
    pub fn set(&mut self, skill: Skill, level: i64) -> u8 {
        let level = clamp_level(level);
        self.levels.insert(skill, level);
        level
    }

    /// Sum over all 23 skills.
    pub fn total(&self) -> u32 {
        Skill::ALL.iter().map(|s| self.get(*s) as u32).sum()
    }

    /// Whether the player meets `required` in the skill called `skill_name`.
    /// Recipe requirements use exact display names; anything else is never met.
    pub fn meets(&self, skill_name: &str, required: u32) -> bool {
        match Skill::from_display_name(skill_name) {
            Some(skill) => self.get(skill) as u32 >= required,
            None => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, u8)> + '_ {
        Skill::ALL.iter().map(|s| (*s, self.get(*s)))
    }
}

fn clamp_level(level: i64) -> u8 {
    level.clamp(MIN_LEVEL as i64, MAX_LEVEL as i64) as u8
}

impl From<BTreeMap<String, i64>> for SkillLevels {
    fn from(raw: BTreeMap<String, i64>) -> Self {
        let mut levels = Self::default();
        for (name, level) in raw {
            if let Ok(skill) = name.parse::<Skill>() {
                levels.set(skill, level);
            }
        }
        levels
    }
}

impl From<SkillLevels> for BTreeMap<String, u8> {
    fn from(levels: SkillLevels) -> Self {
        levels
            .iter()
            .map(|(skill, level)| (skill.name().to_string(), level))
            .collect()
    }
}
