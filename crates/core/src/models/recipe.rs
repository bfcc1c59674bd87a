use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Name given to every recipe built from user-entered text.
pub const CUSTOM_RECIPE_NAME: &str = "Custom Recipe";

/// An item and how many of it a recipe consumes or produces.
///
/// `quantity` is `None` when it could not be read (custom recipe text with a
/// missing or non-numeric count). Such a quantity poisons any total it enters.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ingredient {
    pub item: String,
    pub quantity: Option<i64>,
}

impl Ingredient {
    pub fn new(item: impl Into<String>, quantity: i64) -> Self {
        Self {
            item: item.into(),
            quantity: Some(quantity),
        }
    }

    /// An ingredient whose count could not be parsed.
    pub fn unquantified(item: impl Into<String>) -> Self {
        Self {
            item: item.into(),
            quantity: None,
        }
    }
}

/// A production step: inputs are bought, the output is sold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recipe {
    pub name: String,
    pub inputs: Vec<Ingredient>,
    pub output: Ingredient,

    /// Skill name → minimum level. Names match `Skill`'s display names.
    /// A missing or `null` field means no requirements.
    #[serde(
        default,
        deserialize_with = "null_as_empty",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub required_skills: BTreeMap<String, u32>,
}

impl Recipe {
    pub fn new(name: impl Into<String>, inputs: Vec<Ingredient>, output: Ingredient) -> Self {
        Self {
            name: name.into(),
            inputs,
            output,
            required_skills: BTreeMap::new(),
        }
    }

    /// Add a skill requirement (builder style).
    pub fn requires(mut self, skill: impl Into<String>, level: u32) -> Self {
        self.required_skills.insert(skill.into(), level);
        self
    }

    pub fn has_requirements(&self) -> bool {
        !self.required_skills.is_empty()
    }

    pub fn is_custom(&self) -> bool {
        self.name == CUSTOM_RECIPE_NAME
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<BTreeMap<String, u32>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<BTreeMap<String, u32>>::deserialize(deserializer)?.unwrap_or_default())
}
