use serde::{Deserialize, Serialize};

use super::profit::ProfitResult;
use super::skills::SkillLevels;

/// User constraints applied when deciding which recipes to show.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterCriteria {
    pub skill_levels: SkillLevels,
    /// Upper bound on total input cost; `None` = no ceiling.
    pub max_cost: Option<i64>,
    pub filter_by_skills: bool,
}

/// Result of filtering: what to show, and how much was held back.
///
/// A recipe failing both checks is counted only in `hidden_by_skill`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    pub visible: Vec<ProfitResult>,
    pub hidden_by_skill: usize,
    pub hidden_by_cost: usize,
}

impl FilterOutcome {
    pub fn hidden_total(&self) -> usize {
        self.hidden_by_skill + self.hidden_by_cost
    }

    /// Summary line for hidden recipes, e.g.
    /// `"2 recipes hidden due to level requirements. 1 recipe hidden due to cost limit."`
    pub fn hidden_message(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.hidden_by_skill > 0 {
            parts.push(format!(
                "{} {} hidden due to level requirements",
                self.hidden_by_skill,
                plural(self.hidden_by_skill)
            ));
        }
        if self.hidden_by_cost > 0 {
            parts.push(format!(
                "{} {} hidden due to cost limit",
                self.hidden_by_cost,
                plural(self.hidden_by_cost)
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("{}.", parts.join(". ")))
        }
    }
}

fn plural(count: usize) -> &'static str {
    if count > 1 {
        "recipes"
    } else {
        "recipe"
    }
}
