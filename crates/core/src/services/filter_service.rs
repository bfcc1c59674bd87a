use std::cmp::Ordering;

use tracing::debug;

use crate::models::filter::{FilterCriteria, FilterOutcome};
use crate::models::item::ItemTable;
use crate::models::profit::{ProfitResult, SortOrder};
use crate::models::recipe::Recipe;
use crate::models::skills::SkillLevels;
use crate::models::tax::TaxExemptSet;

use super::profit_service::ProfitService;

/// Splits recipes into visible and hidden according to skill levels and a cost ceiling.
///
/// Counting rule: a recipe that fails the skill check counts toward
/// `hidden_by_skill` only, whatever its cost. `hidden_by_cost` counts
/// recipes that passed the skill check but are too expensive.
pub struct FilterService {
    profit: ProfitService,
}

impl FilterService {
    pub fn new() -> Self {
        Self {
            profit: ProfitService::new(),
        }
    }

    /// Whether the player may craft `recipe`. Always true with filtering off.
    pub fn skill_pass(&self, recipe: &Recipe, levels: &SkillLevels, filter_by_skills: bool) -> bool {
        !filter_by_skills
            || recipe
                .required_skills
                .iter()
                .all(|(skill, level)| levels.meets(skill, *level))
    }

    /// Whether `input_cost` fits under `max_cost`. An unreadable cost never fits.
    pub fn cost_pass(&self, input_cost: Option<i64>, max_cost: Option<i64>) -> bool {
        match (input_cost, max_cost) {
            (None, _) => false,
            (Some(_), None) => true,
            (Some(cost), Some(ceiling)) => cost <= ceiling,
        }
    }

    /// Price every recipe and keep those passing both checks, in recipe order.
    pub fn filter<'a>(
        &self,
        recipes: impl IntoIterator<Item = &'a Recipe>,
        items: &ItemTable,
        exempt: &TaxExemptSet,
        criteria: &FilterCriteria,
    ) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();

        for recipe in recipes {
            let result = self.profit.calculate(recipe, items, exempt);
            let skill_ok = self.skill_pass(recipe, &criteria.skill_levels, criteria.filter_by_skills);
            let cost_ok = self.cost_pass(result.input_cost, criteria.max_cost);

            if !skill_ok {
                outcome.hidden_by_skill += 1;
            } else if !cost_ok {
                outcome.hidden_by_cost += 1;
            } else {
                outcome.visible.push(result);
            }
        }

        debug!(
            visible = outcome.visible.len(),
            hidden_by_skill = outcome.hidden_by_skill,
            hidden_by_cost = outcome.hidden_by_cost,
            "filtered recipes"
        );
        outcome
    }

    /// Reorder results in place. Results without a profit sort last either way.
    pub fn sort(&self, results: &mut [ProfitResult], order: SortOrder) {
        match order {
            SortOrder::RecipeOrder => {}
            SortOrder::ProfitDesc => results.sort_by(|a, b| by_profit(a, b, true)),
            SortOrder::ProfitAsc => results.sort_by(|a, b| by_profit(a, b, false)),
            SortOrder::NameAsc => results.sort_by(|a, b| {
                a.recipe_name
                    .to_lowercase()
                    .cmp(&b.recipe_name.to_lowercase())
            }),
        }
    }
}

impl Default for FilterService {
    fn default() -> Self {
        Self::new()
    }
}

fn by_profit(a: &ProfitResult, b: &ProfitResult, descending: bool) -> Ordering {
    match (a.profit, b.profit) {
        (Some(x), Some(y)) if descending => y.cmp(&x),
        (Some(x), Some(y)) => x.cmp(&y),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
