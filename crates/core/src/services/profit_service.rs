use crate::models::item::ItemTable;
use crate::models::profit::{InputCost, PriceStatus, ProfitResult};
use crate::models::recipe::{Ingredient, Recipe};
use crate::models::tax::TaxExemptSet;

use super::tax_service::TaxService;

/// Prices a recipe against the item table.
///
/// Outputs are valued at their best sell price (`max_high`) and taxed;
/// inputs are costed at their best buy price (`min_low`), untaxed.
/// Names that do not resolve, and items with no buy price, are priced at 0
/// and flagged on the line rather than failing the calculation.
pub struct ProfitService {
    tax: TaxService,
}

impl ProfitService {
    pub fn new() -> Self {
        Self {
            tax: TaxService::new(),
        }
    }

    /// Compute the full profit breakdown for one recipe.
    pub fn calculate(&self, recipe: &Recipe, items: &ItemTable, exempt: &TaxExemptSet) -> ProfitResult {
        let output_item = items.find_by_name(&recipe.output.item);
        let output_price = output_item.map(|i| i.max_high).unwrap_or(0);
        let output_status = match output_item {
            Some(item) if item.max_high > 0 => PriceStatus::Priced,
            Some(_) => PriceStatus::Unavailable,
            None => PriceStatus::Unresolved,
        };

        let gross_output_price = recipe
            .output
            .quantity
            .map(|q| output_price.saturating_mul(q))
            .unwrap_or(0);
        let net_output_price = self.tax.net(gross_output_price, &recipe.output.item, exempt);

        let inputs: Vec<InputCost> = recipe
            .inputs
            .iter()
            .map(|input| self.input_cost(input, items))
            .collect();

        let input_cost = inputs
            .iter()
            .try_fold(0i64, |sum, line| line.total.map(|t| sum.saturating_add(t)));
        let profit = input_cost.map(|cost| net_output_price.saturating_sub(cost));

        ProfitResult {
            recipe_name: recipe.name.clone(),
            output_item: recipe.output.item.clone(),
            output_quantity: recipe.output.quantity,
            output_price,
            gross_output_price,
            net_output_price,
            current_output_price: output_item.map(|i| i.current_high).unwrap_or(0),
            output_status,
            inputs,
            input_cost,
            profit,
        }
    }

    /// Compute results for every recipe, in input order.
    pub fn calculate_all<'a>(
        &self,
        recipes: impl IntoIterator<Item = &'a Recipe>,
        items: &ItemTable,
        exempt: &TaxExemptSet,
    ) -> Vec<ProfitResult> {
        recipes
            .into_iter()
            .map(|r| self.calculate(r, items, exempt))
            .collect()
    }

    fn input_cost(&self, input: &Ingredient, items: &ItemTable) -> InputCost {
        let item = items.find_by_name(&input.item);
        let (price, status) = match item {
            Some(i) => match i.min_low {
                Some(low) => (low, PriceStatus::Priced),
                None => (0, PriceStatus::Unavailable),
            },
            None => (0, PriceStatus::Unresolved),
        };

        InputCost {
            item: input.item.clone(),
            quantity: input.quantity,
            price,
            current: item.map(|i| i.current_low).unwrap_or(0),
            total: input.quantity.map(|q| price.saturating_mul(q)),
            status,
        }
    }
}

impl Default for ProfitService {
    fn default() -> Self {
        Self::new()
    }
}
