use serde::{Deserialize, Serialize};

/// How the price on a result line was obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PriceStatus {
    /// The item was found and has a price for this side of the trade.
    Priced,
    /// The item exists but no snapshot reported a price; 0 was used.
    Unavailable,
    /// No item with this name exists in the price table; 0 was used.
    Unresolved,
}

impl std::fmt::Display for PriceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PriceStatus::Priced => write!(f, "Priced"),
            PriceStatus::Unavailable => write!(f, "Price unavailable"),
            PriceStatus::Unresolved => write!(f, "Unknown item"),
        }
    }
}

/// Cost of one input line of a recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputCost {
    pub item: String,
    pub quantity: Option<i64>,
    /// Per-unit price used in the profit math (best buy price).
    pub price: i64,
    /// Latest instantaneous buy price, for display only.
    pub current: i64,
    /// `price × quantity`; `None` when the quantity is unreadable.
    pub total: Option<i64>,
    pub status: PriceStatus,
}

/// Everything needed to show one recipe's profitability.
///
/// Derived on demand from a recipe and the current item table; never stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfitResult {
    pub recipe_name: String,
    pub output_item: String,
    pub output_quantity: Option<i64>,
    /// Best sell price per unit.
    pub output_price: i64,
    pub gross_output_price: i64,
    /// Gross output value after GE tax.
    pub net_output_price: i64,
    /// Latest instantaneous sell price, for display only.
    pub current_output_price: i64,
    pub output_status: PriceStatus,
    pub inputs: Vec<InputCost>,
    /// Sum of input line totals; `None` if any line total is unreadable.
    pub input_cost: Option<i64>,
    /// `net_output_price − input_cost`; may be negative.
    pub profit: Option<i64>,
}

impl ProfitResult {
    pub fn is_profitable(&self) -> bool {
        self.profit.is_some_and(|p| p > 0)
    }

    /// True if any line fell back to a price of 0.
    pub fn has_missing_prices(&self) -> bool {
        self.output_status != PriceStatus::Priced
            || self.inputs.iter().any(|i| i.status != PriceStatus::Priced)
    }
}

/// Ordering for the visible result list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SortOrder {
    /// Same order as the recipe list.
    #[default]
    RecipeOrder,
    ProfitDesc,
    ProfitAsc,
    NameAsc,
}
