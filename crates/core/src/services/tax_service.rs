use crate::models::tax::TaxExemptSet;

/// GE tax rate, in percent of the sale price.
pub const GE_TAX_PERCENT: i64 = 2;

/// Upper bound on the tax taken from a single sale.
pub const GE_TAX_CAP: i64 = 5_000_000;

/// Grand Exchange tax on sale proceeds. Only ever applied to output value.
pub struct TaxService;

impl TaxService {
    pub fn new() -> Self {
        Self
    }

    /// Tax owed on a sale of `price`, ignoring exemptions.
    pub fn tax(&self, price: i64) -> i64 {
        if price <= 0 {
            return 0;
        }
        (price.saturating_mul(GE_TAX_PERCENT) / 100).min(GE_TAX_CAP)
    }

    /// Proceeds of selling `item_name` for `price` after tax.
    pub fn net(&self, price: i64, item_name: &str, exempt: &TaxExemptSet) -> i64 {
        if exempt.is_exempt(item_name) {
            return price;
        }
        price - self.tax(price)
    }
}

impl Default for TaxService {
    fn default() -> Self {
        Self::new()
    }
}
