// Pure line arithmetic. Validation happens at the request boundary, so
// inputs here are already known to be positive quantities and prices with
// discounts in range.

use rust_decimal::Decimal;

use crate::core::money;
use crate::modules::transactions::models::TransactionItemInput;

/// One line with its computed total
#[derive(Debug, Clone, PartialEq)]
pub struct PricedLine {
    pub item_id: i64,
    pub quantity: Decimal,
    pub unit_price: Decimal,
    pub discount_percent: Decimal,
    pub line_total: Decimal,
}

/// Line totals in input order plus their sum
#[derive(Debug, Clone, PartialEq)]
pub struct PricingOutcome {
    pub lines: Vec<PricedLine>,
    pub subtotal: Decimal,
}

/// Computes per-line totals and the subtotal
pub struct PricingCalculator;

impl PricingCalculator {
    pub fn new() -> Self {
        Self
    }

    /// `quantity * unit_price * (1 - discount_percent/100)`, rounded to two
    /// decimal places.
    pub fn line_total(
        &self,
        quantity: Decimal,
        unit_price: Decimal,
        discount_percent: Decimal,
    ) -> Decimal {
        let discount_factor = Decimal::ONE - discount_percent / Decimal::from(100);
        money::round(quantity * unit_price * discount_factor)
    }

    /// Prices every line, preserving input order.
    pub fn price(&self, items: &[TransactionItemInput]) -> PricingOutcome {
        let lines: Vec<PricedLine> = items
            .iter()
            .map(|item| PricedLine {
                item_id: item.item_id,
                quantity: item.quantity,
                unit_price: item.unit_price,
                discount_percent: item.discount_percent,
                line_total: self.line_total(item.quantity, item.unit_price, item.discount_percent),
            })
            .collect();

        let subtotal = money::round(lines.iter().map(|line| line.line_total).sum());

        PricingOutcome { lines, subtotal }
    }
}

impl Default for PricingCalculator {
    fn default() -> Self {
        Self::new()
    }
}
