//! Rows feeding the monthly report exports.

use rust_decimal::Decimal;
use serde::Serialize;

/// One line of the total-expenses report: an item acquired this month and
/// what its intake cost.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseRow {
    /// Product or freebie name.
    pub name: String,
    /// Per-unit acquisition cost.
    pub unit_cost: Decimal,
    /// Units acquired (intake quantity).
    pub quantity: Decimal,
}

impl ExpenseRow {
    /// Total cost of this line.
    #[must_use]
    pub fn total(&self) -> Decimal {
        self.unit_cost * self.quantity
    }
}
