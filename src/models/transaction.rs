use chrono::NaiveDate;
use rust_decimal::Decimal;

/// One ledger row. Negative amounts are expenses by convention.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub date: NaiveDate,
    pub description: String,
    pub category: String,
    pub amount: Decimal,
}

impl Transaction {
    pub fn new(date: NaiveDate, description: String, category: String, amount: Decimal) -> Self {
        Self {
            date,
            description,
            category,
            amount,
        }
    }

    /// Absolute value of the amount, used for spend totals and ranking.
    pub fn magnitude(&self) -> Decimal {
        self.amount.abs()
    }
}
