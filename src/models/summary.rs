use std::collections::BTreeMap;

use rust_decimal::Decimal;

use super::Transaction;
use crate::error::ReportError;

/// Spend per category label, iterated in ascending label order so reports
/// and charts come out the same for the same ledger.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals(BTreeMap<String, Decimal>);

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group `(category, amount)` pairs, summing amounts per label.
    pub fn from_amounts<S, I>(amounts: I) -> Result<Self, ReportError>
    where
        S: Into<String>,
        I: IntoIterator<Item = (S, Decimal)>,
    {
        let mut totals = Self::new();
        for (name, amount) in amounts {
            let name: String = name.into();
            totals.add(&name, amount)?;
        }
        Ok(totals)
    }

    /// Add `amount` to the running total for `category`, creating it if needed.
    pub fn add(&mut self, category: &str, amount: Decimal) -> Result<(), ReportError> {
        let entry = self.0.entry(category.to_string()).or_insert(Decimal::ZERO);
        *entry = entry
            .checked_add(amount)
            .ok_or(ReportError::Overflow("adding category totals"))?;
        Ok(())
    }

    #[cfg(test)]
    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.0.get(category).copied()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> {
        self.0.iter().map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Sum of every category total.
    pub fn total(&self) -> Result<Decimal, ReportError> {
        self.0.values().try_fold(Decimal::ZERO, |sum, amount| {
            sum.checked_add(*amount)
                .ok_or(ReportError::Overflow("summing category totals"))
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BudgetSummary {
    pub total_spent: Decimal,
    pub remaining_budget: Decimal,
    pub percent_spent: Decimal,
    pub category_totals: CategoryTotals,
    /// Largest transactions by magnitude, smallest of them first.
    pub top_expenses: Vec<Transaction>,
}

impl BudgetSummary {
    pub fn is_over_budget(&self, monthly_budget: Decimal) -> bool {
        self.total_spent > monthly_budget
    }
}
