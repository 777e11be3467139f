use rust_decimal::Decimal;

use crate::error::ReportError;
use crate::models::{BudgetSummary, CategoryTotals, Transaction};

/// How many of the largest transactions the summary keeps.
pub(crate) const TOP_EXPENSE_COUNT: usize = 5;

/// Aggregate a ledger against a monthly budget.
///
/// Spend is measured in magnitude: inflows count toward `total_spent` and
/// their category just like outflows do. An empty ledger is not an error.
pub(crate) fn summarize(
    transactions: &[Transaction],
    monthly_budget: Decimal,
) -> Result<BudgetSummary, ReportError> {
    if monthly_budget.is_zero() {
        return Err(ReportError::DivisionByZero);
    }

    let total_spent = transactions
        .iter()
        .try_fold(Decimal::ZERO, |sum, t| sum.checked_add(t.magnitude()))
        .ok_or(ReportError::Overflow("totalling spend"))?;
    let remaining_budget = monthly_budget
        .checked_sub(total_spent)
        .ok_or(ReportError::Overflow("computing remaining budget"))?;
    let percent_spent = total_spent
        .checked_div(monthly_budget)
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(ReportError::Overflow("computing percentage spent"))?;

    let category_totals = CategoryTotals::from_amounts(
        transactions
            .iter()
            .map(|t| (t.category.as_str(), t.magnitude())),
    )?;

    let top_expenses = top_by_magnitude(transactions, TOP_EXPENSE_COUNT);

    tracing::debug!(
        %total_spent,
        %percent_spent,
        categories = category_totals.len(),
        "budget summarized"
    );

    Ok(BudgetSummary {
        total_spent,
        remaining_budget,
        percent_spent,
        category_totals,
        top_expenses,
    })
}

/// The `count` largest transactions by magnitude, smallest first. The sort
/// is stable, so equal magnitudes keep their ledger order.
fn top_by_magnitude(transactions: &[Transaction], count: usize) -> Vec<Transaction> {
    let mut ranked: Vec<&Transaction> = transactions.iter().collect();
    ranked.sort_by_key(|t| t.magnitude());
    let skip = ranked.len().saturating_sub(count);
    ranked.into_iter().skip(skip).cloned().collect()
}
