mod money;

use rust_decimal::Decimal;

use crate::models::BudgetSummary;

use money::format_amount;
pub(crate) use money::format_percent;

/// Render the plain-text report. Pure: the same summary, budget and period
/// always produce the same bytes.
pub(crate) fn format_report(
    summary: &BudgetSummary,
    monthly_budget: Decimal,
    period: &str,
) -> String {
    let mut lines: Vec<String> = vec![
        "Expense Report Summary".into(),
        String::new(),
        format!("Reporting Period: {period}"),
        String::new(),
        "Budget Overview:".into(),
        "---------------".into(),
        format!("Total Budget: {}", format_amount(monthly_budget)),
        format!("Total Spent: {}", format_amount(summary.total_spent)),
        format!(
            "Remaining Budget: {}",
            format_amount(summary.remaining_budget)
        ),
        format!(
            "Percentage of Budget Spent: {}",
            format_percent(summary.percent_spent)
        ),
        String::new(),
        "Category Breakdown:".into(),
        "-----------------".into(),
    ];

    for (category, amount) in summary.category_totals.iter() {
        lines.push(format!("{category}: {}", format_amount(amount.abs())));
    }

    lines.push(String::new());
    lines.push("Top 5 Expenses:".into());
    lines.push("--------------".into());
    for txn in &summary.top_expenses {
        lines.push(format!(
            "{} - {}: {}",
            txn.date.format("%Y-%m-%d"),
            txn.description,
            format_amount(txn.magnitude())
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Budget Status: {}",
        status_line(summary, monthly_budget)
    ));

    lines.join("\n")
}

fn status_line(summary: &BudgetSummary, monthly_budget: Decimal) -> &'static str {
    if summary.is_over_budget(monthly_budget) {
        "OVER BUDGET"
    } else {
        "Under Budget"
    }
}
