mod budget;
mod summary;
mod transaction;

pub use budget::DEFAULT_MONTHLY_BUDGET;
pub use summary::{BudgetSummary, CategoryTotals};
pub use transaction::Transaction;
