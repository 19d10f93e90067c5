//! Monthly budgets, categories, transactions, and the logic derived from them.

pub mod aggregation;
pub mod error;
pub mod period;
pub mod rollover;
pub mod types;
pub mod validation;

#[cfg(test)]
mod tests;

pub use aggregation::{BudgetTotals, budget_net, category_spent};
pub use error::BudgetError;
pub use period::BudgetPeriod;
pub use rollover::{PlannedCategory, PlannedTransaction, RolloverPlan};
pub use types::{
    BudgetDetail, BudgetInput, Category, CategoryDetail, CategoryInput, MonthlyBudget,
    Transaction, TransactionInput,
};
