//! Spend aggregation.
//!
//! Everything here is derived on read; nothing is cached or stored.
//! Totals accumulate in `i128` and are clamped to the `Amount` range only
//! once, at the end.

use serde::{Deserialize, Serialize};
use shelf_shared::Amount;

use super::types::{CategoryDetail, Transaction};

/// Sum of transaction amounts. An empty slice yields zero.
#[must_use]
pub fn category_spent(transactions: &[Transaction]) -> Amount {
    transactions.iter().map(|t| t.amount).sum()
}

/// `planned` minus the spend of `transactions`.
#[must_use]
pub fn category_remaining(planned: Amount, transactions: &[Transaction]) -> Amount {
    let spent: i128 = transactions.iter().map(|t| t.amount.wide_minor_units()).sum();
    Amount::saturating_from_wide(planned.wide_minor_units() - spent)
}

/// `income` minus the spend of every category.
///
/// A budget without categories nets to its income.
#[must_use]
pub fn budget_net(income: Amount, categories: &[CategoryDetail]) -> Amount {
    Amount::saturating_from_wide(income.wide_minor_units() - wide_spent(categories))
}

/// Spend across all categories.
#[must_use]
pub fn total_spent(categories: &[CategoryDetail]) -> Amount {
    Amount::saturating_from_wide(wide_spent(categories))
}

fn wide_spent(categories: &[CategoryDetail]) -> i128 {
    categories
        .iter()
        .flat_map(|c| &c.transactions)
        .map(|t| t.amount.wide_minor_units())
        .sum()
}

/// Planned (monthly) amount across all categories.
#[must_use]
pub fn total_planned(categories: &[CategoryDetail]) -> Amount {
    categories.iter().map(|c| c.category.monthly_amount).sum()
}

/// Summary figures for one budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetTotals {
    /// Budget income.
    pub income: Amount,
    /// Sum of category monthly amounts.
    pub planned: Amount,
    /// Sum of all transaction amounts.
    pub spent: Amount,
    /// Income minus spent.
    pub net: Amount,
}

impl BudgetTotals {
    /// Computes the totals for a budget's income and categories.
    #[must_use]
    pub fn compute(income: Amount, categories: &[CategoryDetail]) -> Self {
        Self {
            income,
            planned: total_planned(categories),
            spent: total_spent(categories),
            net: budget_net(income, categories),
        }
    }
}
