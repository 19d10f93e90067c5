//! Rollover planning: what next month's budget should contain.
//!
//! The plan is computed from a fully loaded source budget without touching
//! storage; the store then writes it in a single database transaction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use shelf_shared::{Amount, CategoryId, TransactionId};

use super::error::BudgetError;
use super::period::BudgetPeriod;
use super::types::{BudgetDetail, CategoryDetail, Transaction};

/// The budget a rollover will create.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RolloverPlan {
    /// The month after the source period.
    pub period: BudgetPeriod,
    /// Income copied verbatim from the source.
    pub income: Amount,
    /// One entry per source category, in source order.
    pub categories: Vec<PlannedCategory>,
}

/// A category to duplicate onto the new budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedCategory {
    /// Category it was copied from.
    pub copied_from: CategoryId,
    /// Label, unchanged.
    pub label: String,
    /// Planned amount, unchanged.
    pub monthly_amount: Amount,
    /// Recurring transactions to duplicate.
    pub transactions: Vec<PlannedTransaction>,
}

/// A recurring transaction to duplicate into the new month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlannedTransaction {
    /// Transaction it was copied from.
    pub copied_from: TransactionId,
    /// Amount, unchanged.
    pub amount: Amount,
    /// Source, unchanged.
    pub source: String,
    /// Same day-of-month in the new period, clamped to its last day.
    pub date: NaiveDate,
    /// Description, unchanged.
    pub description: String,
}

impl RolloverPlan {
    /// Plans the budget that follows `source`.
    ///
    /// Every category is carried over; only transactions flagged `recurring`
    /// are, re-dated into the new month.
    ///
    /// # Errors
    ///
    /// Returns `PeriodOverflow` if `source` is the last representable month.
    pub fn from_source(source: &BudgetDetail) -> Result<Self, BudgetError> {
        let period = source.budget.period.next()?;

        let categories = source
            .categories
            .iter()
            .map(|detail| plan_category(detail, period))
            .collect();

        Ok(Self {
            period,
            income: source.budget.income,
            categories,
        })
    }

    /// Number of transactions the plan will create.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.categories.iter().map(|c| c.transactions.len()).sum()
    }
}

fn plan_category(detail: &CategoryDetail, period: BudgetPeriod) -> PlannedCategory {
    PlannedCategory {
        copied_from: detail.category.id,
        label: detail.category.label.clone(),
        monthly_amount: detail.category.monthly_amount,
        transactions: detail
            .transactions
            .iter()
            .filter(|t| t.recurring)
            .map(|t| plan_transaction(t, period))
            .collect(),
    }
}

fn plan_transaction(transaction: &Transaction, period: BudgetPeriod) -> PlannedTransaction {
    PlannedTransaction {
        copied_from: transaction.id,
        amount: transaction.amount,
        source: transaction.source.clone(),
        date: period.reanchor(transaction.date),
        description: transaction.description.clone(),
    }
}
