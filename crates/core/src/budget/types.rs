//! Budget data types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use shelf_shared::{Amount, BudgetId, CategoryId, TransactionId, UserId};

use super::aggregation::{self, BudgetTotals};
use super::error::BudgetError;
use super::period::BudgetPeriod;
use super::validation::{
    DESCRIPTION_MAX_LEN, SOURCE_MAX_LEN, validate_amount, validate_label, validate_length,
    validate_planned_amount,
};

/// A user's plan for one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MonthlyBudget {
    /// Budget ID.
    pub id: BudgetId,
    /// Owning user.
    pub user_id: UserId,
    /// Expected income for the month.
    pub income: Amount,
    /// Month the budget covers.
    pub period: BudgetPeriod,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A planned spending bucket within a budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Owning budget.
    pub budget_id: BudgetId,
    /// Display label (e.g. "Groceries").
    pub label: String,
    /// Planned spend for the month.
    pub monthly_amount: Amount,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A single dated spend event within a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transaction {
    /// Transaction ID.
    pub id: TransactionId,
    /// Owning category.
    pub category_id: CategoryId,
    /// Signed amount; refunds are negative.
    pub amount: Amount,
    /// Where the money went (payee, shop).
    pub source: String,
    /// Date, always inside the owning budget's month.
    pub date: NaiveDate,
    /// Copied forward by rollover when set.
    pub recurring: bool,
    /// Free-text description.
    pub description: String,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Last update timestamp.
    pub updated_at: DateTime<Utc>,
}

/// A category with its transactions (newest first) and owning period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryDetail {
    /// Category record.
    pub category: Category,
    /// Period of the owning budget, for month/year display.
    pub period: BudgetPeriod,
    /// Transactions ordered by date descending.
    pub transactions: Vec<Transaction>,
}

impl CategoryDetail {
    /// Sum of the category's transaction amounts.
    #[must_use]
    pub fn spent(&self) -> Amount {
        aggregation::category_spent(&self.transactions)
    }

    /// Planned amount minus spent.
    #[must_use]
    pub fn remaining(&self) -> Amount {
        aggregation::category_remaining(self.category.monthly_amount, &self.transactions)
    }
}

/// A budget with all its categories and their transactions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetDetail {
    /// Budget record.
    pub budget: MonthlyBudget,
    /// Categories in creation order.
    pub categories: Vec<CategoryDetail>,
}

impl BudgetDetail {
    /// Income minus everything spent across the budget's categories.
    #[must_use]
    pub fn net(&self) -> Amount {
        aggregation::budget_net(self.budget.income, &self.categories)
    }

    /// Income, planned, spent, and net for the budget.
    #[must_use]
    pub fn totals(&self) -> BudgetTotals {
        BudgetTotals::compute(self.budget.income, &self.categories)
    }
}

/// Input for creating or editing a budget.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BudgetInput {
    /// Month the budget covers.
    pub period: BudgetPeriod,
    /// Expected income.
    pub income: Amount,
}

impl BudgetInput {
    /// Checks the input against budget rules.
    pub fn validate(&self) -> Result<(), BudgetError> {
        validate_planned_amount("income", self.income)
    }
}

/// Input for creating or editing a category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryInput {
    /// Display label.
    pub label: String,
    /// Planned spend for the month.
    pub monthly_amount: Amount,
}

impl CategoryInput {
    /// Returns the input with its label trimmed, or the first rule it breaks.
    pub fn validated(self) -> Result<Self, BudgetError> {
        let label = validate_label(&self.label)?;
        validate_planned_amount("monthly amount", self.monthly_amount)?;
        Ok(Self {
            label,
            monthly_amount: self.monthly_amount,
        })
    }
}

/// Input for creating or editing a transaction.
///
/// Only the day of month is supplied; the year and month come from the
/// owning budget.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionInput {
    /// Signed amount.
    pub amount: Amount,
    /// Where the money went.
    pub source: String,
    /// Day of month within the owning budget's period.
    pub day: u32,
    /// Free-text description.
    pub description: String,
    /// Whether rollover copies it forward.
    pub recurring: bool,
}

impl TransactionInput {
    /// Validates the amount and text fields and resolves the full date within `period`.
    pub fn resolve_date(&self, period: BudgetPeriod) -> Result<NaiveDate, BudgetError> {
        validate_amount("amount", self.amount)?;
        validate_length("source", &self.source, SOURCE_MAX_LEN)?;
        validate_length("description", &self.description, DESCRIPTION_MAX_LEN)?;
        period.date_for_day(self.day)
    }
}
