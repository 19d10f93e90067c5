//! Budget repository for monthly budget operations, including rollover.

use std::collections::BTreeSet;

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, DatabaseConnection, EntityTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};
use shelf_core::budget::{
    BudgetDetail, BudgetInput, BudgetPeriod, CategoryDetail, MonthlyBudget, RolloverPlan,
    Transaction,
};
use shelf_shared::{AuthContext, BudgetId, CategoryId, TransactionId};
use tracing::{debug, info};
use uuid::Uuid;

use super::detail::load_budget_details;
use super::ownership::owned_budget;
use crate::entities::{categories, monthly_budgets, transactions};
use crate::error::StoreError;

/// Budget repository for CRUD and rollover operations.
#[derive(Debug, Clone)]
pub struct BudgetRepository {
    db: DatabaseConnection,
}

impl BudgetRepository {
    /// Creates a new budget repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Creates an empty budget for a month.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Income is negative or too large
    /// - The user already has a budget for the month
    /// - Database operation fails
    pub async fn create_budget(
        &self,
        ctx: &AuthContext,
        input: BudgetInput,
    ) -> Result<MonthlyBudget, StoreError> {
        input.validate()?;
        ensure_period_free(&self.db, ctx, input.period, None).await?;

        let now = Utc::now().into();
        let budget = monthly_budgets::ActiveModel {
            id: Set(BudgetId::new().into_inner()),
            user_id: Set(ctx.user_uuid()),
            income: Set(input.income.minor_units()),
            period: Set(input.period.first_day()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            user_id = %ctx.user_id,
            budget_id = %budget.id,
            period = %input.period,
            "Budget created"
        );
        Ok(budget.into())
    }

    /// Creates the month after `source` by rolling it over.
    ///
    /// Without an explicit source, the user's latest budget is used. Every
    /// category is copied; only recurring transactions are, re-dated into the
    /// new month. Everything is written in one database transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `source` is unknown or owned by someone else
    /// - No source is given and the user has no budget yet
    /// - The following month already has a budget
    /// - Database operation fails
    pub async fn create_next_budget(
        &self,
        ctx: &AuthContext,
        source: Option<BudgetId>,
    ) -> Result<BudgetDetail, StoreError> {
        let txn = self.db.begin().await?;

        let source_model = match source {
            Some(id) => owned_budget(&txn, ctx, id).await?,
            None => latest_budget(&txn, ctx).await?.ok_or_else(|| {
                StoreError::PrerequisiteMissing(
                    "no existing budget to roll over from".to_string(),
                )
            })?,
        };
        let source_id = source_model.id;

        let source_detail = load_budget_details(&txn, vec![source_model])
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found("budget", source_id))?;

        let plan = RolloverPlan::from_source(&source_detail)?;
        ensure_period_free(&txn, ctx, plan.period, None).await?;

        let created = write_plan(&txn, ctx, &plan).await?;
        txn.commit().await?;

        info!(
            user_id = %ctx.user_id,
            source_budget_id = %source_id,
            budget_id = %created.budget.id,
            period = %plan.period,
            categories = plan.categories.len(),
            transactions = plan.transaction_count(),
            "Budget rolled over"
        );
        Ok(created)
    }

    /// Updates a budget's period and income.
    ///
    /// Moving a budget to another month re-dates its transactions into that
    /// month, keeping the day and clamping to the month's last day.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Budget is not found or owned by someone else
    /// - Income is negative or too large
    /// - The target month already has a budget
    /// - Database operation fails
    pub async fn edit_budget(
        &self,
        ctx: &AuthContext,
        id: BudgetId,
        input: BudgetInput,
    ) -> Result<MonthlyBudget, StoreError> {
        input.validate()?;
        let txn = self.db.begin().await?;

        let budget = owned_budget(&txn, ctx, id).await?;
        let moved = budget.budget_period() != input.period;
        let mut moved_transactions = 0;
        if moved {
            ensure_period_free(&txn, ctx, input.period, Some(budget.id)).await?;
            moved_transactions = reanchor_transactions(&txn, budget.id, input.period).await?;
        }

        let mut active: monthly_budgets::ActiveModel = budget.into();
        active.income = Set(input.income.minor_units());
        active.period = Set(input.period.first_day());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;

        txn.commit().await?;

        info!(
            user_id = %ctx.user_id,
            budget_id = %id,
            period = %input.period,
            moved_transactions,
            "Budget updated"
        );
        Ok(updated.into())
    }

    /// Deletes a budget with its categories and their transactions.
    ///
    /// Returns what was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found, is owned by someone else,
    /// or the database operation fails.
    pub async fn delete_budget(
        &self,
        ctx: &AuthContext,
        id: BudgetId,
    ) -> Result<BudgetDetail, StoreError> {
        let txn = self.db.begin().await?;

        let budget = owned_budget(&txn, ctx, id).await?;
        let detail = load_budget_details(&txn, vec![budget])
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found("budget", id))?;

        let category_ids: Vec<Uuid> = detail
            .categories
            .iter()
            .map(|c| c.category.id.into_inner())
            .collect();
        if !category_ids.is_empty() {
            transactions::Entity::delete_many()
                .filter(transactions::Column::CategoryId.is_in(category_ids))
                .exec(&txn)
                .await?;
        }
        categories::Entity::delete_many()
            .filter(categories::Column::BudgetId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        monthly_budgets::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            user_id = %ctx.user_id,
            budget_id = %id,
            categories = detail.categories.len(),
            "Budget deleted"
        );
        Ok(detail)
    }

    /// Gets a budget with its categories and transactions.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found, is owned by someone else,
    /// or the database query fails.
    pub async fn get_budget(
        &self,
        ctx: &AuthContext,
        id: BudgetId,
    ) -> Result<BudgetDetail, StoreError> {
        let budget = owned_budget(&self.db, ctx, id).await?;
        debug!(user_id = %ctx.user_id, budget_id = %id, "Loading budget");

        load_budget_details(&self.db, vec![budget])
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found("budget", id))
    }

    /// Lists the user's budgets in `year`, ordered by month.
    ///
    /// # Errors
    ///
    /// Returns an error if the year is out of range or the database query
    /// fails.
    pub async fn list_budgets(
        &self,
        ctx: &AuthContext,
        year: i32,
    ) -> Result<Vec<BudgetDetail>, StoreError> {
        let first = BudgetPeriod::new(year, 1)?;
        let last = BudgetPeriod::new(year, 12)?;

        let budgets = monthly_budgets::Entity::find()
            .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
            .filter(monthly_budgets::Column::Period.gte(first.first_day()))
            .filter(monthly_budgets::Column::Period.lte(last.first_day()))
            .order_by_asc(monthly_budgets::Column::Period)
            .all(&self.db)
            .await?;

        debug!(user_id = %ctx.user_id, year, count = budgets.len(), "Listing budgets");
        Ok(load_budget_details(&self.db, budgets).await?)
    }

    /// Years in which the user has at least one budget, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn list_budget_years(&self, ctx: &AuthContext) -> Result<Vec<i32>, StoreError> {
        let budgets = monthly_budgets::Entity::find()
            .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
            .all(&self.db)
            .await?;

        let years: BTreeSet<i32> = budgets.iter().map(|b| b.budget_period().year()).collect();
        Ok(years.into_iter().rev().collect())
    }
}

async fn latest_budget<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
) -> Result<Option<monthly_budgets::Model>, StoreError> {
    Ok(monthly_budgets::Entity::find()
        .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
        .order_by_desc(monthly_budgets::Column::Period)
        .order_by_desc(monthly_budgets::Column::CreatedAt)
        .one(conn)
        .await?)
}

/// Fails with `DuplicatePeriod` if the user already has a budget for `period`
/// other than `except`.
async fn ensure_period_free<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
    period: BudgetPeriod,
    except: Option<Uuid>,
) -> Result<(), StoreError> {
    let mut query = monthly_budgets::Entity::find()
        .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
        .filter(monthly_budgets::Column::Period.eq(period.first_day()));
    if let Some(id) = except {
        query = query.filter(monthly_budgets::Column::Id.ne(id));
    }

    if query.one(conn).await?.is_some() {
        return Err(StoreError::DuplicatePeriod {
            year: period.year(),
            month: period.month(),
        });
    }
    Ok(())
}

/// Moves every transaction of a budget into `period`. Returns how many moved.
async fn reanchor_transactions<C: ConnectionTrait>(
    conn: &C,
    budget_id: Uuid,
    period: BudgetPeriod,
) -> Result<usize, StoreError> {
    let category_ids: Vec<Uuid> = categories::Entity::find()
        .filter(categories::Column::BudgetId.eq(budget_id))
        .all(conn)
        .await?
        .into_iter()
        .map(|c| c.id)
        .collect();
    if category_ids.is_empty() {
        return Ok(0);
    }

    let models = transactions::Entity::find()
        .filter(transactions::Column::CategoryId.is_in(category_ids))
        .all(conn)
        .await?;

    let count = models.len();
    for model in models {
        let date = period.reanchor(model.date);
        let mut active: transactions::ActiveModel = model.into();
        active.date = Set(date);
        active.update(conn).await?;
    }
    Ok(count)
}

/// Inserts the budget a rollover plan describes.
async fn write_plan<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
    plan: &RolloverPlan,
) -> Result<BudgetDetail, StoreError> {
    let now = Utc::now().into();
    let budget = monthly_budgets::ActiveModel {
        id: Set(BudgetId::new().into_inner()),
        user_id: Set(ctx.user_uuid()),
        income: Set(plan.income.minor_units()),
        period: Set(plan.period.first_day()),
        created_at: Set(now),
        updated_at: Set(now),
    }
    .insert(conn)
    .await?;

    let mut categories_out = Vec::with_capacity(plan.categories.len());
    for planned in &plan.categories {
        // Stamped one by one so the copies keep the source's creation order.
        let stamped = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            budget_id: Set(budget.id),
            label: Set(planned.label.clone()),
            monthly_amount: Set(planned.monthly_amount.minor_units()),
            created_at: Set(stamped),
            updated_at: Set(stamped),
        }
        .insert(conn)
        .await?;

        let mut transactions_out: Vec<Transaction> =
            Vec::with_capacity(planned.transactions.len());
        for planned_transaction in &planned.transactions {
            let transaction = transactions::ActiveModel {
                id: Set(TransactionId::new().into_inner()),
                category_id: Set(category.id),
                amount: Set(planned_transaction.amount.minor_units()),
                source: Set(planned_transaction.source.clone()),
                date: Set(planned_transaction.date),
                recurring: Set(true),
                description: Set(planned_transaction.description.clone()),
                created_at: Set(now),
                updated_at: Set(now),
            }
            .insert(conn)
            .await?;
            transactions_out.push(transaction.into());
        }

        categories_out.push(CategoryDetail {
            category: category.into(),
            period: plan.period,
            transactions: transactions_out,
        });
    }

    Ok(BudgetDetail {
        budget: budget.into(),
        categories: categories_out,
    })
}
