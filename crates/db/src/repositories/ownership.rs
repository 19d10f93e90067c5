//! Ownership-scoped lookups.
//!
//! Each lookup filters on the owning budget's `user_id`, joining through the
//! parent tables where needed, so a foreign record is indistinguishable from
//! a missing one.

use sea_orm::{
    ColumnTrait, ConnectionTrait, EntityTrait, JoinType, QueryFilter, QuerySelect, RelationTrait,
};
use shelf_shared::{AuthContext, BudgetId, CategoryId, TransactionId};

use crate::entities::{categories, monthly_budgets, transactions};
use crate::error::StoreError;

pub(crate) async fn owned_budget<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
    id: BudgetId,
) -> Result<monthly_budgets::Model, StoreError> {
    monthly_budgets::Entity::find_by_id(id.into_inner())
        .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
        .one(conn)
        .await?
        .ok_or_else(|| StoreError::not_found("budget", id))
}

/// Returns the category together with its owning budget.
pub(crate) async fn owned_category<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
    id: CategoryId,
) -> Result<(categories::Model, monthly_budgets::Model), StoreError> {
    let found = categories::Entity::find_by_id(id.into_inner())
        .find_also_related(monthly_budgets::Entity)
        .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
        .one(conn)
        .await?;

    match found {
        Some((category, Some(budget))) => Ok((category, budget)),
        _ => Err(StoreError::not_found("category", id)),
    }
}

/// Returns the transaction together with its owning budget.
pub(crate) async fn owned_transaction<C: ConnectionTrait>(
    conn: &C,
    ctx: &AuthContext,
    id: TransactionId,
) -> Result<(transactions::Model, monthly_budgets::Model), StoreError> {
    let found = transactions::Entity::find_by_id(id.into_inner())
        .join(JoinType::InnerJoin, transactions::Relation::Categories.def())
        .join(
            JoinType::InnerJoin,
            categories::Relation::MonthlyBudgets.def(),
        )
        .select_also(monthly_budgets::Entity)
        .filter(monthly_budgets::Column::UserId.eq(ctx.user_uuid()))
        .one(conn)
        .await?;

    match found {
        Some((transaction, Some(budget))) => Ok((transaction, budget)),
        _ => Err(StoreError::not_found("transaction", id)),
    }
}
