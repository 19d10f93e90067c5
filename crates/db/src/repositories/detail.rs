//! Loading budgets and categories together with their children.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter, QueryOrder};
use shelf_core::budget::{BudgetDetail, BudgetPeriod, CategoryDetail, Transaction};
use uuid::Uuid;

use crate::entities::{categories, monthly_budgets, transactions};

/// Loads every category of `budgets` with its transactions.
///
/// Output order follows `budgets`; categories are in creation order.
pub(crate) async fn load_budget_details<C: ConnectionTrait>(
    conn: &C,
    budgets: Vec<monthly_budgets::Model>,
) -> Result<Vec<BudgetDetail>, DbErr> {
    if budgets.is_empty() {
        return Ok(Vec::new());
    }

    let budget_ids: Vec<Uuid> = budgets.iter().map(|b| b.id).collect();
    let category_models = categories::Entity::find()
        .filter(categories::Column::BudgetId.is_in(budget_ids))
        .order_by_asc(categories::Column::CreatedAt)
        .order_by_asc(categories::Column::Id)
        .all(conn)
        .await?;

    let mut transactions_by_category = load_transactions(conn, &category_models).await?;
    let mut categories_by_budget: HashMap<Uuid, Vec<categories::Model>> = HashMap::new();
    for category in category_models {
        categories_by_budget
            .entry(category.budget_id)
            .or_default()
            .push(category);
    }

    Ok(budgets
        .into_iter()
        .map(|budget| {
            let period = budget.budget_period();
            let categories = categories_by_budget
                .remove(&budget.id)
                .unwrap_or_default()
                .into_iter()
                .map(|category| {
                    let transactions = transactions_by_category
                        .remove(&category.id)
                        .unwrap_or_default();
                    CategoryDetail {
                        category: category.into(),
                        period,
                        transactions,
                    }
                })
                .collect();
            BudgetDetail {
                budget: budget.into(),
                categories,
            }
        })
        .collect())
}

/// Loads `categories` (all from one budget in `period`) with their transactions.
pub(crate) async fn load_category_details<C: ConnectionTrait>(
    conn: &C,
    category_models: Vec<categories::Model>,
    period: BudgetPeriod,
) -> Result<Vec<CategoryDetail>, DbErr> {
    let mut transactions_by_category = load_transactions(conn, &category_models).await?;

    Ok(category_models
        .into_iter()
        .map(|category| CategoryDetail {
            transactions: transactions_by_category
                .remove(&category.id)
                .unwrap_or_default(),
            category: category.into(),
            period,
        })
        .collect())
}

/// Transactions of `category_models`, grouped by category, newest first.
async fn load_transactions<C: ConnectionTrait>(
    conn: &C,
    category_models: &[categories::Model],
) -> Result<HashMap<Uuid, Vec<Transaction>>, DbErr> {
    let mut grouped: HashMap<Uuid, Vec<Transaction>> = HashMap::new();
    if category_models.is_empty() {
        return Ok(grouped);
    }

    let category_ids: Vec<Uuid> = category_models.iter().map(|c| c.id).collect();
    let models = transactions::Entity::find()
        .filter(transactions::Column::CategoryId.is_in(category_ids))
        .order_by_desc(transactions::Column::Date)
        .order_by_desc(transactions::Column::CreatedAt)
        .order_by_desc(transactions::Column::Id)
        .all(conn)
        .await?;

    for model in models {
        grouped
            .entry(model.category_id)
            .or_default()
            .push(model.into());
    }
    Ok(grouped)
}
