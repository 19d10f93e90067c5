//! Category repository.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, EntityTrait, QueryFilter, QueryOrder, Set,
    TransactionTrait,
};
use shelf_core::budget::{Category, CategoryDetail, CategoryInput};
use shelf_shared::{AuthContext, BudgetId, CategoryId};
use tracing::{debug, info};

use super::detail::load_category_details;
use super::ownership::{owned_budget, owned_category};
use crate::entities::{categories, transactions};
use crate::error::StoreError;

/// Category repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct CategoryRepository {
    db: DatabaseConnection,
}

impl CategoryRepository {
    /// Creates a new category repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Adds a category to a budget.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Budget is not found or owned by someone else
    /// - Label is empty or too long, or the amount is negative or too large
    /// - Database operation fails
    pub async fn create_category(
        &self,
        ctx: &AuthContext,
        budget_id: BudgetId,
        input: CategoryInput,
    ) -> Result<Category, StoreError> {
        let input = input.validated()?;
        let budget = owned_budget(&self.db, ctx, budget_id).await?;

        let now = Utc::now().into();
        let category = categories::ActiveModel {
            id: Set(CategoryId::new().into_inner()),
            budget_id: Set(budget.id),
            label: Set(input.label),
            monthly_amount: Set(input.monthly_amount.minor_units()),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            user_id = %ctx.user_id,
            budget_id = %budget_id,
            category_id = %category.id,
            "Category created"
        );
        Ok(category.into())
    }

    /// Updates a category's label and planned amount.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Category is not found or owned by someone else
    /// - Label is empty or too long, or the amount is negative or too large
    /// - Database operation fails
    pub async fn edit_category(
        &self,
        ctx: &AuthContext,
        id: CategoryId,
        input: CategoryInput,
    ) -> Result<Category, StoreError> {
        let input = input.validated()?;
        let (category, _) = owned_category(&self.db, ctx, id).await?;

        let mut active: categories::ActiveModel = category.into();
        active.label = Set(input.label);
        active.monthly_amount = Set(input.monthly_amount.minor_units());
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&self.db).await?;

        info!(user_id = %ctx.user_id, category_id = %id, "Category updated");
        Ok(updated.into())
    }

    /// Deletes a category and its transactions.
    ///
    /// Returns what was deleted.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found, is owned by someone
    /// else, or the database operation fails.
    pub async fn delete_category(
        &self,
        ctx: &AuthContext,
        id: CategoryId,
    ) -> Result<CategoryDetail, StoreError> {
        let txn = self.db.begin().await?;

        let (category, budget) = owned_category(&txn, ctx, id).await?;
        let detail = load_category_details(&txn, vec![category], budget.budget_period())
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found("category", id))?;

        let removed = transactions::Entity::delete_many()
            .filter(transactions::Column::CategoryId.eq(id.into_inner()))
            .exec(&txn)
            .await?;
        categories::Entity::delete_by_id(id.into_inner())
            .exec(&txn)
            .await?;

        txn.commit().await?;

        info!(
            user_id = %ctx.user_id,
            category_id = %id,
            transactions = removed.rows_affected,
            "Category deleted"
        );
        Ok(detail)
    }

    /// Gets a category with its transactions, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the category is not found, is owned by someone
    /// else, or the database query fails.
    pub async fn get_category(
        &self,
        ctx: &AuthContext,
        id: CategoryId,
    ) -> Result<CategoryDetail, StoreError> {
        let (category, budget) = owned_category(&self.db, ctx, id).await?;
        debug!(user_id = %ctx.user_id, category_id = %id, "Loading category");

        load_category_details(&self.db, vec![category], budget.budget_period())
            .await?
            .pop()
            .ok_or_else(|| StoreError::not_found("category", id))
    }

    /// Lists a budget's categories in creation order.
    ///
    /// # Errors
    ///
    /// Returns an error if the budget is not found, is owned by someone else,
    /// or the database query fails.
    pub async fn list_categories(
        &self,
        ctx: &AuthContext,
        budget_id: BudgetId,
    ) -> Result<Vec<CategoryDetail>, StoreError> {
        let budget = owned_budget(&self.db, ctx, budget_id).await?;

        let models = categories::Entity::find()
            .filter(categories::Column::BudgetId.eq(budget.id))
            .order_by_asc(categories::Column::CreatedAt)
            .order_by_asc(categories::Column::Id)
            .all(&self.db)
            .await?;

        debug!(
            user_id = %ctx.user_id,
            budget_id = %budget_id,
            count = models.len(),
            "Listing categories"
        );
        Ok(load_category_details(&self.db, models, budget.budget_period()).await?)
    }
}
