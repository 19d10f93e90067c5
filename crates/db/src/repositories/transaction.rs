//! Transaction repository.
//!
//! Callers supply only the day of month; the year and month always come from
//! the owning budget, so a transaction's date never leaves its budget's month.

use chrono::Utc;
use sea_orm::{ActiveModelTrait, DatabaseConnection, EntityTrait, Set, TransactionTrait};
use shelf_core::budget::{Transaction, TransactionInput};
use shelf_shared::{AuthContext, CategoryId, TransactionId};
use tracing::{debug, info};

use super::ownership::{owned_category, owned_transaction};
use crate::entities::transactions;
use crate::error::StoreError;

/// Transaction repository for CRUD operations.
#[derive(Debug, Clone)]
pub struct TransactionRepository {
    db: DatabaseConnection,
}

impl TransactionRepository {
    /// Creates a new transaction repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Records a transaction in a category.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Category is not found or owned by someone else
    /// - The day does not exist in the budget's month
    /// - Amount exceeds the accepted magnitude
    /// - Source or description is too long
    /// - Database operation fails
    pub async fn create_transaction(
        &self,
        ctx: &AuthContext,
        category_id: CategoryId,
        input: TransactionInput,
    ) -> Result<Transaction, StoreError> {
        let (category, budget) = owned_category(&self.db, ctx, category_id).await?;
        let date = input.resolve_date(budget.budget_period())?;

        let now = Utc::now().into();
        let transaction = transactions::ActiveModel {
            id: Set(TransactionId::new().into_inner()),
            category_id: Set(category.id),
            amount: Set(input.amount.minor_units()),
            source: Set(input.source),
            date: Set(date),
            recurring: Set(input.recurring),
            description: Set(input.description),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(
            user_id = %ctx.user_id,
            category_id = %category_id,
            transaction_id = %transaction.id,
            amount = transaction.amount,
            %date,
            "Transaction created"
        );
        Ok(transaction.into())
    }

    /// Updates a transaction. It stays in its category.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Transaction is not found or owned by someone else
    /// - The day does not exist in the budget's month
    /// - Amount exceeds the accepted magnitude
    /// - Source or description is too long
    /// - Database operation fails
    pub async fn edit_transaction(
        &self,
        ctx: &AuthContext,
        id: TransactionId,
        input: TransactionInput,
    ) -> Result<Transaction, StoreError> {
        let txn = self.db.begin().await?;
        let (transaction, budget) = owned_transaction(&txn, ctx, id).await?;
        let date = input.resolve_date(budget.budget_period())?;

        let mut active: transactions::ActiveModel = transaction.into();
        active.amount = Set(input.amount.minor_units());
        active.source = Set(input.source);
        active.date = Set(date);
        active.recurring = Set(input.recurring);
        active.description = Set(input.description);
        active.updated_at = Set(Utc::now().into());
        let updated = active.update(&txn).await?;
        txn.commit().await?;

        info!(user_id = %ctx.user_id, transaction_id = %id, %date, "Transaction updated");
        Ok(updated.into())
    }

    /// Deletes a transaction and returns it.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found, is owned by someone
    /// else, or the database operation fails.
    pub async fn delete_transaction(
        &self,
        ctx: &AuthContext,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        let (transaction, _) = owned_transaction(&self.db, ctx, id).await?;

        transactions::Entity::delete_by_id(transaction.id)
            .exec(&self.db)
            .await?;

        info!(user_id = %ctx.user_id, transaction_id = %id, "Transaction deleted");
        Ok(transaction.into())
    }

    /// Gets a transaction.
    ///
    /// # Errors
    ///
    /// Returns an error if the transaction is not found, is owned by someone
    /// else, or the database query fails.
    pub async fn get_transaction(
        &self,
        ctx: &AuthContext,
        id: TransactionId,
    ) -> Result<Transaction, StoreError> {
        debug!(user_id = %ctx.user_id, transaction_id = %id, "Loading transaction");
        let (transaction, _) = owned_transaction(&self.db, ctx, id).await?;
        Ok(transaction.into())
    }
}
