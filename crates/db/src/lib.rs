//! Database layer with `SeaORM` entities and repositories.
//!
//! This crate provides:
//! - `SeaORM` entity definitions for users, budgets, categories, and transactions
//! - The schema migration
//! - Repositories implementing every budget operation, each scoped to the
//!   caller's `AuthContext`

pub mod entities;
pub mod error;
pub mod migration;
pub mod repositories;

pub use error::StoreError;
pub use repositories::{
    BudgetRepository, CategoryRepository, TransactionRepository, UserRepository,
};

use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr};
use shelf_shared::DatabaseConfig;

/// Establishes a connection pool to the configured database.
///
/// # Errors
///
/// Returns an error if the connection cannot be established.
pub async fn connect(config: &DatabaseConfig) -> Result<DatabaseConnection, DbErr> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .sqlx_logging(config.sqlx_logging);

    let db = Database::connect(options).await?;
    tracing::info!(
        backend = ?db.get_database_backend(),
        max_connections = config.max_connections,
        "Connected to database"
    );
    Ok(db)
}
