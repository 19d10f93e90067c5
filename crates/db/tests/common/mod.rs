//! Shared helpers for repository integration tests.
//!
//! Every test gets its own in-memory `SQLite` database with the schema
//! migrated in.

#![allow(dead_code)]

use sea_orm::DatabaseConnection;
use sea_orm_migration::MigratorTrait;
use shelf_core::budget::{BudgetInput, BudgetPeriod, CategoryInput, TransactionInput};
use shelf_db::migration::Migrator;
use shelf_db::UserRepository;
use shelf_shared::{Amount, AuthContext, DatabaseConfig};
use uuid::Uuid;

/// Connects to a fresh in-memory database and runs the migration.
///
/// The pool holds exactly one connection: each `SQLite` memory connection is
/// its own database.
pub async fn setup() -> DatabaseConnection {
    let config = DatabaseConfig {
        url: "sqlite::memory:".to_string(),
        max_connections: 1,
        min_connections: 1,
        sqlx_logging: false,
    };
    let db = shelf_db::connect(&config)
        .await
        .expect("Failed to connect to database");
    Migrator::up(&db, None)
        .await
        .expect("Failed to run migrations");
    db
}

/// Registers a user with a unique name and returns their context.
pub async fn register(db: &DatabaseConnection, name: &str) -> AuthContext {
    let username = format!("{name}-{}", Uuid::new_v4().simple());
    UserRepository::new(db.clone())
        .create(&username, &format!("{username}@example.com"), "correct horse")
        .await
        .expect("Failed to create user")
        .auth_context()
}

pub fn period(year: i32, month: u32) -> BudgetPeriod {
    BudgetPeriod::new(year, month).expect("valid period")
}

pub fn budget_input(year: i32, month: u32, income_cents: i64) -> BudgetInput {
    BudgetInput {
        period: period(year, month),
        income: Amount::from_minor(income_cents),
    }
}

pub fn category_input(label: &str, planned_cents: i64) -> CategoryInput {
    CategoryInput {
        label: label.to_string(),
        monthly_amount: Amount::from_minor(planned_cents),
    }
}

pub fn transaction_input(cents: i64, day: u32, recurring: bool) -> TransactionInput {
    TransactionInput {
        amount: Amount::from_minor(cents),
        source: "Corner Shop".to_string(),
        day,
        description: format!("spent {cents} on day {day}"),
        recurring,
    }
}
