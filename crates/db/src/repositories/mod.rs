//! Repository abstractions for data access.
//!
//! Repositories provide a clean interface for database operations,
//! hiding the `SeaORM` implementation details from the rest of the application.
//! Every budget, category, and transaction operation takes the caller's
//! `AuthContext`; records owned by anyone else are reported as not found.

pub mod budget;
pub mod category;
mod detail;
mod ownership;
pub mod transaction;
pub mod user;

pub use budget::BudgetRepository;
pub use category::CategoryRepository;
pub use transaction::TransactionRepository;
pub use user::UserRepository;
