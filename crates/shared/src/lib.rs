//! Shared types, errors, and configuration for Shelf.
//!
//! This crate provides common types used across all other crates:
//! - Typed IDs for type-safe entity references
//! - The `Amount` money type (integer minor units)
//! - The explicit `AuthContext` threaded through every operation
//! - JWT bearer-token verification
//! - Application-wide error types
//! - Configuration management

pub mod auth;
pub mod config;
pub mod error;
pub mod jwt;
pub mod types;

#[cfg(test)]
mod jwt_tests;

pub use auth::{AuthContext, Claims};
pub use config::{AppConfig, AuthConfig, DatabaseConfig};
pub use error::{AppError, AppResult};
pub use jwt::{JwtError, TokenVerifier};
pub use types::{Amount, AmountParseError, BudgetId, CategoryId, TransactionId, UserId};
