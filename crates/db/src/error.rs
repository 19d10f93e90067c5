//! Store error type.

use sea_orm::DbErr;
use shelf_core::auth::PasswordError;
use shelf_core::budget::BudgetError;
use shelf_shared::AppError;
use uuid::Uuid;

/// Error types for store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Record does not exist, or belongs to another user.
    #[error("{entity} not found: {id}")]
    NotFound {
        /// Kind of record looked up.
        entity: &'static str,
        /// Requested ID.
        id: Uuid,
    },

    /// Input broke a budget rule.
    #[error(transparent)]
    Validation(#[from] BudgetError),

    /// The operation depends on a record that does not exist yet.
    #[error("Prerequisite missing: {0}")]
    PrerequisiteMissing(String),

    /// The user already has a budget for this month.
    #[error("A budget for {year}-{month:02} already exists")]
    DuplicatePeriod {
        /// Budget year.
        year: i32,
        /// Budget month.
        month: u32,
    },

    /// Username is already registered.
    #[error("Username already taken: {0}")]
    DuplicateUsername(String),

    /// Username is empty, too long, or contains whitespace.
    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    /// Password could not be hashed or checked.
    #[error(transparent)]
    Password(#[from] PasswordError),

    /// Database error.
    #[error("Database error: {0}")]
    Storage(#[from] DbErr),
}

impl StoreError {
    pub(crate) fn not_found(entity: &'static str, id: impl Into<Uuid>) -> Self {
        Self::NotFound {
            entity,
            id: id.into(),
        }
    }
}

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::NotFound { .. } => Self::NotFound(err.to_string()),
            StoreError::Validation(_)
            | StoreError::InvalidUsername(_)
            | StoreError::Password(PasswordError::Empty) => Self::Validation(err.to_string()),
            StoreError::PrerequisiteMissing(_) => Self::BusinessRule(err.to_string()),
            StoreError::DuplicatePeriod { .. } | StoreError::DuplicateUsername(_) => {
                Self::Conflict(err.to_string())
            }
            StoreError::Password(_) => Self::Internal(err.to_string()),
            StoreError::Storage(_) => Self::Database(err.to_string()),
        }
    }
}
