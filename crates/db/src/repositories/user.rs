//! User repository for database operations.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, DatabaseConnection, DbErr, EntityTrait, PaginatorTrait,
    QueryFilter, Set,
};
use shelf_core::auth::{hash_password, normalize_username, verify_password};
use shelf_shared::{AuthContext, UserId};
use tracing::{info, warn};

use crate::entities::users;
use crate::error::StoreError;

/// User repository for account storage and credential checks.
#[derive(Debug, Clone)]
pub struct UserRepository {
    db: DatabaseConnection,
}

impl UserRepository {
    /// Creates a new user repository.
    #[must_use]
    pub const fn new(db: DatabaseConnection) -> Self {
        Self { db }
    }

    /// Finds a user by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_id(&self, id: UserId) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find_by_id(id.into_inner()).one(&self.db).await
    }

    /// Finds a user by username.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn find_by_username(&self, username: &str) -> Result<Option<users::Model>, DbErr> {
        users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .one(&self.db)
            .await
    }

    /// Checks if a username is already registered.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails.
    pub async fn username_exists(&self, username: &str) -> Result<bool, DbErr> {
        let count = users::Entity::find()
            .filter(users::Column::Username.eq(username.trim()))
            .count(&self.db)
            .await?;
        Ok(count > 0)
    }

    /// Registers a user, storing an Argon2id hash of `password`.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Username is empty, too long, or contains whitespace
    /// - Username is already taken
    /// - Password is empty or cannot be hashed
    /// - Database insert fails
    pub async fn create(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> Result<users::Model, StoreError> {
        let username = normalize_username(username)
            .ok_or_else(|| StoreError::InvalidUsername(username.to_string()))?;
        if self.username_exists(&username).await? {
            return Err(StoreError::DuplicateUsername(username));
        }
        let password_hash = hash_password(password)?;

        let now = chrono::Utc::now().into();
        let user = users::ActiveModel {
            id: Set(UserId::new().into_inner()),
            username: Set(username),
            email: Set(email.trim().to_string()),
            password_hash: Set(password_hash),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
        }
        .insert(&self.db)
        .await?;

        info!(user_id = %user.id, username = %user.username, "User created");
        Ok(user)
    }

    /// Checks a username and password.
    ///
    /// Returns the context to act as the user, or `None` if the user is
    /// unknown, inactive, or the password does not match.
    ///
    /// # Errors
    ///
    /// Returns an error if the database query fails or the stored hash is
    /// unreadable.
    pub async fn verify_credentials(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Option<AuthContext>, StoreError> {
        let Some(user) = self.find_by_username(username).await? else {
            warn!(username = %username.trim(), "Login rejected: unknown user");
            return Ok(None);
        };

        if !user.is_active {
            warn!(user_id = %user.id, "Login rejected: user is inactive");
            return Ok(None);
        }

        if !verify_password(password, &user.password_hash)? {
            warn!(user_id = %user.id, "Login rejected: wrong password");
            return Ok(None);
        }

        info!(user_id = %user.id, "Credentials verified");
        Ok(Some(user.auth_context()))
    }
}
