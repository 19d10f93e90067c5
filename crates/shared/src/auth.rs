//! Authenticated identity types.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::UserId;

/// JWT claims carried by access tokens.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID).
    pub sub: Uuid,
    /// Username at the time the token was issued.
    pub username: String,
    /// Issued at timestamp.
    pub iat: i64,
    /// Expiration timestamp.
    pub exp: i64,
}

impl Claims {
    /// Returns the user ID from claims.
    #[must_use]
    pub const fn user_id(&self) -> UserId {
        UserId::from_uuid(self.sub)
    }
}

/// The authenticated caller of an operation.
///
/// Passed explicitly into every budget, category, and transaction operation;
/// every lookup is scoped by `user_id`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AuthContext {
    /// The authenticated user.
    pub user_id: UserId,
}

impl AuthContext {
    /// Creates a context for the given user.
    #[must_use]
    pub const fn new(user_id: UserId) -> Self {
        Self { user_id }
    }

    /// Returns the raw UUID of the authenticated user.
    #[must_use]
    pub const fn user_uuid(&self) -> Uuid {
        self.user_id.into_inner()
    }
}

impl From<&Claims> for AuthContext {
    fn from(claims: &Claims) -> Self {
        Self::new(claims.user_id())
    }
}
