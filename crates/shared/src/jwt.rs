//! JWT bearer-token verification.
//!
//! Tokens are issued elsewhere; this module only turns a presented token into
//! an `AuthContext`.

use jsonwebtoken::{Algorithm, DecodingKey, Validation, decode};
use thiserror::Error;

use crate::auth::{AuthContext, Claims};
use crate::config::AuthConfig;
use crate::error::AppError;

/// Errors that can occur during token verification.
#[derive(Debug, Error)]
pub enum JwtError {
    /// No bearer token was presented.
    #[error("missing bearer token")]
    Missing,

    /// Token decoding failed.
    #[error("failed to decode token: {0}")]
    DecodingError(String),

    /// Token has expired.
    #[error("token has expired")]
    Expired,
}

impl From<JwtError> for AppError {
    fn from(err: JwtError) -> Self {
        Self::Unauthorized(err.to_string())
    }
}

/// Verifies HS256 bearer tokens.
#[derive(Clone)]
pub struct TokenVerifier {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl std::fmt::Debug for TokenVerifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenVerifier")
            .field("decoding_key", &"[hidden]")
            .field("leeway", &self.validation.leeway)
            .finish()
    }
}

impl TokenVerifier {
    /// Creates a verifier from the auth configuration.
    #[must_use]
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.leeway_secs;
        validation.set_required_spec_claims(&["exp", "sub"]);

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    /// Validates and decodes a token.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Expired` if the token has expired.
    /// Returns `JwtError::DecodingError` if the token is malformed or the
    /// signature does not match.
    pub fn verify(&self, token: &str) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                jsonwebtoken::errors::ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::DecodingError(e.to_string()),
            })
    }

    /// Resolves an `Authorization` header value into the caller's context.
    ///
    /// # Errors
    ///
    /// Returns `JwtError::Missing` when the header has no bearer token, or any
    /// error from [`TokenVerifier::verify`].
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<AuthContext, JwtError> {
        let token = authorization
            .and_then(extract_bearer_token)
            .ok_or(JwtError::Missing)?;
        let claims = self.verify(token)?;
        Ok(AuthContext::from(&claims))
    }
}

/// Extracts the bearer token from the Authorization header.
fn extract_bearer_token(header: &str) -> Option<&str> {
    header
        .strip_prefix("Bearer ")
        .or_else(|| header.strip_prefix("bearer "))
        .map(str::trim)
        .filter(|token| !token.is_empty())
}
