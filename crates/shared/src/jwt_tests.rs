//! Unit tests for token verification.

use chrono::{Duration, Utc};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use crate::auth::{AuthContext, Claims};
use crate::config::AuthConfig;
use crate::error::AppError;
use crate::jwt::{JwtError, TokenVerifier};
use crate::types::UserId;

const SECRET: &str = "test-secret-key-for-testing";

fn verifier() -> TokenVerifier {
    TokenVerifier::new(&AuthConfig {
        jwt_secret: SECRET.to_string(),
        leeway_secs: 0,
    })
}

fn token_for(user_id: Uuid, expires_in: Duration, secret: &str) -> String {
    let now = Utc::now();
    let claims = Claims {
        sub: user_id,
        username: "alice".to_string(),
        iat: now.timestamp(),
        exp: (now + expires_in).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .unwrap()
}

#[test]
fn test_verify_valid_token() {
    let user_id = Uuid::new_v4();
    let token = token_for(user_id, Duration::minutes(15), SECRET);

    let claims = verifier().verify(&token).unwrap();

    assert_eq!(claims.sub, user_id);
    assert_eq!(claims.username, "alice");
    assert_eq!(claims.user_id(), UserId::from_uuid(user_id));
}

#[test]
fn test_expired_token() {
    let token = token_for(Uuid::new_v4(), Duration::hours(-1), SECRET);

    let result = verifier().verify(&token);

    assert!(matches!(result, Err(JwtError::Expired)));
}

#[test]
fn test_wrong_secret_is_rejected() {
    let token = token_for(Uuid::new_v4(), Duration::minutes(15), "another-secret");

    let result = verifier().verify(&token);

    assert!(matches!(result, Err(JwtError::DecodingError(_))));
}

#[test]
fn test_garbage_token_is_rejected() {
    assert!(verifier().verify("invalid.token.here").is_err());
}

#[test]
fn test_authenticate_bearer_header() {
    let user_id = Uuid::new_v4();
    let token = token_for(user_id, Duration::minutes(15), SECRET);
    let header = format!("Bearer {token}");

    let ctx = verifier().authenticate(Some(&header)).unwrap();

    assert_eq!(ctx, AuthContext::new(UserId::from_uuid(user_id)));
    assert_eq!(ctx.user_uuid(), user_id);
}

#[test]
fn test_authenticate_missing_header() {
    let v = verifier();
    assert!(matches!(v.authenticate(None), Err(JwtError::Missing)));
    assert!(matches!(
        v.authenticate(Some("Basic dXNlcjpwYXNz")),
        Err(JwtError::Missing)
    ));
    assert!(matches!(v.authenticate(Some("Bearer ")), Err(JwtError::Missing)));
}

#[test]
fn test_jwt_error_maps_to_unauthorized() {
    let err: AppError = JwtError::Expired.into();
    assert_eq!(err.status_code(), 401);
    assert_eq!(err.to_string(), "Authentication failed: token has expired");
}
