//! Credential handling.
//!
//! Passwords are stored as Argon2id PHC strings; nothing else about
//! authentication lives in the core.

mod password;

pub use password::{PasswordError, hash_password, verify_password};

/// Maximum length of a username.
pub const USERNAME_MAX_LEN: usize = 150;

/// Normalizes and checks a username.
///
/// Returns the trimmed username, or `None` when it is empty, too long, or
/// contains whitespace.
#[must_use]
pub fn normalize_username(username: &str) -> Option<String> {
    let trimmed = username.trim();
    let valid = !trimmed.is_empty()
        && trimmed.chars().count() <= USERNAME_MAX_LEN
        && !trimmed.chars().any(char::is_whitespace);
    valid.then(|| trimmed.to_string())
}
