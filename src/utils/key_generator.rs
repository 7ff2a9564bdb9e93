//! Short key and secret key generation.
//!
//! Keys are drawn uniformly from the 62 ASCII alphanumerics using the
//! thread-local CSPRNG (`rand::rng()`), which is seeded and periodically
//! reseeded from the operating system. Nothing here derives randomness from
//! time or any other guessable seed.

use crate::error::AppError;
use rand::{Rng, distr::Alphanumeric};
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Length of randomly generated public keys.
pub const DEFAULT_KEY_LENGTH: usize = 5;

/// Length used once short keys keep colliding.
pub const EXTENDED_KEY_LENGTH: usize = 12;

/// Length of the random suffix appended to a key to form its secret key.
pub const SECRET_SUFFIX_LENGTH: usize = 8;

pub const CUSTOM_KEY_MIN_LENGTH: usize = 3;
pub const CUSTOM_KEY_MAX_LENGTH: usize = 20;

/// Keys that would shadow service routes.
pub const RESERVED_KEYS: &[&str] = &["admin", "api", "health", "url", "custom_url", "docs"];

static CUSTOM_KEY_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("custom key pattern is valid"));

/// Generates a random alphanumeric key of the given length.
///
/// # Examples
///
/// ```ignore
/// let key = generate_key(DEFAULT_KEY_LENGTH);
/// assert_eq!(key.len(), 5);
/// assert!(key.chars().all(|c| c.is_ascii_alphanumeric()));
/// ```
pub fn generate_key(length: usize) -> String {
    rand::rng()
        .sample_iter(Alphanumeric)
        .take(length)
        .map(char::from)
        .collect()
}

/// Builds the administrative secret for `key`: `<key>_<8 random alphanumerics>`.
///
/// The suffix is independent of the key, so knowing the key gives no
/// information about the secret.
pub fn generate_secret_key(key: &str) -> String {
    format!("{}_{}", key, generate_key(SECRET_SUFFIX_LENGTH))
}

/// Returns true if `key` collides with a service route segment.
pub fn is_reserved_key(key: &str) -> bool {
    RESERVED_KEYS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(key))
}

/// Validates a user-provided custom key.
///
/// # Rules
///
/// - Length: 3-20 characters
/// - Allowed characters: ASCII letters, digits, hyphens, underscores
/// - Cannot be a reserved route segment
///
/// # Errors
///
/// Returns [`AppError::Validation`] if any rule is violated.
pub fn validate_custom_key(key: &str) -> Result<(), AppError> {
    let length = key.chars().count();
    if !(CUSTOM_KEY_MIN_LENGTH..=CUSTOM_KEY_MAX_LENGTH).contains(&length) {
        return Err(AppError::bad_request(
            "Custom key must be 3-20 characters",
            json!({ "provided_length": length }),
        ));
    }

    if !CUSTOM_KEY_REGEX.is_match(key) {
        return Err(AppError::bad_request(
            "Custom key can only contain letters, digits, hyphens, and underscores",
            json!({ "key": key }),
        ));
    }

    if is_reserved_key(key) {
        return Err(AppError::bad_request(
            "This key is reserved",
            json!({ "key": key }),
        ));
    }

    Ok(())
}
