//! Short code generation, validation, and normalization.
//!
//! One module owns the whole code policy: the generation alphabet, the
//! custom-code format, and the minimal shape check applied before lookups.

use crate::error::AppError;
use rand::Rng;
use regex::Regex;
use serde_json::json;
use std::sync::LazyLock;

/// Generation alphabet. Excludes `0`, `O`, `1`, and `I` so generated codes
/// stay unambiguous when read aloud or retyped.
const ALPHABET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// Length of generated codes.
pub const CODE_LENGTH: usize = 7;

/// Codes shorter than this are rejected before the store is queried.
pub const MIN_LOOKUP_LENGTH: usize = 3;

/// Format for user-supplied custom codes, applied after normalization.
static CUSTOM_CODE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Z0-9]{6,12}$").unwrap());

/// Generates a random 7-character code from the restricted alphabet.
///
/// Each position is drawn uniformly; uniqueness is not guaranteed here —
/// the registry enforces it against the store.
pub fn generate_code() -> String {
    let mut rng = rand::rng();

    (0..CODE_LENGTH)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

/// Trims and uppercases a user-supplied custom code.
pub fn normalize_custom_code(code: &str) -> String {
    code.trim().to_ascii_uppercase()
}

/// Validates an already-normalized custom code against the policy:
/// 6-12 characters, uppercase letters and digits only.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with reason `invalid_code_format`.
pub fn validate_custom_code(code: &str) -> Result<(), AppError> {
    if !CUSTOM_CODE_REGEX.is_match(code) {
        return Err(AppError::bad_request(
            "invalid_code_format",
            "Custom code must be 6-12 letters or digits",
            json!({ "code": code }),
        ));
    }

    Ok(())
}

/// Normalizes an inbound code for lookup: rejects anything shorter than
/// [`MIN_LOOKUP_LENGTH`] without touching the store, uppercases the rest.
///
/// # Errors
///
/// Returns [`AppError::Validation`] with reason `invalid_code`.
pub fn normalize_lookup_code(code: &str) -> Result<String, AppError> {
    if code.len() < MIN_LOOKUP_LENGTH {
        return Err(AppError::bad_request(
            "invalid_code",
            "Code is too short",
            json!({ "code": code }),
        ));
    }

    Ok(code.to_ascii_uppercase())
}
