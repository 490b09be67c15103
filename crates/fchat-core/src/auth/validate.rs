//! Credential shape validation.
//!
//! Usernames must look like an email address. Passwords must contain at
//! least one lowercase letter, one uppercase letter, one digit, and one of
//! the special characters `@$!%*?&`, with a minimum length of 8; only those
//! character classes are allowed at all, so a password containing a space or
//! `#` is rejected regardless of length.

use std::sync::LazyLock;

use regex::Regex;

use fchat_types::error::AuthError;

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is valid"));

/// Allowed characters and minimum length, checked in one pass.
static PASSWORD_SHAPE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z\d@$!%*?&]{8,}$").expect("password shape pattern is valid")
});

static LOWERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[a-z]").expect("lowercase pattern is valid"));

static UPPERCASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Z]").expect("uppercase pattern is valid"));

static DIGIT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d").expect("digit pattern is valid"));

static SPECIAL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[@$!%*?&]").expect("special pattern is valid"));

/// Check that a username is in email format.
pub fn validate_username(username: &str) -> Result<(), AuthError> {
    if EMAIL.is_match(username) {
        Ok(())
    } else {
        Err(AuthError::InvalidUsername)
    }
}

/// Check password complexity: allowed shape plus all four required classes.
pub fn validate_password(password: &str) -> Result<(), AuthError> {
    let ok = PASSWORD_SHAPE.is_match(password)
        && LOWERCASE.is_match(password)
        && UPPERCASE.is_match(password)
        && DIGIT.is_match(password)
        && SPECIAL.is_match(password);
    if ok {
        Ok(())
    } else {
        Err(AuthError::InvalidPassword)
    }
}
