//! Error taxonomy for fchat.
//!
//! `CredentialError` is what the storage layer reports; `AuthError` is the
//! domain-level outcome of a registration or login attempt. The `AuthError`
//! display strings are served verbatim to clients in the `detail` field of
//! error responses, so they are part of the wire contract and must not be
//! reworded casually.

use thiserror::Error;

/// Errors from the credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// The backing files do not exist yet.
    #[error("credential files are missing")]
    StoreMissing,

    /// The username is already recorded.
    #[error("username already recorded")]
    DuplicateUsername,

    #[error("filesystem error: {0}")]
    FileSystem(String),
}

/// Errors from registration and login.
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Username must be in email format")]
    InvalidUsername,

    #[error(
        "Password must contain at least one uppercase letter, one lowercase letter, one number, one special character, and be at least 8 characters long"
    )]
    InvalidPassword,

    #[error("Username already exists")]
    UsernameTaken,

    /// Login was attempted before any user was ever registered.
    #[error("User data not found")]
    StoreNotFound,

    #[error("Invalid username or password")]
    InvalidCredentials,

    /// The store failed in a way the caller cannot act on.
    #[error("credential store error: {0}")]
    Store(String),
}

impl From<CredentialError> for AuthError {
    fn from(err: CredentialError) -> Self {
        match err {
            CredentialError::StoreMissing => AuthError::StoreNotFound,
            CredentialError::DuplicateUsername => AuthError::UsernameTaken,
            CredentialError::FileSystem(msg) => AuthError::Store(msg),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_auth_error_wire_strings() {
        assert_eq!(
            AuthError::InvalidUsername.to_string(),
            "Username must be in email format"
        );
        assert_eq!(
            AuthError::InvalidPassword.to_string(),
            "Password must contain at least one uppercase letter, one lowercase letter, \
             one number, one special character, and be at least 8 characters long"
        );
        assert_eq!(AuthError::UsernameTaken.to_string(), "Username already exists");
        assert_eq!(AuthError::StoreNotFound.to_string(), "User data not found");
        assert_eq!(
            AuthError::InvalidCredentials.to_string(),
            "Invalid username or password"
        );
    }

    #[test]
    fn test_credential_error_maps_to_auth_error() {
        assert!(matches!(
            AuthError::from(CredentialError::StoreMissing),
            AuthError::StoreNotFound
        ));
        assert!(matches!(
            AuthError::from(CredentialError::DuplicateUsername),
            AuthError::UsernameTaken
        ));
        assert!(matches!(
            AuthError::from(CredentialError::FileSystem("disk full".to_string())),
            AuthError::Store(msg) if msg == "disk full"
        ));
    }
}
