//! Registration and login orchestration.

use tracing::{debug, info};

use fchat_types::error::AuthError;

use crate::auth::store::CredentialStore;
use crate::auth::validate::{validate_password, validate_username};

/// Registers and authenticates users against a credential store.
///
/// Generic over `CredentialStore` to maintain clean architecture
/// (fchat-core never depends on fchat-infra).
pub struct AuthService<S: CredentialStore> {
    store: S,
}

impl<S: CredentialStore> AuthService<S> {
    /// Create a new auth service over the given store.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Register a new user.
    ///
    /// Credential shapes are validated before the store is touched, so a
    /// malformed username or password never reaches persistence.
    pub async fn register(&self, username: &str, password: &str) -> Result<(), AuthError> {
        validate_username(username)?;
        validate_password(password)?;
        self.store.insert(username, password).await?;
        info!(username, "user registered");
        Ok(())
    }

    /// Check a login attempt.
    ///
    /// A mismatched password and an unknown username both collapse into
    /// [`AuthError::InvalidCredentials`]; a store that has never been
    /// written surfaces as [`AuthError::StoreNotFound`].
    pub async fn login(&self, username: &str, password: &str) -> Result<(), AuthError> {
        if self.store.verify(username, password).await? {
            debug!(username, "login accepted");
            Ok(())
        } else {
            debug!(username, "login rejected");
            Err(AuthError::InvalidCredentials)
        }
    }
}
