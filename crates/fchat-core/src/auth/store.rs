//! Credential store trait definition.

use fchat_types::error::CredentialError;

/// Trait for credential persistence backends.
///
/// Uses native async fn in traits (RPITIT, Rust 2024 edition). The
/// implementation lives in fchat-infra (`FlatFileCredentialStore`).
pub trait CredentialStore: Send + Sync {
    /// Record a new username/password pair.
    ///
    /// Fails with [`CredentialError::DuplicateUsername`] when the username is
    /// already present. The uniqueness check and the write must be atomic
    /// with respect to concurrent `insert` calls.
    fn insert(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<(), CredentialError>> + Send;

    /// Check a username/password pair against the store.
    ///
    /// `Ok(false)` means no record matches. Fails with
    /// [`CredentialError::StoreMissing`] when the backing storage has never
    /// been created.
    fn verify(
        &self,
        username: &str,
        password: &str,
    ) -> impl std::future::Future<Output = Result<bool, CredentialError>> + Send;
}
