//! Secure credential storage.

use thiserror::Error;

/// Errors raised by a credential store.
#[derive(Debug, Error)]
pub enum CredentialError {
    /// No usable platform store (locked keychain, no secret service).
    #[error("Credential store unavailable: {0}")]
    Unavailable(String),

    /// The platform store rejected the operation.
    #[error("Credential store error: {0}")]
    Backend(String),
}

/// Secret storage keyed by an opaque string.
///
/// The store provides its own atomicity; callers do no locking. Calls may
/// block briefly on the platform service.
pub trait CredentialStore: Send + Sync {
    /// Add or replace the secret for `key`.
    fn set(&self, key: &str, secret: &str) -> Result<(), CredentialError>;

    /// Fetch the secret for `key`; `Ok(None)` when absent.
    fn get(&self, key: &str) -> Result<Option<String>, CredentialError>;

    /// Delete the secret for `key`; deleting a missing secret succeeds.
    fn delete(&self, key: &str) -> Result<(), CredentialError>;
}
