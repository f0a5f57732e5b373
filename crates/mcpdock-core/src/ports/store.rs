//! Durable key-value persistence for JSON documents.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

/// Errors raised by a key-value store.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backing store cannot be reached (missing directory, permissions).
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    /// Reading or writing a value failed.
    #[error("Store I/O error: {0}")]
    Io(String),

    /// A stored document could not be encoded or decoded.
    #[error("Serialization error: {0}")]
    Serialization(String),
}

/// Key-value store holding JSON documents.
///
/// Keys are short ASCII identifiers chosen by the caller. Implementations
/// must make `set` atomic with respect to concurrent `get`s of the same key.
#[async_trait]
pub trait KeyValueStore: Send + Sync {
    /// Fetch a document; `Ok(None)` when the key was never written or was removed.
    async fn get(&self, key: &str) -> Result<Option<Value>, StoreError>;

    /// Replace the document stored under `key`.
    async fn set(&self, key: &str, value: Value) -> Result<(), StoreError>;

    /// Remove the document; removing a missing key succeeds.
    async fn remove(&self, key: &str) -> Result<(), StoreError>;
}
