//! Composition utilities for building a [`ServerRegistry`].
//!
//! Construction only; no domain logic lives here.

use std::path::PathBuf;
use std::sync::Arc;

use mcpdock_core::paths::{PathError, store_dir};
use mcpdock_core::ports::Logger;

use crate::registry::ServerRegistry;
use crate::stores::{JsonFileStore, KeyringCredentialStore, MemoryCredentialStore, MemoryStore};

/// Factory for registry instances with concrete storage backends.
pub struct RegistryFactory;

impl RegistryFactory {
    /// Registry over the default data directory and the OS keyring.
    pub fn open_default(logger: Arc<dyn Logger>) -> Result<ServerRegistry, PathError> {
        Ok(Self::open(store_dir()?, logger))
    }

    /// Registry over JSON documents in `dir` and the OS keyring.
    pub fn open(dir: impl Into<PathBuf>, logger: Arc<dyn Logger>) -> ServerRegistry {
        ServerRegistry::new(
            Arc::new(JsonFileStore::new(dir)),
            Arc::new(KeyringCredentialStore::new()),
            logger,
        )
    }

    /// Registry that forgets everything when dropped.
    pub fn in_memory(logger: Arc<dyn Logger>) -> ServerRegistry {
        ServerRegistry::new(
            Arc::new(MemoryStore::new()),
            Arc::new(MemoryCredentialStore::new()),
            logger,
        )
    }
}
