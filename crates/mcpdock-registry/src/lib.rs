//! Server registry and storage adapters for mcpdock.
//!
//! [`ServerRegistry`] implements the core `ServerRegistryPort` over any
//! `KeyValueStore` and `CredentialStore`. [`factory::RegistryFactory`]
//! wires it to the on-disk JSON store and the OS keyring.

#![deny(unsafe_code)]

pub mod factory;
pub mod registry;
pub mod stores;

pub use factory::RegistryFactory;
pub use registry::{
    CAPABILITY_CACHE_KEY, DEFAULT_SERVER_ID, SERVERS_KEY, ServerRegistry, default_servers,
    token_key,
};
pub use stores::{
    JsonFileStore, KEYRING_SERVICE, KeyringCredentialStore, MemoryCredentialStore, MemoryStore,
};
