//! Storage adapters for the core persistence ports.

mod json_file;
mod keyring_store;
mod memory;

pub use json_file::JsonFileStore;
pub use keyring_store::{KEYRING_SERVICE, KeyringCredentialStore};
pub use memory::{MemoryCredentialStore, MemoryStore};
