//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces that the core domain expects from infrastructure.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No filesystem or keychain types in any signature
//! - Traits are minimal and intent-based
//! - Every component receives its collaborators (including the logger)
//!   as trait objects at construction

pub mod credentials;
pub mod event_emitter;
pub mod logger;
pub mod registry;
pub mod store;

pub use credentials::{CredentialError, CredentialStore};
pub use event_emitter::{BroadcastEmitter, EventEmitter, NoopEmitter};
pub use logger::{LogLevel, Logger, MemoryLogger, NoopLogger, TracingLogger};
pub use registry::{CAPABILITY_CACHE_TTL, CachedCapabilities, ServerRegistryPort};
pub use store::{KeyValueStore, StoreError};
