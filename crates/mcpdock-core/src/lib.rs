//! Core domain types and ports for mcpdock.
//!
//! This crate has no knowledge of HTTP, subprocesses or on-disk formats.
//! It defines:
//!
//! - [`domain`] - server configurations, endpoints, discovered capabilities
//!   and normalized invocation results
//! - [`events`] - state-change notifications published by the connection manager
//! - [`ports`] - traits implemented by the registry and transport adapters
//! - [`paths`] - data directory resolution

pub mod domain;
pub mod events;
pub mod paths;
pub mod ports;

// Re-export commonly used types for convenience
pub use domain::{
    ArgValue, Arguments, ConnectionState, Endpoint, EndpointError, HealthCheckResult, Prompt,
    PromptArgument, Resource, ResourceContent, ServerConfig, ServerId, ServerStatus, Tool,
    ToolCall, ToolResult, TransportKind, ValidationError, validate_config, validate_config_with,
};
pub use events::{McpEvent, ServerSummary};
pub use ports::{
    BroadcastEmitter, CAPABILITY_CACHE_TTL, CachedCapabilities, CredentialError, CredentialStore,
    EventEmitter, KeyValueStore, LogLevel, Logger, MemoryLogger, NoopEmitter, NoopLogger,
    ServerRegistryPort, StoreError, TracingLogger,
};

pub use paths::{DATA_DIR_ENV, PathError, data_root, store_dir};
