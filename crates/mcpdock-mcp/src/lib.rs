//! MCP client side of mcpdock.
//!
//! - [`transport`] - HTTP streaming and stdio subprocess channels
//! - [`protocol`] - JSON-RPC session (handshake, listings, invocations)
//! - [`ConnectionManager`] - server lifecycle, discovery and the aggregated
//!   tool/resource/prompt catalogs
//!
//! Storage lives behind [`mcpdock_core::ports::ServerRegistryPort`]; this
//! crate never touches the filesystem directly.

#![deny(unsafe_code)]

pub mod content;
pub mod error;
mod manager;
pub mod probe;
pub mod protocol;
pub mod transport;

pub use error::{McpError, ProtocolError, TransportError};
pub use manager::{ConnectionManager, ManagerConfig};
pub use protocol::{ClientIdentity, JsonRpcConnector, ProtocolClient, ProtocolConnector};
pub use transport::{DefaultTransportFactory, Transport, TransportFactory};

// Re-export domain types from core for convenience
pub use mcpdock_core::domain::{
    ArgValue, Arguments, HealthCheckResult, Prompt, Resource, ResourceContent, ServerConfig,
    ServerStatus, Tool, ToolResult,
};
