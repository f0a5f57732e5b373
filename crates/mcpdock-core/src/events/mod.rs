//! Canonical event union for connection-manager state changes.
//!
//! Subscribers (UI layers, routing layers, tests) observe these instead of
//! polling the manager. Events describe what changed; the current state is
//! always available from the manager's snapshot accessors.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "status_changed", "serverId": "…", "status": { "state": "connected" } }
//! ```

mod mcp;

use serde::{Deserialize, Serialize};

use crate::domain::ServerStatus;

pub use mcp::ServerSummary;

/// Events published by the connection manager.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum McpEvent {
    /// A server configuration was added.
    ServerAdded {
        /// Summary of the added server.
        server: ServerSummary,
    },

    /// A server configuration was replaced (enabled flag or credentials).
    ServerUpdated {
        /// Summary of the updated server.
        server: ServerSummary,
    },

    /// A server configuration was removed.
    ServerRemoved {
        /// ID of the removed server.
        #[serde(rename = "serverId")]
        server_id: String,
    },

    /// A server's connection status changed.
    StatusChanged {
        /// ID of the server.
        #[serde(rename = "serverId")]
        server_id: String,
        /// New status.
        status: ServerStatus,
    },

    /// The aggregated tool/resource/prompt catalogs changed.
    CatalogChanged {
        #[serde(rename = "toolCount")]
        tool_count: usize,
        #[serde(rename = "resourceCount")]
        resource_count: usize,
        #[serde(rename = "promptCount")]
        prompt_count: usize,
    },

    /// The initial connect-all pass finished.
    Initialized {
        /// Servers connected by the pass.
        connected: usize,
        /// Servers left in error status by the pass.
        failed: usize,
    },
}
