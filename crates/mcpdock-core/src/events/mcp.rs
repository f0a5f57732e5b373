//! MCP server lifecycle events.

use serde::{Deserialize, Serialize};

use super::McpEvent;
use crate::domain::{ServerConfig, ServerStatus};

/// Summary of a server for event payloads.
///
/// This is a lightweight representation for events, not the full
/// `ServerConfig` (and never carries credentials).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServerSummary {
    pub id: String,
    pub name: String,
    pub endpoint: String,
    pub enabled: bool,
}

impl From<&ServerConfig> for ServerSummary {
    fn from(config: &ServerConfig) -> Self {
        Self {
            id: config.id().to_string(),
            name: config.name().to_string(),
            endpoint: config.endpoint().to_string(),
            enabled: config.enabled(),
        }
    }
}

impl McpEvent {
    /// Create a server added event.
    pub fn server_added(config: &ServerConfig) -> Self {
        Self::ServerAdded {
            server: config.into(),
        }
    }

    /// Create a server updated event.
    pub fn server_updated(config: &ServerConfig) -> Self {
        Self::ServerUpdated {
            server: config.into(),
        }
    }

    /// Create a server removed event.
    pub fn server_removed(server_id: impl Into<String>) -> Self {
        Self::ServerRemoved {
            server_id: server_id.into(),
        }
    }

    /// Create a status changed event.
    pub fn status_changed(server_id: impl Into<String>, status: ServerStatus) -> Self {
        Self::StatusChanged {
            server_id: server_id.into(),
            status,
        }
    }

    /// Create a catalog changed event.
    pub const fn catalog_changed(
        tool_count: usize,
        resource_count: usize,
        prompt_count: usize,
    ) -> Self {
        Self::CatalogChanged {
            tool_count,
            resource_count,
            prompt_count,
        }
    }

    /// Create an initialized event.
    pub const fn initialized(connected: usize, failed: usize) -> Self {
        Self::Initialized { connected, failed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_event_wire_format() {
        let event = McpEvent::status_changed("s1", ServerStatus::error("refused"));
        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "status_changed");
        assert_eq!(json["serverId"], "s1");
        assert_eq!(json["status"]["state"], "error");
        assert_eq!(json["status"]["last_error"], "refused");
    }

    #[test]
    fn test_summary_never_carries_token() {
        let config = ServerConfig::with_id("s1", "Remote", "https://mcp.example.com")
            .with_auth_token(Some("hunter2".to_string()));
        let json = serde_json::to_string(&McpEvent::server_added(&config)).unwrap();
        assert!(!json.contains("hunter2"));
        assert!(json.contains("\"type\":\"server_added\""));
    }
}
