//! MCP server domain types.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::args::Arguments;
use super::endpoint::{Endpoint, EndpointError};
use super::validation::{ValidationError, validate_config};

/// Stable identifier of a configured server.
pub type ServerId = String;

const fn default_enabled() -> bool {
    true
}

/// Configuration of one MCP server.
///
/// Identity, name, endpoint and description are fixed at construction.
/// `enabled` and the auth token change only by building a replacement value
/// with [`ServerConfig::with_enabled`] / [`ServerConfig::with_auth_token`].
///
/// The auth token is never serialized; the registry keeps it in the
/// credential store.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerConfig {
    id: ServerId,
    name: String,
    endpoint: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    description: Option<String>,
    #[serde(default = "default_enabled")]
    enabled: bool,
    #[serde(skip)]
    auth_token: Option<String>,
}

impl ServerConfig {
    /// Create an enabled configuration with a fresh identifier.
    pub fn new(name: impl Into<String>, endpoint: impl Into<String>) -> Self {
        Self::with_id(Uuid::new_v4().to_string(), name, endpoint)
    }

    /// Create an enabled configuration with a caller-chosen identifier.
    pub fn with_id(
        id: impl Into<ServerId>,
        name: impl Into<String>,
        endpoint: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            endpoint: endpoint.into(),
            description: None,
            enabled: true,
            auth_token: None,
        }
    }

    /// Set the description.
    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Replacement with a different enabled flag.
    #[must_use]
    pub fn with_enabled(mut self, enabled: bool) -> Self {
        self.enabled = enabled;
        self
    }

    /// Replacement with a different auth token (`None` clears it).
    #[must_use]
    pub fn with_auth_token(mut self, token: Option<String>) -> Self {
        self.auth_token = token.filter(|t| !t.is_empty());
        self
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub const fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn auth_token(&self) -> Option<&str> {
        self.auth_token.as_deref()
    }

    /// Parse the endpoint string.
    pub fn parsed_endpoint(&self) -> Result<Endpoint, EndpointError> {
        Endpoint::parse(&self.endpoint)
    }

    /// Configuration errors that do not depend on other servers.
    pub fn validate(&self) -> Vec<ValidationError> {
        validate_config(self)
    }

    /// First identity field that differs from `other`, ignoring the fields
    /// that may be replaced (`enabled` and the auth token).
    pub fn changed_identity_field(&self, other: &Self) -> Option<&'static str> {
        if self.id != other.id {
            Some("id")
        } else if self.name != other.name {
            Some("name")
        } else if self.endpoint != other.endpoint {
            Some("endpoint")
        } else if self.description != other.description {
            Some("description")
        } else {
            None
        }
    }
}

impl fmt::Debug for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServerConfig")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("endpoint", &self.endpoint)
            .field("description", &self.description)
            .field("enabled", &self.enabled)
            .field("auth_token", &self.auth_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

/// Connection state of a server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ConnectionState {
    #[default]
    Disconnected,
    Connecting,
    Connected,
    Error,
}

impl fmt::Display for ConnectionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::Disconnected => "disconnected",
            Self::Connecting => "connecting",
            Self::Connected => "connected",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// Runtime status of a server. Never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServerStatus {
    pub state: ConnectionState,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_error: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub connected_at: Option<DateTime<Utc>>,
}

impl ServerStatus {
    pub const fn disconnected() -> Self {
        Self {
            state: ConnectionState::Disconnected,
            last_error: None,
            connected_at: None,
        }
    }

    pub const fn connecting() -> Self {
        Self {
            state: ConnectionState::Connecting,
            last_error: None,
            connected_at: None,
        }
    }

    pub const fn connected(at: DateTime<Utc>) -> Self {
        Self {
            state: ConnectionState::Connected,
            last_error: None,
            connected_at: Some(at),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            state: ConnectionState::Error,
            last_error: Some(message.into()),
            connected_at: None,
        }
    }

    pub fn is_connected(&self) -> bool {
        self.state == ConnectionState::Connected
    }
}

/// Tool exposed by an MCP server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tool {
    /// Provider-assigned name; unique within one server.
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// JSON Schema for input parameters.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input_schema: Option<serde_json::Value>,

    pub server_id: ServerId,
}

impl Tool {
    pub fn new(server_id: impl Into<ServerId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: None,
            input_schema: None,
            server_id: server_id.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn with_input_schema(mut self, schema: serde_json::Value) -> Self {
        self.input_schema = Some(schema);
        self
    }
}

/// Resource exposed by an MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resource {
    /// Same as `uri`.
    pub id: String,

    pub uri: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    pub server_id: ServerId,
}

impl Resource {
    pub fn new(
        server_id: impl Into<ServerId>,
        uri: impl Into<String>,
        name: impl Into<String>,
    ) -> Self {
        let uri = uri.into();
        Self {
            id: uri.clone(),
            uri,
            name: name.into(),
            description: None,
            mime_type: None,
            server_id: server_id.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn with_mime_type(mut self, mime_type: impl Into<String>) -> Self {
        self.mime_type = Some(mime_type.into());
        self
    }
}

/// Named argument accepted by a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PromptArgument {
    pub name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default)]
    pub required: bool,
}

/// Prompt template exposed by an MCP server.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Prompt {
    pub id: String,

    pub name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub arguments: Vec<PromptArgument>,

    pub server_id: ServerId,
}

impl Prompt {
    pub fn new(server_id: impl Into<ServerId>, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            id: name.clone(),
            name,
            description: None,
            arguments: Vec::new(),
            server_id: server_id.into(),
        }
    }

    #[must_use]
    pub fn with_description(mut self, desc: impl Into<String>) -> Self {
        self.description = Some(desc.into());
        self
    }

    #[must_use]
    pub fn with_argument(mut self, argument: PromptArgument) -> Self {
        self.arguments.push(argument);
        self
    }
}

/// A tool invocation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToolCall {
    pub call_id: String,
    pub server_id: ServerId,
    pub tool_name: String,
    pub arguments: Arguments,
    pub requested_at: DateTime<Utc>,
}

impl ToolCall {
    pub fn new(tool: &Tool, arguments: Arguments) -> Self {
        Self {
            call_id: Uuid::new_v4().to_string(),
            server_id: tool.server_id.clone(),
            tool_name: tool.name.clone(),
            arguments,
            requested_at: Utc::now(),
        }
    }
}

/// Normalized result of a tool call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ToolResult {
    pub call_id: String,

    pub is_success: bool,

    /// Joined text content (empty on failure).
    pub content: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub timestamp: DateTime<Utc>,
}

impl ToolResult {
    pub fn success(call_id: impl Into<String>, content: impl Into<String>) -> Self {
        Self {
            call_id: call_id.into(),
            is_success: true,
            content: content.into(),
            error: None,
            timestamp: Utc::now(),
        }
    }

    /// A failed result. An empty message is replaced so failures always
    /// carry a description.
    pub fn failure(call_id: impl Into<String>, error: impl Into<String>) -> Self {
        let error = error.into();
        let error = if error.trim().is_empty() {
            "Tool call failed without an error message".to_string()
        } else {
            error
        };
        Self {
            call_id: call_id.into(),
            is_success: false,
            content: String::new(),
            error: Some(error),
            timestamp: Utc::now(),
        }
    }
}

/// Normalized contents of a resource read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceContent {
    pub uri: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,

    pub text: String,
}

/// Outcome of a connectivity probe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HealthCheckResult {
    pub is_healthy: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,

    pub checked_at: DateTime<Utc>,
}

impl HealthCheckResult {
    pub fn healthy() -> Self {
        Self {
            is_healthy: true,
            error: None,
            checked_at: Utc::now(),
        }
    }

    pub fn unhealthy(error: impl Into<String>) -> Self {
        Self {
            is_healthy: false,
            error: Some(error.into()),
            checked_at: Utc::now(),
        }
    }
}
