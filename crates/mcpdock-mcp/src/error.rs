//! Error types for transports, the protocol client and the connection manager.

use std::time::Duration;

use thiserror::Error;

use mcpdock_core::domain::{EndpointError, ValidationError};

/// Errors raised while creating or driving a transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The endpoint scheme is neither `http(s)` nor `stdio`.
    #[error("Unsupported transport scheme: {0}")]
    UnsupportedScheme(String),

    /// A `stdio://` endpoint without an executable.
    #[error("Invalid subprocess command: {0}")]
    InvalidCommand(String),

    /// The endpoint string could not be parsed.
    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    /// The subprocess could not be started.
    #[error("Failed to launch '{command}': {reason}")]
    LaunchFailed { command: String, reason: String },

    #[error("Transport I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Request failed or the server answered with a non-success status.
    #[error("HTTP error: {0}")]
    Http(String),

    /// The transport was closed locally or by the peer.
    #[error("Transport closed")]
    Closed,

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl TransportError {
    /// Whether the error means the endpoint configuration itself is wrong,
    /// as opposed to a runtime failure reaching the server.
    pub const fn is_configuration(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedScheme(_) | Self::InvalidCommand(_) | Self::InvalidEndpoint(_)
        )
    }
}

impl From<EndpointError> for TransportError {
    fn from(error: EndpointError) -> Self {
        match error {
            EndpointError::UnsupportedScheme(scheme) => Self::UnsupportedScheme(scheme),
            other => Self::InvalidEndpoint(other.to_string()),
        }
    }
}

impl From<reqwest::Error> for TransportError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

/// JSON-RPC error code for an unknown method.
pub const METHOD_NOT_FOUND: i64 = -32601;

/// Errors raised by a protocol client.
#[derive(Debug, Error)]
pub enum ProtocolError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    /// The server does not implement the method (or did not advertise the
    /// capability).
    #[error("Method not supported by server: {0}")]
    MethodNotFound(String),

    #[error("Server returned error {code}: {message}")]
    Server { code: i64, message: String },

    #[error("Timed out after {after:?} waiting for '{method}'")]
    Timeout { method: String, after: Duration },

    #[error("Connection closed")]
    Closed,

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl ProtocolError {
    pub const fn is_method_not_found(&self) -> bool {
        matches!(self, Self::MethodNotFound(_))
    }

    /// Whether the connection can no longer be used.
    pub const fn is_connection_lost(&self) -> bool {
        matches!(
            self,
            Self::Closed | Self::Transport(TransportError::Closed | TransportError::Io(_))
        )
    }
}

/// Caller-facing errors of the connection manager.
///
/// Only contract violations are errors; connection failures are reported
/// through server status and invocation failures through result values.
#[derive(Debug, Error)]
pub enum McpError {
    #[error("Unknown server: {0}")]
    UnknownServer(String),

    #[error("Server already registered: {0}")]
    ServerExists(String),

    #[error("Server not connected: {0}")]
    ServerNotConnected(String),

    #[error("Prompt not found: {0}")]
    PromptNotFound(String),

    #[error("Invalid server configuration: {}", join_errors(.0))]
    InvalidConfig(Vec<ValidationError>),

    /// A replace tried to change a field other than `enabled` or the auth token.
    #[error("Field '{0}' cannot be changed; remove and re-add the server instead")]
    ImmutableField(&'static str),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Protocol(#[from] ProtocolError),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}
