//! CLI-specific error types and exit codes.

use mcpdock_mcp::McpError;
use thiserror::Error;

/// CLI-specific error type.
#[derive(Debug, Error)]
pub enum CliError {
    /// Connection manager error.
    #[error("{0}")]
    Mcp(#[from] McpError),

    /// Argument parsing error.
    #[error("Invalid arguments: {0}")]
    Arguments(String),

    /// No server, tool or resource matched.
    #[error("{0}")]
    NotFound(String),

    /// The tool ran and reported an error.
    #[error("Tool failed: {0}")]
    ToolFailed(String),

    /// Several servers matched where one was expected.
    #[error("{0}")]
    Ambiguous(String),

    /// IO error (stdin closed, permission denied, etc.).
    #[error("IO error: {0}")]
    Io(String),

    /// Data directory could not be resolved.
    #[error("Configuration error: {0}")]
    Config(String),
}

impl CliError {
    /// Map error to an exit code.
    ///
    /// Exit codes follow Unix conventions:
    /// - 1: General error
    /// - 2: Misuse of shell command (invalid arguments)
    /// - 64-78: Specific error categories (see sysexits.h)
    pub const fn exit_code(&self) -> i32 {
        match self {
            Self::Mcp(McpError::InvalidConfig(_) | McpError::ImmutableField(_))
            | Self::Arguments(_)
            | Self::Ambiguous(_) => 2,
            Self::NotFound(_) => 66, // EX_NOINPUT
            Self::Mcp(McpError::ServerNotConnected(_)) => 69, // EX_UNAVAILABLE
            Self::Mcp(_) | Self::ToolFailed(_) => 1,
            Self::Io(_) => 74,     // EX_IOERR
            Self::Config(_) => 78, // EX_CONFIG
        }
    }
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}
