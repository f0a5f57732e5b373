//! Endpoint strings for MCP servers.
//!
//! Two families of endpoint are understood:
//!
//! - network: `http://host[:port]/path` or `https://...`
//! - subprocess: `stdio://<executable> [arg ...]`, percent-encoded when the
//!   command line contains characters a URL cannot carry (spaces, `/`).

use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;
use url::Url;

/// Scheme used for locally spawned servers.
pub const STDIO_SCHEME: &str = "stdio";

/// Schemes served by the streaming HTTP transport.
pub const NETWORK_SCHEMES: [&str; 2] = ["http", "https"];

/// Transport family selected by an endpoint's scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransportKind {
    /// Streamable HTTP (request/response with server-sent events).
    Http,
    /// Child process speaking over stdin/stdout.
    Stdio,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http => f.write_str("http"),
            Self::Stdio => f.write_str("stdio"),
        }
    }
}

/// Errors produced while parsing an endpoint string.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum EndpointError {
    #[error("Endpoint is empty")]
    Empty,

    #[error("Endpoint has no scheme: {0}")]
    MissingScheme(String),

    #[error("Unsupported endpoint scheme: {0}")]
    UnsupportedScheme(String),

    #[error("Network endpoint must specify a host: {0}")]
    MissingHost(String),

    #[error("Invalid endpoint URL {endpoint}: {reason}")]
    InvalidUrl { endpoint: String, reason: String },

    #[error("Endpoint contains invalid percent-encoding: {0}")]
    InvalidEncoding(String),
}

/// A parsed endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Endpoint {
    /// Network server reached over HTTP(S).
    Http { url: Url },
    /// Local server launched from a decoded command line.
    Stdio { command_line: String },
}

impl Endpoint {
    /// Parse an endpoint string.
    ///
    /// The stdio command line is percent-decoded but not validated here; an
    /// empty command is reported by validation and by the transport factory.
    pub fn parse(raw: &str) -> Result<Self, EndpointError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(EndpointError::Empty);
        }

        let Some((scheme, rest)) = trimmed.split_once("://") else {
            return Err(EndpointError::MissingScheme(trimmed.to_string()));
        };
        let scheme = scheme.to_ascii_lowercase();

        if scheme == STDIO_SCHEME {
            let decoded = urlencoding::decode(rest)
                .map_err(|_| EndpointError::InvalidEncoding(trimmed.to_string()))?;
            return Ok(Self::Stdio {
                command_line: decoded.trim().to_string(),
            });
        }

        if NETWORK_SCHEMES.contains(&scheme.as_str()) {
            let url = Url::parse(trimmed).map_err(|e| match e {
                url::ParseError::EmptyHost => EndpointError::MissingHost(trimmed.to_string()),
                other => EndpointError::InvalidUrl {
                    endpoint: trimmed.to_string(),
                    reason: other.to_string(),
                },
            })?;

            if url.host_str().is_none_or(str::is_empty) {
                return Err(EndpointError::MissingHost(trimmed.to_string()));
            }

            return Ok(Self::Http { url });
        }

        Err(EndpointError::UnsupportedScheme(scheme))
    }

    /// Build a `stdio://` endpoint string from an executable and its arguments.
    pub fn stdio_endpoint(executable: &str, args: &[&str]) -> String {
        let mut parts = Vec::with_capacity(args.len() + 1);
        parts.push(executable);
        parts.extend_from_slice(args);
        format!("{STDIO_SCHEME}://{}", urlencoding::encode(&parts.join(" ")))
    }

    /// Transport family for this endpoint.
    pub const fn transport_kind(&self) -> TransportKind {
        match self {
            Self::Http { .. } => TransportKind::Http,
            Self::Stdio { .. } => TransportKind::Stdio,
        }
    }

    /// Split a stdio command line into executable and arguments.
    ///
    /// Returns `None` for network endpoints and for empty command lines.
    pub fn command(&self) -> Option<(String, Vec<String>)> {
        let Self::Stdio { command_line } = self else {
            return None;
        };

        let mut tokens = command_line.split_whitespace().map(str::to_string);
        let executable = tokens.next()?;
        Some((executable, tokens.collect()))
    }
}

impl fmt::Display for Endpoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Http { url } => write!(f, "{url}"),
            Self::Stdio { command_line } => {
                write!(f, "{STDIO_SCHEME}://{}", urlencoding::encode(command_line))
            }
        }
    }
}
