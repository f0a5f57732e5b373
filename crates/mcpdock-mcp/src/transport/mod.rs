//! Transports and the factory that selects one per server.
//!
//! A [`Transport`] is a message-framed duplex channel carrying JSON-RPC
//! messages. It knows nothing about the protocol; the handshake happens in
//! the protocol client.

mod http;
pub mod path;
mod sse;
mod stdio;

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use serde_json::Value;

use mcpdock_core::domain::{Endpoint, ServerConfig, TransportKind};
use mcpdock_core::ports::Logger;

use crate::error::TransportError;

pub use http::{HttpTransport, SESSION_HEADER};
pub use sse::{SseDecoder, SseEvent};
pub use stdio::StdioTransport;

/// Message channel to one server.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send one message.
    async fn send(&self, message: &Value) -> Result<(), TransportError>;

    /// Wait for the next inbound message; `Ok(None)` once the channel is closed.
    async fn receive(&self) -> Result<Option<Value>, TransportError>;

    /// Release the channel (terminating a child process). Idempotent.
    async fn close(&self) -> Result<(), TransportError>;

    fn kind(&self) -> TransportKind;
}

/// Creates the transport matching a server's endpoint.
#[async_trait]
pub trait TransportFactory: Send + Sync {
    /// Build a transport for `config`. No handshake is performed.
    async fn create_transport(
        &self,
        config: &ServerConfig,
    ) -> Result<Box<dyn Transport>, TransportError>;
}

/// Connect timeout applied to HTTP transports.
const HTTP_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Factory for the HTTP and subprocess transports.
pub struct DefaultTransportFactory {
    http: reqwest::Client,
    logger: Arc<dyn Logger>,
}

impl DefaultTransportFactory {
    pub fn new(logger: Arc<dyn Logger>) -> Result<Self, TransportError> {
        let http = reqwest::Client::builder()
            .connect_timeout(HTTP_CONNECT_TIMEOUT)
            .user_agent(concat!("mcpdock/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(Self::with_client(http, logger))
    }

    /// Use a preconfigured HTTP client (proxies, custom roots).
    pub fn with_client(http: reqwest::Client, logger: Arc<dyn Logger>) -> Self {
        Self { http, logger }
    }
}

#[async_trait]
impl TransportFactory for DefaultTransportFactory {
    async fn create_transport(
        &self,
        config: &ServerConfig,
    ) -> Result<Box<dyn Transport>, TransportError> {
        match config.parsed_endpoint()? {
            Endpoint::Http { url } => {
                self.logger.debug(&format!(
                    "Creating HTTP transport for '{}' at {url}",
                    config.name()
                ));
                Ok(Box::new(HttpTransport::new(
                    self.http.clone(),
                    url,
                    config.auth_token().map(str::to_string),
                    Arc::clone(&self.logger),
                )))
            }
            endpoint @ Endpoint::Stdio { .. } => {
                let Some((executable, args)) = endpoint.command() else {
                    return Err(TransportError::InvalidCommand(format!(
                        "server '{}' has an empty command line",
                        config.name()
                    )));
                };
                self.logger.debug(&format!(
                    "Launching '{executable}' for server '{}'",
                    config.name()
                ));
                let transport =
                    StdioTransport::spawn(&executable, &args, Arc::clone(&self.logger))?;
                Ok(Box::new(transport))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mcpdock_core::ports::NoopLogger;

    fn factory() -> DefaultTransportFactory {
        DefaultTransportFactory::new(Arc::new(NoopLogger)).unwrap()
    }

    #[tokio::test]
    async fn test_unsupported_scheme_is_rejected() {
        let config = ServerConfig::new("Files", "ftp://files.example.com");
        let err = factory().create_transport(&config).await.err().unwrap();
        assert!(matches!(err, TransportError::UnsupportedScheme(ref s) if s == "ftp"));
    }

    #[tokio::test]
    async fn test_empty_stdio_command_is_rejected_before_spawn() {
        let config = ServerConfig::new("Local", "stdio://%20%20");
        let err = factory().create_transport(&config).await.err().unwrap();
        assert!(matches!(err, TransportError::InvalidCommand(_)));
    }

    #[tokio::test]
    async fn test_http_endpoint_builds_http_transport() {
        let config = ServerConfig::new("Remote", "https://mcp.example.com/mcp");
        let transport = factory().create_transport(&config).await.unwrap();
        assert_eq!(transport.kind(), TransportKind::Http);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_stdio_endpoint_is_percent_decoded() {
        let config = ServerConfig::new("Echo", "stdio://cat%20-u");
        let transport = factory().create_transport(&config).await.unwrap();
        assert_eq!(transport.kind(), TransportKind::Stdio);
        transport.close().await.unwrap();
    }
}
