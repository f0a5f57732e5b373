//! One-shot connectivity probes that do not retain a connection.

use mcpdock_core::domain::{HealthCheckResult, ServerConfig};

use crate::error::{McpError, TransportError};
use crate::protocol::ProtocolConnector;
use crate::transport::TransportFactory;

enum ProbeFailure {
    /// The endpoint is unusable as configured.
    Config(TransportError),
    Unreachable(String),
}

impl ProbeFailure {
    fn message(&self) -> String {
        match self {
            Self::Config(e) => e.to_string(),
            Self::Unreachable(message) => message.clone(),
        }
    }
}

async fn run(
    factory: &dyn TransportFactory,
    connector: &dyn ProtocolConnector,
    config: &ServerConfig,
) -> Result<(), ProbeFailure> {
    let transport = factory.create_transport(config).await.map_err(|e| {
        if e.is_configuration() {
            ProbeFailure::Config(e)
        } else {
            ProbeFailure::Unreachable(e.to_string())
        }
    })?;
    let client = connector
        .connect(transport)
        .await
        .map_err(|e| ProbeFailure::Unreachable(e.to_string()))?;

    let listed = client.list_tools().await;
    client.close().await;
    listed
        .map(|_| ())
        .map_err(|e| ProbeFailure::Unreachable(e.to_string()))
}

/// Connect, handshake and list tools, then disconnect.
///
/// Returns `Err` only when the endpoint itself is unusable (unsupported
/// scheme, empty command, malformed URL); every runtime failure is
/// `Ok(false)`.
pub async fn test_connection(
    factory: &dyn TransportFactory,
    connector: &dyn ProtocolConnector,
    config: &ServerConfig,
) -> Result<bool, McpError> {
    match run(factory, connector, config).await {
        Ok(()) => Ok(true),
        Err(ProbeFailure::Config(e)) => Err(e.into()),
        Err(ProbeFailure::Unreachable(_)) => Ok(false),
    }
}

/// Same probe as [`test_connection`], reporting the failure instead of failing.
pub async fn health_check(
    factory: &dyn TransportFactory,
    connector: &dyn ProtocolConnector,
    config: &ServerConfig,
) -> HealthCheckResult {
    match run(factory, connector, config).await {
        Ok(()) => HealthCheckResult::healthy(),
        Err(failure) => HealthCheckResult::unhealthy(failure.message()),
    }
}
