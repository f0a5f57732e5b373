//! CLI bootstrap - the composition root.
//!
//! This module is the ONLY place where infrastructure is wired together
//! for the CLI adapter:
//! - Registry over the JSON store and the OS keyring (via mcpdock-registry)
//! - Transports and the protocol client (via mcpdock-mcp)
//! - `tracing`-backed loggers for each component
//!
//! Command handlers receive the composed context and delegate to the
//! connection manager.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use mcpdock_core::paths::store_dir;
use mcpdock_core::ports::{Logger, NoopEmitter, TracingLogger};
use mcpdock_mcp::protocol::{ClientIdentity, DEFAULT_REQUEST_TIMEOUT};
use mcpdock_mcp::{ConnectionManager, ManagerConfig};
use mcpdock_registry::RegistryFactory;

use crate::error::CliError;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone)]
pub struct CliConfig {
    /// Data directory override; the platform default when `None`.
    pub data_dir: Option<PathBuf>,
    /// Bound on each server request.
    pub request_timeout: Duration,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            data_dir: None,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

impl CliConfig {
    /// Directory of the JSON document store.
    pub fn store_dir(&self) -> Result<PathBuf, CliError> {
        match &self.data_dir {
            Some(dir) => Ok(dir.join("store")),
            None => store_dir().map_err(|e| CliError::Config(e.to_string())),
        }
    }
}

/// Composed application context for CLI commands.
pub struct CliContext {
    /// Connection manager with configurations loaded.
    pub manager: ConnectionManager,
}

impl CliContext {
    /// Connect to every enabled server, reporting failures on stderr.
    pub async fn connect_all(&self) {
        self.manager.connect_to_all_enabled().await;
        for server in self.manager.servers().await {
            if let Some(status) = self.manager.status(server.id()).await {
                if let Some(error) = status.last_error {
                    eprintln!("warning: '{}' unavailable: {error}", server.name());
                }
            }
        }
    }

    /// Close every connection and child process.
    pub async fn shutdown(&self) {
        self.manager.shutdown().await;
    }
}

/// Bootstrap the CLI application.
///
/// Resolves the data directory, builds the registry and the connection
/// manager, and loads the stored configurations. Nothing is connected yet.
pub async fn bootstrap(config: CliConfig) -> Result<CliContext> {
    let dir = config.store_dir()?;
    tracing::debug!(store = %dir.display(), "Opening server registry");

    let registry_logger: Arc<dyn Logger> = Arc::new(TracingLogger::new("registry"));
    let registry = Arc::new(RegistryFactory::open(dir, registry_logger));

    let manager = ConnectionManager::with_defaults(
        registry,
        // No frontend to broadcast to
        Arc::new(NoopEmitter),
        Arc::new(TracingLogger::new("mcp")),
        ManagerConfig {
            identity: ClientIdentity::default(),
            request_timeout: config.request_timeout,
            // Commands connect in the foreground and report the outcome
            auto_connect: false,
        },
    )?;
    manager.load().await;

    Ok(CliContext { manager })
}
