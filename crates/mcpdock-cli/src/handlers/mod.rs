//! Command handlers that delegate to the connection manager.
//!
//! Handlers follow the canonical pattern:
//! - Signature: `pub async fn execute(ctx: &CliContext, ...) -> Result<(), CliError>`
//! - Thin wrappers that:
//!   1. Parse/validate CLI-specific input
//!   2. Call `ConnectionManager` methods
//!   3. Format output for the terminal

pub mod add;
pub mod catalog;
pub mod check;
pub mod invoke;
pub mod list;
pub mod remove;
pub mod update;

use mcpdock_core::domain::ServerConfig;

use crate::bootstrap::CliContext;
use crate::error::CliError;

/// Find a server by exact id, then by case-insensitive name.
pub(crate) async fn resolve_server(
    ctx: &CliContext,
    identifier: &str,
) -> Result<ServerConfig, CliError> {
    let servers = ctx.manager.servers().await;
    find_server(&servers, identifier).cloned().ok_or_else(|| {
        CliError::NotFound(format!(
            "No server matching '{identifier}'. Use 'mcpdock list' to see configured servers."
        ))
    })
}

/// Connect to a server in the foreground and print the outcome.
pub(crate) async fn connect_and_report(ctx: &CliContext, config: &ServerConfig) {
    ctx.manager.connect_to_server(config).await;
    match ctx.manager.status(config.id()).await {
        Some(status) if status.is_connected() => {
            let tools = ctx
                .manager
                .tools()
                .await
                .into_iter()
                .filter(|tool| tool.server_id == config.id())
                .count();
            println!("Connected to '{}' ({tools} tool(s)).", config.name());
        }
        Some(status) => println!(
            "Connection to '{}' failed: {}",
            config.name(),
            status.last_error.as_deref().unwrap_or("unknown error")
        ),
        None => {}
    }
}

fn find_server<'a>(servers: &'a [ServerConfig], identifier: &str) -> Option<&'a ServerConfig> {
    let needle = identifier.trim().to_lowercase();
    servers
        .iter()
        .find(|server| server.id() == identifier)
        .or_else(|| {
            servers
                .iter()
                .find(|server| server.name().trim().to_lowercase() == needle)
        })
}
