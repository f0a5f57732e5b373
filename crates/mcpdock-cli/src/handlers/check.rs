//! Check command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_server;
use crate::presentation::format_timestamp;

/// Probe a server: connect, handshake, list tools, disconnect.
pub async fn execute(ctx: &CliContext, identifier: &str) -> Result<(), CliError> {
    let server = resolve_server(ctx, identifier).await?;
    let result = ctx.manager.health_check(&server).await;

    if result.is_healthy {
        println!("'{}' is healthy", server.name());
    } else {
        println!(
            "'{}' is unhealthy: {}",
            server.name(),
            result.error.as_deref().unwrap_or("unknown error")
        );
    }
    println!("Checked at {}", format_timestamp(result.checked_at));
    Ok(())
}
