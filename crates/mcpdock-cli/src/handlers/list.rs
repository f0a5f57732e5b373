//! List command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::presentation::{format_status, format_timestamp, print_separator, truncate_string};

/// Print configured servers with their cached capability counts.
///
/// Nothing is connected; the status column shows `disconnected` unless a
/// previous command in the same process connected.
pub async fn execute(ctx: &CliContext, json: bool) -> Result<(), CliError> {
    let servers = ctx.manager.servers().await;

    if json {
        let rendered = serde_json::to_string_pretty(&servers)
            .map_err(|e| CliError::Io(e.to_string()))?;
        println!("{rendered}");
        return Ok(());
    }

    if servers.is_empty() {
        println!("No MCP servers configured.");
        println!("Use 'mcpdock add <name> <endpoint>' to add one.");
        return Ok(());
    }

    println!("Found {} server(s):\n", servers.len());
    println!(
        "{:<38} {:<20} {:<8} {:<14} {:<20} Endpoint",
        "ID", "Name", "Enabled", "Status", "Cached"
    );
    print_separator(120);

    for server in servers {
        let status = ctx.manager.status(server.id()).await;
        let cached = ctx
            .manager
            .cached_capabilities(server.id())
            .await
            .map_or_else(
                || "--".to_string(),
                |c| {
                    format!(
                        "{}t/{}r @ {}",
                        c.tools.len(),
                        c.resources.len(),
                        format_timestamp(c.cached_at)
                    )
                },
            );

        println!(
            "{:<38} {:<20} {:<8} {:<14} {:<20} {}",
            server.id(),
            truncate_string(server.name(), 19),
            if server.enabled() { "yes" } else { "no" },
            truncate_string(&format_status(status.as_ref()), 13),
            cached,
            server.endpoint()
        );
    }

    Ok(())
}
