//! Enable, disable and token commands.
//!
//! Each builds a replacement configuration; identity fields never change.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::{connect_and_report, resolve_server};

/// Flip the enabled flag.
pub async fn set_enabled(ctx: &CliContext, identifier: &str, enabled: bool) -> Result<(), CliError> {
    let server = resolve_server(ctx, identifier).await?;
    if server.enabled() == enabled {
        println!(
            "Server '{}' is already {}.",
            server.name(),
            if enabled { "enabled" } else { "disabled" }
        );
        return Ok(());
    }

    let updated = server.with_enabled(enabled);
    ctx.manager.replace_server(updated.clone()).await?;
    println!(
        "Server '{}' {}.",
        updated.name(),
        if enabled { "enabled" } else { "disabled" }
    );
    if enabled {
        connect_and_report(ctx, &updated).await;
    }
    Ok(())
}

/// Store or clear the auth token.
pub async fn set_token(
    ctx: &CliContext,
    identifier: &str,
    token: Option<String>,
) -> Result<(), CliError> {
    let server = resolve_server(ctx, identifier).await?;
    let name = server.name().to_string();
    let clearing = token.as_deref().is_none_or(str::is_empty);

    ctx.manager
        .replace_server(server.with_auth_token(token))
        .await?;
    if clearing {
        println!("Token cleared for '{name}'.");
    } else {
        println!("Token stored for '{name}'.");
    }
    Ok(())
}
