//! Remove command handler.

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_server;
use crate::utils::input;

/// Remove a server after confirmation (skipped with `force`).
pub async fn execute(ctx: &CliContext, identifier: &str, force: bool) -> Result<(), CliError> {
    let server = resolve_server(ctx, identifier).await?;

    if !force {
        println!("Server:   {}", server.name());
        println!("Endpoint: {}", server.endpoint());
        println!();

        let confirm = input::prompt_confirmation("Remove this server and its stored token?")?;
        if !confirm {
            println!("Remove operation cancelled.");
            return Ok(());
        }
    }

    ctx.manager.remove_server(server.id()).await?;
    println!("Server '{}' removed.", server.name());
    Ok(())
}
