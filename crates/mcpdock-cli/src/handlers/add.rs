//! Add command handler.

use mcpdock_core::domain::ServerConfig;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::connect_and_report;

/// Arguments for the add command.
pub struct AddArgs {
    pub name: String,
    pub endpoint: String,
    pub description: Option<String>,
    pub token: Option<String>,
    pub disabled: bool,
}

impl AddArgs {
    fn into_config(self) -> ServerConfig {
        let mut config = ServerConfig::new(self.name.trim(), self.endpoint.trim())
            .with_enabled(!self.disabled)
            .with_auth_token(self.token);
        if let Some(description) = self.description.filter(|d| !d.trim().is_empty()) {
            config = config.with_description(description);
        }
        config
    }
}

/// Validate and register a server.
///
/// Enabled servers are connected once so the user learns right away whether
/// the endpoint answers; the configuration is kept either way.
pub async fn execute(ctx: &CliContext, args: AddArgs) -> Result<(), CliError> {
    let config = args.into_config();
    ctx.manager.add_server(config.clone()).await?;

    println!("Added server '{}' (ID {})", config.name(), config.id());

    if config.enabled() {
        connect_and_report(ctx, &config).await;
    }
    Ok(())
}
