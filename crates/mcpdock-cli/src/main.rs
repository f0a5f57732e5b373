//! CLI entry point - the composition root.
//!
//! This is the ONLY place where logging is installed and infrastructure is
//! wired together via bootstrap. Command dispatch routes to handlers which
//! delegate to the connection manager.

use std::process::ExitCode;
use std::time::Duration;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use mcpdock_cli::handlers::{self, add::AddArgs};
use mcpdock_cli::{Cli, CliConfig, CliContext, CliError, Commands, bootstrap};

fn init_tracing(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn dispatch(ctx: &CliContext, command: Commands) -> Result<(), CliError> {
    match command {
        Commands::List { json } => handlers::list::execute(ctx, json).await,
        Commands::Add {
            name,
            endpoint,
            description,
            token,
            disabled,
        } => {
            let args = AddArgs {
                name,
                endpoint,
                description,
                token,
                disabled,
            };
            handlers::add::execute(ctx, args).await
        }
        Commands::Remove { server, force } => handlers::remove::execute(ctx, &server, force).await,
        Commands::Enable { server } => handlers::update::set_enabled(ctx, &server, true).await,
        Commands::Disable { server } => handlers::update::set_enabled(ctx, &server, false).await,
        Commands::Token { server, token } => {
            handlers::update::set_token(ctx, &server, token).await
        }
        Commands::Check { server } => handlers::check::execute(ctx, &server).await,
        Commands::Tools { server } => handlers::catalog::tools(ctx, server.as_deref()).await,
        Commands::Resources { server } => {
            handlers::catalog::resources(ctx, server.as_deref()).await
        }
        Commands::Prompts { server } => handlers::catalog::prompts(ctx, server.as_deref()).await,
        Commands::Call { tool, args, server } => {
            handlers::invoke::call(ctx, &tool, &args, server.as_deref()).await
        }
        Commands::Read { uri, server } => handlers::invoke::read(ctx, &uri, server.as_deref()).await,
        Commands::Prompt { name, args } => handlers::invoke::prompt(ctx, &name, &args).await,
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    // Load environment variables before clap reads them
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(ExitCode::SUCCESS);
    };

    let config = CliConfig {
        data_dir: cli.data_dir,
        request_timeout: Duration::from_secs(cli.timeout_secs),
    };
    let ctx = bootstrap(config).await?;

    let outcome = dispatch(&ctx, command).await;
    ctx.shutdown().await;

    match outcome {
        Ok(()) => Ok(ExitCode::SUCCESS),
        Err(e) => {
            eprintln!("Error: {e}");
            let code = u8::try_from(e.exit_code()).unwrap_or(1);
            Ok(ExitCode::from(code))
        }
    }
}
