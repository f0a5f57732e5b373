//! Call, read and prompt commands.

use mcpdock_core::domain::{Resource, Tool};

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_server;
use crate::utils::args::parse_arguments;

/// Pick the single entry matching, or explain why there is none.
fn single<T>(mut matches: Vec<T>, what: &str, server_of: impl Fn(&T) -> &str) -> Result<T, CliError> {
    match matches.len() {
        0 => Err(CliError::NotFound(format!(
            "No connected server offers {what}"
        ))),
        1 => Ok(matches.remove(0)),
        _ => {
            let servers = matches.iter().map(&server_of).collect::<Vec<_>>().join(", ");
            Err(CliError::Ambiguous(format!(
                "{what} is offered by several servers ({servers}); pick one with --server"
            )))
        }
    }
}

async fn locate_tool(ctx: &CliContext, name: &str, server: Option<&str>) -> Result<Tool, CliError> {
    if let Some(identifier) = server {
        let config = resolve_server(ctx, identifier).await?;
        return ctx.manager.find_tool(config.id(), name).await.ok_or_else(|| {
            CliError::NotFound(format!("'{}' does not offer tool '{name}'", config.name()))
        });
    }
    let matches = ctx
        .manager
        .tools()
        .await
        .into_iter()
        .filter(|tool| tool.name == name)
        .collect();
    single(matches, &format!("tool '{name}'"), |tool: &Tool| tool.server_id.as_str())
}

async fn locate_resource(
    ctx: &CliContext,
    uri: &str,
    server: Option<&str>,
) -> Result<Resource, CliError> {
    if let Some(identifier) = server {
        let config = resolve_server(ctx, identifier).await?;
        return ctx.manager.find_resource(config.id(), uri).await.ok_or_else(|| {
            CliError::NotFound(format!("'{}' does not offer resource '{uri}'", config.name()))
        });
    }
    let matches = ctx
        .manager
        .resources()
        .await
        .into_iter()
        .filter(|resource| resource.uri == uri)
        .collect();
    single(matches, &format!("resource '{uri}'"), |resource: &Resource| {
        resource.server_id.as_str()
    })
}

/// Invoke a tool and print its text output.
pub async fn call(
    ctx: &CliContext,
    tool: &str,
    args: &[String],
    server: Option<&str>,
) -> Result<(), CliError> {
    let arguments = parse_arguments(args)?;
    ctx.connect_all().await;

    let tool = locate_tool(ctx, tool, server).await?;
    let result = ctx.manager.call_tool(&tool, &arguments).await?;

    if result.is_success {
        println!("{}", result.content);
        Ok(())
    } else {
        Err(CliError::ToolFailed(
            result.error.unwrap_or_else(|| "tool call failed".to_string()),
        ))
    }
}

/// Read a resource and print its contents.
pub async fn read(ctx: &CliContext, uri: &str, server: Option<&str>) -> Result<(), CliError> {
    ctx.connect_all().await;

    let resource = locate_resource(ctx, uri, server).await?;
    let content = ctx.manager.read_resource(&resource).await?;
    if let Some(mime_type) = &content.mime_type {
        tracing::debug!(uri = %content.uri, %mime_type, "Read resource");
    }
    println!("{}", content.text);
    Ok(())
}

/// Render a prompt with arguments.
pub async fn prompt(ctx: &CliContext, name: &str, args: &[String]) -> Result<(), CliError> {
    let arguments = parse_arguments(args)?;
    ctx.connect_all().await;

    let text = ctx.manager.get_prompt(name, &arguments).await?;
    println!("{text}");
    Ok(())
}
