//! Tools, resources and prompts listings.
//!
//! Each listing connects to every enabled server first.

use mcpdock_core::domain::ServerId;

use crate::bootstrap::CliContext;
use crate::error::CliError;
use crate::handlers::resolve_server;
use crate::presentation::{format_optional, print_separator, truncate_string};

async fn server_filter(
    ctx: &CliContext,
    server: Option<&str>,
) -> Result<Option<ServerId>, CliError> {
    match server {
        Some(identifier) => Ok(Some(resolve_server(ctx, identifier).await?.id().to_string())),
        None => Ok(None),
    }
}

fn keep(filter: Option<&ServerId>, server_id: &str) -> bool {
    filter.is_none_or(|id| id == server_id)
}

async fn server_name(ctx: &CliContext, server_id: &str) -> String {
    ctx.manager
        .server(server_id)
        .await
        .map_or_else(|| server_id.to_string(), |s| s.name().to_string())
}

pub async fn tools(ctx: &CliContext, server: Option<&str>) -> Result<(), CliError> {
    let filter = server_filter(ctx, server).await?;
    ctx.connect_all().await;

    let tools: Vec<_> = ctx
        .manager
        .tools()
        .await
        .into_iter()
        .filter(|tool| keep(filter.as_ref(), &tool.server_id))
        .collect();
    if tools.is_empty() {
        println!("No tools available.");
        return Ok(());
    }

    println!("{:<20} {:<28} Description", "Server", "Tool");
    print_separator(100);
    for tool in tools {
        println!(
            "{:<20} {:<28} {}",
            truncate_string(&server_name(ctx, &tool.server_id).await, 19),
            truncate_string(&tool.name, 27),
            truncate_string(&format_optional(tool.description.as_deref(), ""), 50)
        );
    }
    Ok(())
}

pub async fn resources(ctx: &CliContext, server: Option<&str>) -> Result<(), CliError> {
    let filter = server_filter(ctx, server).await?;
    ctx.connect_all().await;

    let resources: Vec<_> = ctx
        .manager
        .resources()
        .await
        .into_iter()
        .filter(|resource| keep(filter.as_ref(), &resource.server_id))
        .collect();
    if resources.is_empty() {
        println!("No resources available.");
        return Ok(());
    }

    println!("{:<20} {:<40} {:<16} Name", "Server", "URI", "MIME type");
    print_separator(100);
    for resource in resources {
        println!(
            "{:<20} {:<40} {:<16} {}",
            truncate_string(&server_name(ctx, &resource.server_id).await, 19),
            truncate_string(&resource.uri, 39),
            format_optional(resource.mime_type.as_deref(), "--"),
            resource.name
        );
    }
    Ok(())
}

pub async fn prompts(ctx: &CliContext, server: Option<&str>) -> Result<(), CliError> {
    let filter = server_filter(ctx, server).await?;
    ctx.connect_all().await;

    let prompts: Vec<_> = ctx
        .manager
        .prompts()
        .await
        .into_iter()
        .filter(|prompt| keep(filter.as_ref(), &prompt.server_id))
        .collect();
    if prompts.is_empty() {
        println!("No prompts available.");
        return Ok(());
    }

    println!("{:<20} {:<24} Arguments", "Server", "Prompt");
    print_separator(100);
    for prompt in prompts {
        let arguments = prompt
            .arguments
            .iter()
            .map(|arg| {
                if arg.required {
                    arg.name.clone()
                } else {
                    format!("[{}]", arg.name)
                }
            })
            .collect::<Vec<_>>()
            .join(" ");
        println!(
            "{:<20} {:<24} {}",
            truncate_string(&server_name(ctx, &prompt.server_id).await, 19),
            truncate_string(&prompt.name, 23),
            arguments
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keep_without_filter() {
        assert!(keep(None, "s1"));
        let filter = "s1".to_string();
        assert!(keep(Some(&filter), "s1"));
        assert!(!keep(Some(&filter), "s2"));
    }
}
