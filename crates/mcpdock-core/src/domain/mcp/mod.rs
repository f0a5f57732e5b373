//! MCP (Model Context Protocol) server domain types.
//!
//! These types represent MCP servers in the system, independent of any
//! infrastructure concerns (storage, process management, networking).
//!
//! # Design
//!
//! - `ServerConfig` - A configured server (identity, endpoint, enabled flag)
//! - `Endpoint` - Parsed endpoint (`http(s)://` or `stdio://`)
//! - `ServerStatus` - Runtime connection status (never persisted)
//! - `Tool` / `Resource` / `Prompt` - Discovered capabilities, tagged by server
//! - `ArgValue` - Typed tool/prompt argument
//! - `ToolResult` / `ResourceContent` - Normalized invocation results

mod args;
mod endpoint;
mod types;
mod validation;

pub use args::{ArgValue, Arguments, to_prompt_arguments, to_protocol_arguments};
pub use endpoint::{Endpoint, EndpointError, NETWORK_SCHEMES, STDIO_SCHEME, TransportKind};
pub use types::{
    ConnectionState, HealthCheckResult, Prompt, PromptArgument, Resource, ResourceContent,
    ServerConfig, ServerId, ServerStatus, Tool, ToolCall, ToolResult,
};
pub use validation::{ValidationError, validate_config, validate_config_with};
