//! Core domain types.
//!
//! These types represent the pure domain model, independent of any
//! infrastructure concerns (storage, processes, HTTP).

pub mod mcp;

// Re-export MCP types at the domain level for convenience
pub use mcp::{
    ArgValue, Arguments, ConnectionState, Endpoint, EndpointError, HealthCheckResult, Prompt,
    PromptArgument, Resource, ResourceContent, ServerConfig, ServerId, ServerStatus, Tool,
    ToolCall, ToolResult, TransportKind, ValidationError, to_prompt_arguments, to_protocol_arguments,
    validate_config, validate_config_with,
};

#[cfg(test)]
mod tests {
    use super::{ArgValue, Arguments, to_prompt_arguments, to_protocol_arguments};

    #[test]
    fn test_argument_conversions_at_domain_level() {
        let mut args = Arguments::new();
        args.insert("days".to_string(), ArgValue::Integer(3));

        assert_eq!(to_protocol_arguments(&args)["days"], 3);
        assert_eq!(to_prompt_arguments(&args)["days"], "3");
    }
}
