//! `key=value` argument parsing for tool calls and prompts.

use mcpdock_core::domain::{ArgValue, Arguments};

use crate::error::CliError;

/// Parse `key=value` pairs. Values are read loosely: boolean, then integer,
/// then float, otherwise string. A later duplicate key wins.
pub fn parse_arguments(pairs: &[String]) -> Result<Arguments, CliError> {
    let mut arguments = Arguments::new();
    for pair in pairs {
        let Some((key, value)) = pair.split_once('=') else {
            return Err(CliError::Arguments(format!(
                "expected key=value, got '{pair}'"
            )));
        };
        let key = key.trim();
        if key.is_empty() {
            return Err(CliError::Arguments(format!("missing key in '{pair}'")));
        }
        arguments.insert(key.to_string(), ArgValue::parse_loose(value));
    }
    Ok(arguments)
}
