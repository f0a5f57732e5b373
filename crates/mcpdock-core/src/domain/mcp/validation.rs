//! Server configuration validation.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use super::endpoint::{Endpoint, EndpointError};
use super::types::ServerConfig;

/// A single problem found in a server configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum ValidationError {
    #[error("Server name cannot be empty")]
    EmptyName,

    #[error("A server named '{0}' already exists")]
    DuplicateName(String),

    #[error("Endpoint cannot be empty")]
    EmptyEndpoint,

    #[error("Endpoint must start with a scheme such as http://, https:// or stdio://: {0}")]
    MissingScheme(String),

    #[error("Unsupported endpoint scheme '{0}' (expected http, https or stdio)")]
    UnsupportedScheme(String),

    #[error("Network endpoint must specify a host")]
    MissingHost,

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Subprocess endpoint must specify a command")]
    EmptyCommand,
}

impl From<EndpointError> for ValidationError {
    fn from(error: EndpointError) -> Self {
        match error {
            EndpointError::Empty => Self::EmptyEndpoint,
            EndpointError::MissingScheme(raw) => Self::MissingScheme(raw),
            EndpointError::UnsupportedScheme(scheme) => Self::UnsupportedScheme(scheme),
            EndpointError::MissingHost(_) => Self::MissingHost,
            e @ (EndpointError::InvalidUrl { .. } | EndpointError::InvalidEncoding(_)) => {
                Self::InvalidEndpoint(e.to_string())
            }
        }
    }
}

/// Validate a configuration on its own (name uniqueness needs the registry).
///
/// The result depends only on the configuration, so repeated calls return
/// the same list.
pub fn validate_config(config: &ServerConfig) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    if config.name().trim().is_empty() {
        errors.push(ValidationError::EmptyName);
    }

    match Endpoint::parse(config.endpoint()) {
        Ok(endpoint @ Endpoint::Stdio { .. }) => {
            if endpoint.command().is_none() {
                errors.push(ValidationError::EmptyCommand);
            }
        }
        Ok(Endpoint::Http { .. }) => {}
        Err(e) => errors.push(e.into()),
    }

    errors
}

/// Validate a configuration, adding [`ValidationError::DuplicateName`] when
/// `name_is_unique` is false.
pub fn validate_config_with(config: &ServerConfig, name_is_unique: bool) -> Vec<ValidationError> {
    let mut errors = validate_config(config);
    if !name_is_unique && !config.name().trim().is_empty() {
        errors.push(ValidationError::DuplicateName(config.name().trim().to_string()));
    }
    errors
}
