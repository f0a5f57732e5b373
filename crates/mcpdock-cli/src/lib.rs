//! Command-line front end for mcpdock.
//!
//! `main.rs` parses arguments, [`bootstrap`] composes the registry and the
//! connection manager, and [`handlers`] run one command each.

#![deny(unsafe_code)]

pub mod bootstrap;
pub mod commands;
pub mod error;
pub mod handlers;
pub mod parser;
pub mod presentation;
pub mod utils;

// Re-export primary types for convenient access
pub use bootstrap::{CliConfig, CliContext, bootstrap};
pub use commands::Commands;
pub use error::CliError;
pub use parser::Cli;
