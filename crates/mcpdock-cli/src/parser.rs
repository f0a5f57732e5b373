//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::Parser;

use crate::commands::Commands;

/// Command-line interface for managing MCP servers.
#[derive(Parser)]
#[command(name = "mcpdock")]
#[command(about = "Manage and query Model Context Protocol servers")]
#[command(version)]
pub struct Cli {
    /// Directory holding server configurations and the capability cache
    #[arg(long = "data-dir", env = "MCPDOCK_DATA_DIR", global = true)]
    pub data_dir: Option<PathBuf>,

    /// Seconds to wait for each server request
    #[arg(long = "timeout", default_value_t = 30, global = true)]
    pub timeout_secs: u64,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Commands>,
}
