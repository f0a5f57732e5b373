//! Subcommands of the `mcpdock` binary.

use clap::Subcommand;

/// Available commands.
///
/// Servers can be referred to by id or by name (case-insensitive).
#[derive(Subcommand)]
pub enum Commands {
    /// List configured servers with their cached capability counts
    List {
        /// Print configurations as JSON
        #[arg(long)]
        json: bool,
    },

    /// Register a new server
    Add {
        /// Display name (unique, case-insensitive)
        name: String,
        /// `http(s)://` URL or `stdio://<command> [args...]`
        endpoint: String,
        /// Free-form description
        #[arg(short, long)]
        description: Option<String>,
        /// Bearer token sent to HTTP servers
        #[arg(long, env = "MCPDOCK_TOKEN", hide_env_values = true)]
        token: Option<String>,
        /// Register without connecting
        #[arg(long)]
        disabled: bool,
    },

    /// Remove a server and its stored credential
    Remove {
        /// Server id or name
        server: String,
        /// Skip confirmation prompt
        #[arg(short, long)]
        force: bool,
    },

    /// Enable a server
    Enable {
        /// Server id or name
        server: String,
    },

    /// Disable a server
    Disable {
        /// Server id or name
        server: String,
    },

    /// Set or clear the auth token of a server
    Token {
        /// Server id or name
        server: String,
        /// New token; omit to clear
        token: Option<String>,
    },

    /// Probe a server without keeping the connection
    Check {
        /// Server id or name
        server: String,
    },

    /// Connect to enabled servers and list their tools
    Tools {
        /// Only show tools of this server
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Connect to enabled servers and list their resources
    Resources {
        /// Only show resources of this server
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Connect to enabled servers and list their prompts
    Prompts {
        /// Only show prompts of this server
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Invoke a tool
    Call {
        /// Tool name
        tool: String,
        /// Arguments as key=value pairs
        args: Vec<String>,
        /// Server offering the tool (required when several do)
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Read a resource
    Read {
        /// Resource URI
        uri: String,
        /// Server offering the resource (required when several do)
        #[arg(short, long)]
        server: Option<String>,
    },

    /// Render a prompt
    Prompt {
        /// Prompt name
        name: String,
        /// Arguments as key=value pairs
        args: Vec<String>,
    },
}
