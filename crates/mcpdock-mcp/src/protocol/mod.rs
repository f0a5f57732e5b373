//! Protocol client port.
//!
//! The manager talks to servers only through [`ProtocolClient`]; the wire
//! format is an implementation detail of the client. [`JsonRpcConnector`]
//! is the bundled implementation.

mod jsonrpc;
mod types;

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Map, Value};

use crate::error::ProtocolError;
use crate::transport::Transport;

pub use jsonrpc::{
    ClientIdentity, DEFAULT_REQUEST_TIMEOUT, JsonRpcClient, JsonRpcConnector, PROTOCOL_VERSION,
};
pub use types::{
    CallToolResult, GetPromptResult, PromptArgumentInfo, PromptInfo, PromptMessage,
    ReadResourceResult, ResourceContents, ResourceInfo, ServerInfo, ToolInfo,
};

/// An initialized session with one server.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    /// Server identity reported during the handshake.
    fn server_info(&self) -> &ServerInfo;

    async fn list_tools(&self) -> Result<Vec<ToolInfo>, ProtocolError>;

    async fn list_resources(&self) -> Result<Vec<ResourceInfo>, ProtocolError>;

    async fn list_prompts(&self) -> Result<Vec<PromptInfo>, ProtocolError>;

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ProtocolError>;

    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ProtocolError>;

    async fn get_prompt(
        &self,
        name: &str,
        arguments: BTreeMap<String, String>,
    ) -> Result<GetPromptResult, ProtocolError>;

    /// End the session and close the transport.
    async fn close(&self);
}

/// Performs the handshake over a fresh transport.
#[async_trait]
pub trait ProtocolConnector: Send + Sync {
    async fn connect(
        &self,
        transport: Box<dyn Transport>,
    ) -> Result<Arc<dyn ProtocolClient>, ProtocolError>;
}
