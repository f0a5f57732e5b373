//! MCP client over JSON-RPC 2.0.
//!
//! Reference: <https://spec.modelcontextprotocol.io/>
//!
//! Requests on one connection are serialized: the gate is held from send
//! until the matching response arrives, since neither transport demuxes
//! concurrent callers. Server-initiated requests seen while waiting are
//! answered inline (`ping`) or rejected.

use std::collections::{BTreeMap, HashSet};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};
use tokio::sync::Mutex;
use tokio::time::timeout;

use mcpdock_core::ports::Logger;

use super::types::{
    CallToolResult, GetPromptResult, InitializeResult, PromptInfo, ReadResourceResult,
    ResourceInfo, ServerCapabilities, ServerInfo, ToolInfo,
};
use super::{ProtocolClient, ProtocolConnector};
use crate::error::{METHOD_NOT_FOUND, ProtocolError};
use crate::transport::Transport;

/// Protocol revision sent in `initialize`.
pub const PROTOCOL_VERSION: &str = "2024-11-05";

/// Per-request timeout; generous because `npx` may download the server first.
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Upper bound on pages fetched for one listing.
const MAX_PAGES: usize = 100;

/// JSON-RPC 2.0 request.
#[derive(Debug, Serialize)]
struct JsonRpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    params: Option<Value>,
}

/// JSON-RPC 2.0 response.
#[derive(Debug, Deserialize)]
struct JsonRpcResponse {
    #[serde(default)]
    result: Option<Value>,
    #[serde(default)]
    error: Option<JsonRpcError>,
}

/// JSON-RPC 2.0 error.
#[derive(Debug, Deserialize)]
struct JsonRpcError {
    code: i64,
    message: String,
}

/// Name and version announced to servers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIdentity {
    pub name: String,
    pub version: String,
}

impl Default for ClientIdentity {
    fn default() -> Self {
        Self {
            name: "mcpdock".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

/// Connector producing [`JsonRpcClient`]s.
pub struct JsonRpcConnector {
    identity: ClientIdentity,
    request_timeout: Duration,
    logger: Arc<dyn Logger>,
}

impl JsonRpcConnector {
    pub fn new(identity: ClientIdentity, request_timeout: Duration, logger: Arc<dyn Logger>) -> Self {
        Self {
            identity,
            request_timeout,
            logger,
        }
    }
}

#[async_trait]
impl ProtocolConnector for JsonRpcConnector {
    async fn connect(
        &self,
        transport: Box<dyn Transport>,
    ) -> Result<Arc<dyn ProtocolClient>, ProtocolError> {
        let client = JsonRpcClient::initialize(
            transport,
            &self.identity,
            self.request_timeout,
            Arc::clone(&self.logger),
        )
        .await?;
        Ok(Arc::new(client))
    }
}

/// Initialized MCP session.
pub struct JsonRpcClient {
    transport: Box<dyn Transport>,
    gate: Mutex<()>,
    next_id: AtomicU64,
    request_timeout: Duration,
    server_info: ServerInfo,
    capabilities: ServerCapabilities,
    protocol_version: String,
    closed: AtomicBool,
    logger: Arc<dyn Logger>,
}

impl JsonRpcClient {
    /// Run the handshake. The transport is closed if it fails.
    pub async fn initialize(
        transport: Box<dyn Transport>,
        identity: &ClientIdentity,
        request_timeout: Duration,
        logger: Arc<dyn Logger>,
    ) -> Result<Self, ProtocolError> {
        let mut client = Self {
            transport,
            gate: Mutex::new(()),
            next_id: AtomicU64::new(1),
            request_timeout,
            server_info: ServerInfo::default(),
            capabilities: ServerCapabilities::default(),
            protocol_version: String::new(),
            closed: AtomicBool::new(false),
            logger,
        };

        let params = json!({
            "protocolVersion": PROTOCOL_VERSION,
            "clientInfo": {
                "name": identity.name,
                "version": identity.version,
            },
            "capabilities": {}
        });

        let result: InitializeResult = match client.request("initialize", Some(params)).await {
            Ok(result) => result,
            Err(e) => {
                client.close().await;
                return Err(e);
            }
        };

        client.server_info = result.server_info;
        client.capabilities = result.capabilities;
        client.protocol_version = result.protocol_version;

        if let Err(e) = client.notify("notifications/initialized", None).await {
            client.close().await;
            return Err(e);
        }

        client.logger.debug(&format!(
            "Initialized session with '{}' {} (protocol {})",
            client.server_info.name,
            client.server_info.version.as_deref().unwrap_or("?"),
            client.protocol_version
        ));
        Ok(client)
    }

    /// Protocol revision the server agreed to.
    pub fn protocol_version(&self) -> &str {
        &self.protocol_version
    }

    /// Send a request and wait for the matching response.
    async fn request<T: DeserializeOwned>(
        &self,
        method: &str,
        params: Option<Value>,
    ) -> Result<T, ProtocolError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(ProtocolError::Closed);
        }

        let _gate = self.gate.lock().await;
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let request = JsonRpcRequest {
            jsonrpc: "2.0",
            id,
            method,
            params,
        };
        self.transport.send(&serde_json::to_value(&request)?).await?;

        let response = timeout(self.request_timeout, self.await_response(id))
            .await
            .map_err(|_| ProtocolError::Timeout {
                method: method.to_string(),
                after: self.request_timeout,
            })??;

        if let Some(error) = response.error {
            return Err(if error.code == METHOD_NOT_FOUND {
                ProtocolError::MethodNotFound(method.to_string())
            } else {
                ProtocolError::Server {
                    code: error.code,
                    message: error.message,
                }
            });
        }

        let result = response.result.unwrap_or(Value::Null);
        serde_json::from_value(result)
            .map_err(|e| ProtocolError::InvalidResponse(format!("{method}: {e}")))
    }

    /// Read messages until the response for `id` arrives.
    async fn await_response(&self, id: u64) -> Result<JsonRpcResponse, ProtocolError> {
        loop {
            let Some(message) = self.transport.receive().await? else {
                return Err(ProtocolError::Closed);
            };

            let method = message.get("method").and_then(Value::as_str);
            let message_id = message.get("id");

            match (method, message_id) {
                (Some(method), Some(request_id)) => {
                    self.answer_server_request(method, request_id.clone()).await?;
                }
                (Some(method), None) => {
                    self.logger
                        .debug(&format!("Server notification: {method}"));
                }
                (None, Some(response_id)) if response_id.as_u64() == Some(id) => {
                    return serde_json::from_value(message)
                        .map_err(|e| ProtocolError::InvalidResponse(e.to_string()));
                }
                _ => {
                    self.logger
                        .debug(&format!("Discarding unexpected message: {message}"));
                }
            }
        }
    }

    async fn answer_server_request(
        &self,
        method: &str,
        request_id: Value,
    ) -> Result<(), ProtocolError> {
        let reply = if method == "ping" {
            json!({ "jsonrpc": "2.0", "id": request_id, "result": {} })
        } else {
            self.logger
                .debug(&format!("Rejecting server request '{method}'"));
            json!({
                "jsonrpc": "2.0",
                "id": request_id,
                "error": { "code": METHOD_NOT_FOUND, "message": format!("Method not found: {method}") }
            })
        };
        self.transport.send(&reply).await?;
        Ok(())
    }

    /// Send a notification (no response expected).
    async fn notify(&self, method: &str, params: Option<Value>) -> Result<(), ProtocolError> {
        let notification = json!({
            "jsonrpc": "2.0",
            "method": method,
            "params": params.unwrap_or_else(|| json!({}))
        });
        self.transport.send(&notification).await?;
        Ok(())
    }

    /// Fetch every page of a cursor-paginated listing.
    async fn list_all<T: DeserializeOwned>(
        &self,
        method: &str,
        field: &str,
    ) -> Result<Vec<T>, ProtocolError> {
        let mut items = Vec::new();
        let mut cursor: Option<String> = None;
        let mut seen = HashSet::new();

        for _ in 0..MAX_PAGES {
            let params = cursor.as_ref().map(|c| json!({ "cursor": c }));
            let mut page: Map<String, Value> = self.request(method, params).await?;

            if let Some(list) = page.remove(field) {
                let batch: Vec<T> = serde_json::from_value(list)
                    .map_err(|e| ProtocolError::InvalidResponse(format!("{method}: {e}")))?;
                items.extend(batch);
            }

            cursor = page
                .get("nextCursor")
                .and_then(Value::as_str)
                .map(str::to_string);
            match &cursor {
                Some(next) if seen.insert(next.clone()) => {}
                _ => return Ok(items),
            }
        }

        self.logger.warn(&format!(
            "{method}: stopped after {MAX_PAGES} pages"
        ));
        Ok(items)
    }
}

#[async_trait]
impl ProtocolClient for JsonRpcClient {
    fn server_info(&self) -> &ServerInfo {
        &self.server_info
    }

    async fn list_tools(&self) -> Result<Vec<ToolInfo>, ProtocolError> {
        if self.capabilities.tools.is_none() {
            return Ok(Vec::new());
        }
        self.list_all("tools/list", "tools").await
    }

    async fn list_resources(&self) -> Result<Vec<ResourceInfo>, ProtocolError> {
        if self.capabilities.resources.is_none() {
            return Err(ProtocolError::MethodNotFound("resources/list".to_string()));
        }
        self.list_all("resources/list", "resources").await
    }

    async fn list_prompts(&self) -> Result<Vec<PromptInfo>, ProtocolError> {
        if self.capabilities.prompts.is_none() {
            return Err(ProtocolError::MethodNotFound("prompts/list".to_string()));
        }
        self.list_all("prompts/list", "prompts").await
    }

    async fn call_tool(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<CallToolResult, ProtocolError> {
        let params = json!({ "name": name, "arguments": arguments });
        self.request("tools/call", Some(params)).await
    }

    async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult, ProtocolError> {
        self.request("resources/read", Some(json!({ "uri": uri })))
            .await
    }

    async fn get_prompt(
        &self,
        name: &str,
        arguments: BTreeMap<String, String>,
    ) -> Result<GetPromptResult, ProtocolError> {
        let params = json!({ "name": name, "arguments": arguments });
        self.request("prompts/get", Some(params)).await
    }

    async fn close(&self) {
        if self.closed.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.transport.close().await {
            self.logger
                .debug(&format!("Error while closing transport: {e}"));
        }
    }
}
