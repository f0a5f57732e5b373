//! In-memory MCP servers for connection manager tests.
//!
//! [`FakeFactory`] hands out transports backed by a scripted server instead
//! of a socket or child process. The real JSON-RPC client runs on top, so
//! the handshake and listings go through the production code path.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use serde_json::{Value, json};

use mcpdock_core::domain::{ServerConfig, TransportKind};
use mcpdock_core::ports::{BroadcastEmitter, EventEmitter, Logger, MemoryLogger};
use mcpdock_mcp::protocol::ClientIdentity;
use mcpdock_mcp::{
    ConnectionManager, JsonRpcConnector, Transport, TransportError, TransportFactory,
};
use mcpdock_registry::{RegistryFactory, ServerRegistry};

// ── Scripted server ────────────────────────────────────────────────

/// What a fake server advertises. `None` listings omit the capability.
#[derive(Debug, Clone, Default)]
pub struct FakeServer {
    pub name: String,
    pub tools: Vec<Value>,
    pub resources: Option<Vec<Value>>,
    pub prompts: Option<Vec<Value>>,
    pub reject_handshake: bool,
    /// Methods answered with an internal error.
    pub failing: Vec<&'static str>,
}

impl FakeServer {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_tools(mut self, names: &[&str]) -> Self {
        self.tools = names
            .iter()
            .map(|name| {
                json!({
                    "name": name,
                    "description": format!("{name} tool"),
                    "inputSchema": { "type": "object" }
                })
            })
            .collect();
        self
    }

    pub fn with_resources(mut self, uris: &[&str]) -> Self {
        self.resources = Some(
            uris.iter()
                .map(|uri| json!({ "uri": uri, "name": uri, "mimeType": "text/plain" }))
                .collect(),
        );
        self
    }

    pub fn with_prompts(mut self, names: &[&str]) -> Self {
        self.prompts = Some(
            names
                .iter()
                .map(|name| {
                    json!({
                        "name": name,
                        "arguments": [{ "name": "who", "required": true }]
                    })
                })
                .collect(),
        );
        self
    }

    pub fn rejecting_handshake(mut self) -> Self {
        self.reject_handshake = true;
        self
    }

    pub fn failing(mut self, method: &'static str) -> Self {
        self.failing.push(method);
        self
    }

    fn capabilities(&self) -> Value {
        let mut capabilities = json!({ "tools": {} });
        if self.resources.is_some() {
            capabilities["resources"] = json!({});
        }
        if self.prompts.is_some() {
            capabilities["prompts"] = json!({});
        }
        capabilities
    }

    /// Result (or error object) for one request.
    fn handle(&self, method: &str, params: &Value) -> Result<Value, Value> {
        if self.failing.contains(&method) {
            return Err(json!({ "code": -32603, "message": format!("{method} exploded") }));
        }
        match method {
            "initialize" if self.reject_handshake => {
                Err(json!({ "code": -32603, "message": "handshake refused" }))
            }
            "initialize" => Ok(json!({
                "protocolVersion": "2024-11-05",
                "serverInfo": { "name": self.name, "version": "1.0.0" },
                "capabilities": self.capabilities()
            })),
            "tools/list" => Ok(json!({ "tools": self.tools })),
            "resources/list" => Ok(json!({ "resources": self.resources.clone().unwrap_or_default() })),
            "prompts/list" => Ok(json!({ "prompts": self.prompts.clone().unwrap_or_default() })),
            "tools/call" => {
                let arguments = &params["arguments"];
                match params["name"].as_str() {
                    Some("echo") => Ok(json!({
                        "content": [{ "type": "text", "text": arguments["text"] }]
                    })),
                    Some("add") => {
                        let sum = arguments["a"].as_i64().unwrap_or(0)
                            + arguments["b"].as_i64().unwrap_or(0);
                        Ok(json!({ "content": [{ "type": "text", "text": sum.to_string() }] }))
                    }
                    Some("fail") => Ok(json!({
                        "content": [{ "type": "text", "text": "boom" }],
                        "isError": true
                    })),
                    _ => Err(json!({ "code": -32602, "message": "unknown tool" })),
                }
            }
            "resources/read" => {
                let uri = params["uri"].as_str().unwrap_or_default();
                Ok(json!({
                    "contents": [{ "uri": uri, "mimeType": "text/markdown", "text": format!("contents of {uri}") }]
                }))
            }
            "prompts/get" => {
                let who = params["arguments"]["who"].as_str().unwrap_or("nobody");
                Ok(json!({
                    "description": "Greeting",
                    "messages": [{ "role": "user", "content": { "type": "text", "text": format!("Hello, {who}") } }]
                }))
            }
            _ => Err(json!({ "code": -32601, "message": "method not found" })),
        }
    }
}

/// Transport answering requests synchronously from a [`FakeServer`].
///
/// A `tools/call` for `crash` kills the channel, as a dying process would.
pub struct FakeTransport {
    server: FakeServer,
    inbound: Mutex<VecDeque<Value>>,
    closed: AtomicBool,
    closes: Arc<AtomicUsize>,
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, message: &Value) -> Result<(), TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Err(TransportError::Closed);
        }
        let Some(method) = message["method"].as_str() else {
            return Ok(());
        };
        if method == "tools/call" && message["params"]["name"] == "crash" {
            self.closed.store(true, Ordering::SeqCst);
            return Err(TransportError::Closed);
        }
        let Some(id) = message.get("id").cloned() else {
            return Ok(());
        };

        let reply = match self.server.handle(method, &message["params"]) {
            Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
            Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
        };
        self.inbound.lock().unwrap().push_back(reply);
        Ok(())
    }

    async fn receive(&self) -> Result<Option<Value>, TransportError> {
        if self.closed.load(Ordering::SeqCst) {
            return Ok(None);
        }
        Ok(self.inbound.lock().unwrap().pop_front())
    }

    async fn close(&self) -> Result<(), TransportError> {
        if !self.closed.swap(true, Ordering::SeqCst) {
            self.closes.fetch_add(1, Ordering::SeqCst);
        }
        Ok(())
    }

    fn kind(&self) -> TransportKind {
        TransportKind::Stdio
    }
}

/// Maps endpoints to fake servers. Unknown endpoints fail to launch.
#[derive(Default)]
pub struct FakeFactory {
    servers: Mutex<HashMap<String, FakeServer>>,
    created: AtomicUsize,
    closes: Arc<AtomicUsize>,
    delay: Option<Duration>,
}

impl FakeFactory {
    pub fn new() -> Self {
        Self::default()
    }

    /// Sleep before each transport is handed out.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn serve(&self, endpoint: &str, server: FakeServer) {
        self.servers
            .lock()
            .unwrap()
            .insert(endpoint.to_string(), server);
    }

    pub fn created(&self) -> usize {
        self.created.load(Ordering::SeqCst)
    }

    pub fn closed(&self) -> usize {
        self.closes.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TransportFactory for FakeFactory {
    async fn create_transport(
        &self,
        config: &ServerConfig,
    ) -> Result<Box<dyn Transport>, TransportError> {
        config.parsed_endpoint()?;
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        let server = self
            .servers
            .lock()
            .unwrap()
            .get(config.endpoint())
            .cloned()
            .ok_or_else(|| TransportError::LaunchFailed {
                command: config.endpoint().to_string(),
                reason: "connection refused".to_string(),
            })?;
        self.created.fetch_add(1, Ordering::SeqCst);
        Ok(Box::new(FakeTransport {
            server,
            inbound: Mutex::new(VecDeque::new()),
            closed: AtomicBool::new(false),
            closes: Arc::clone(&self.closes),
        }))
    }
}

// ── Harness ────────────────────────────────────────────────────────

pub struct Harness {
    pub manager: ConnectionManager,
    pub factory: Arc<FakeFactory>,
    pub registry: Arc<ServerRegistry>,
    pub emitter: Arc<BroadcastEmitter>,
    pub logger: Arc<MemoryLogger>,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_factory(FakeFactory::new())
    }

    pub fn with_factory(factory: FakeFactory) -> Self {
        let logger = Arc::new(MemoryLogger::new());
        let registry = Arc::new(
            RegistryFactory::in_memory(logger.clone() as Arc<dyn Logger>).with_defaults(Vec::new()),
        );
        let factory = Arc::new(factory);
        let emitter = Arc::new(BroadcastEmitter::default());
        let connector = JsonRpcConnector::new(
            ClientIdentity::default(),
            Duration::from_secs(5),
            logger.clone(),
        );
        let manager = ConnectionManager::new(
            registry.clone(),
            factory.clone(),
            Arc::new(connector),
            emitter.clone() as Arc<dyn EventEmitter>,
            logger.clone(),
        );
        Self {
            manager,
            factory,
            registry,
            emitter,
            logger,
        }
    }
}

/// Poll until `check` passes or two seconds elapse.
pub async fn eventually<F, Fut>(mut check: F) -> bool
where
    F: FnMut() -> Fut,
    Fut: std::future::Future<Output = bool>,
{
    for _ in 0..200 {
        if check().await {
            return true;
        }
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
    false
}
