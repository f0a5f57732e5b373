//! Connection lifecycle and capability catalog for MCP servers.
//!
//! The manager owns the live connections and the tool/resource/prompt
//! catalogs derived from them; configurations are persisted through the
//! registry port. Each server moves through
//! `disconnected → connecting → {connected | error}`; nothing reconnects
//! automatically.
//!
//! Expected failures never escape as errors: a failed connect becomes an
//! `error` status and a failed invocation becomes a failed result. Only
//! contract violations (unknown or disconnected server, invalid
//! configuration) are reported as [`McpError`].

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use chrono::Utc;
use tokio::sync::{Mutex, RwLock};

use mcpdock_core::domain::{
    Arguments, HealthCheckResult, Prompt, PromptArgument, Resource, ResourceContent, ServerConfig,
    ServerId, ServerStatus, Tool, ToolCall, ToolResult, to_prompt_arguments,
    to_protocol_arguments, validate_config_with,
};
use mcpdock_core::events::McpEvent;
use mcpdock_core::ports::{CachedCapabilities, EventEmitter, Logger, ServerRegistryPort};

use crate::content::{render_content, render_prompt_messages, render_resource_contents};
use crate::error::{McpError, ProtocolError};
use crate::probe;
use crate::protocol::{
    ClientIdentity, DEFAULT_REQUEST_TIMEOUT, JsonRpcConnector, PromptInfo, ProtocolClient,
    ProtocolConnector, ResourceInfo, ToolInfo,
};
use crate::transport::{DefaultTransportFactory, TransportFactory};

/// Settings for the bundled transport factory and protocol client.
#[derive(Debug, Clone)]
pub struct ManagerConfig {
    /// Name and version announced during the handshake.
    pub identity: ClientIdentity,
    /// Bound on each protocol request.
    pub request_timeout: Duration,
    /// Start background connects from `add_server` and `replace_server`.
    pub auto_connect: bool,
}

impl Default for ManagerConfig {
    fn default() -> Self {
        Self {
            identity: ClientIdentity::default(),
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            auto_connect: true,
        }
    }
}

/// Live session plus the connect attempt that produced it.
#[derive(Clone)]
struct Connection {
    client: Arc<dyn ProtocolClient>,
    attempt: u64,
}

/// Everything readers may observe. Mutated under one write lock.
#[derive(Default)]
struct ManagerState {
    configs: Vec<ServerConfig>,
    statuses: HashMap<ServerId, ServerStatus>,
    tools: Vec<Tool>,
    resources: Vec<Resource>,
    prompts: Vec<Prompt>,
    /// Connect attempts in flight; a finishing attempt that is no longer
    /// listed was cancelled by a disconnect or removal.
    attempts: HashMap<ServerId, u64>,
    initialized: bool,
}

impl ManagerState {
    fn contains(&self, id: &str) -> bool {
        self.configs.iter().any(|config| config.id() == id)
    }

    fn purge_catalogs(&mut self, id: &str) {
        self.tools.retain(|tool| tool.server_id != id);
        self.resources.retain(|resource| resource.server_id != id);
        self.prompts.retain(|prompt| prompt.server_id != id);
    }

    fn catalog_len(&self) -> usize {
        self.tools.len() + self.resources.len() + self.prompts.len()
    }

    fn catalog_event(&self) -> McpEvent {
        McpEvent::catalog_changed(self.tools.len(), self.resources.len(), self.prompts.len())
    }
}

struct Inner {
    registry: Arc<dyn ServerRegistryPort>,
    factory: Arc<dyn TransportFactory>,
    connector: Arc<dyn ProtocolConnector>,
    emitter: Arc<dyn EventEmitter>,
    logger: Arc<dyn Logger>,
    // Lock order: `state` before `connections`.
    state: RwLock<ManagerState>,
    connections: RwLock<HashMap<ServerId, Connection>>,
    persist_lock: Mutex<()>,
    next_attempt: AtomicU64,
}

/// Supervises connections to every configured server.
///
/// Cloning is cheap; clones share state.
#[derive(Clone)]
pub struct ConnectionManager {
    inner: Arc<Inner>,
    auto_connect: bool,
}

impl ConnectionManager {
    pub fn new(
        registry: Arc<dyn ServerRegistryPort>,
        factory: Arc<dyn TransportFactory>,
        connector: Arc<dyn ProtocolConnector>,
        emitter: Arc<dyn EventEmitter>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            inner: Arc::new(Inner {
                registry,
                factory,
                connector,
                emitter,
                logger,
                state: RwLock::new(ManagerState::default()),
                connections: RwLock::new(HashMap::new()),
                persist_lock: Mutex::new(()),
                next_attempt: AtomicU64::new(1),
            }),
            auto_connect: true,
        }
    }

    /// Whether `add_server` and `replace_server` connect in the background.
    /// Callers that turn this off connect explicitly.
    #[must_use]
    pub fn with_auto_connect(mut self, enabled: bool) -> Self {
        self.auto_connect = enabled;
        self
    }

    /// Manager using the HTTP/subprocess transports and the JSON-RPC client.
    pub fn with_defaults(
        registry: Arc<dyn ServerRegistryPort>,
        emitter: Arc<dyn EventEmitter>,
        logger: Arc<dyn Logger>,
        config: ManagerConfig,
    ) -> Result<Self, McpError> {
        let factory = DefaultTransportFactory::new(Arc::clone(&logger))?;
        let connector =
            JsonRpcConnector::new(config.identity, config.request_timeout, Arc::clone(&logger));
        Ok(Self::new(
            registry,
            Arc::new(factory),
            Arc::new(connector),
            emitter,
            logger,
        )
        .with_auto_connect(config.auto_connect))
    }

    fn emit(&self, event: McpEvent) {
        self.inner.emitter.emit(event);
    }

    fn logger(&self) -> &dyn Logger {
        self.inner.logger.as_ref()
    }

    /// Load configurations from the registry. Every server starts
    /// disconnected; existing connections are closed first.
    pub async fn load(&self) -> usize {
        self.shutdown().await;
        let configs = self.inner.registry.list_configs().await;
        let count = configs.len();

        {
            let mut state = self.inner.state.write().await;
            *state = ManagerState {
                statuses: configs
                    .iter()
                    .map(|config| (config.id().to_string(), ServerStatus::disconnected()))
                    .collect(),
                configs,
                ..ManagerState::default()
            };
        }

        self.logger()
            .info(&format!("Loaded {count} server configuration(s)"));
        count
    }

    async fn persist(&self) {
        let _guard = self.inner.persist_lock.lock().await;
        let configs = self.inner.state.read().await.configs.clone();
        self.inner.registry.save_configs(&configs).await;
    }

    /// Validate, store and persist a new server; connect in the background
    /// when it is enabled, unless turned off with
    /// [`with_auto_connect`](Self::with_auto_connect).
    pub async fn add_server(&self, config: ServerConfig) -> Result<(), McpError> {
        {
            let mut state = self.inner.state.write().await;
            if state.contains(config.id()) {
                return Err(McpError::ServerExists(config.id().to_string()));
            }

            let needle = config.name().trim().to_lowercase();
            let name_is_unique = !state
                .configs
                .iter()
                .any(|existing| existing.name().trim().to_lowercase() == needle);
            let errors = validate_config_with(&config, name_is_unique);
            if !errors.is_empty() {
                return Err(McpError::InvalidConfig(errors));
            }

            state.configs.push(config.clone());
            state
                .statuses
                .insert(config.id().to_string(), ServerStatus::disconnected());
        }

        self.persist().await;
        self.emit(McpEvent::server_added(&config));
        self.emit(McpEvent::status_changed(
            config.id(),
            ServerStatus::disconnected(),
        ));
        self.logger().info(&format!(
            "Added server '{}' ({})",
            config.name(),
            config.endpoint()
        ));

        if config.enabled() && self.auto_connect {
            self.spawn_connect(config);
        }
        Ok(())
    }

    fn spawn_connect(&self, config: ServerConfig) {
        let manager = self.clone();
        tokio::spawn(async move {
            manager.connect_to_server(&config).await;
        });
    }

    /// Disconnect and forget a server, including its cached capabilities
    /// and stored credential.
    pub async fn remove_server(&self, id: &str) -> Result<(), McpError> {
        let (removed, catalog) = {
            let mut state = self.inner.state.write().await;
            let Some(position) = state.configs.iter().position(|config| config.id() == id) else {
                return Err(McpError::UnknownServer(id.to_string()));
            };
            let removed = state.configs.remove(position);
            state.statuses.remove(id);
            state.attempts.remove(id);
            state.purge_catalogs(id);
            (removed, state.catalog_event())
        };

        let connection = self.inner.connections.write().await.remove(id);
        if let Some(connection) = connection {
            connection.client.close().await;
        }

        self.persist().await;
        self.inner.registry.clear_cached(id).await;

        self.emit(McpEvent::server_removed(id));
        self.emit(catalog);
        self.logger()
            .info(&format!("Removed server '{}'", removed.name()));
        Ok(())
    }

    /// Replace the `enabled` flag and auth token of an existing server.
    ///
    /// Disabling disconnects. Enabling a server that is not connected, or
    /// changing the token of an enabled one, starts a background connect
    /// when auto-connect is on.
    pub async fn replace_server(&self, config: ServerConfig) -> Result<(), McpError> {
        let previous = {
            let mut state = self.inner.state.write().await;
            let Some(slot) = state
                .configs
                .iter_mut()
                .find(|existing| existing.id() == config.id())
            else {
                return Err(McpError::UnknownServer(config.id().to_string()));
            };
            if let Some(field) = slot.changed_identity_field(&config) {
                return Err(McpError::ImmutableField(field));
            }
            std::mem::replace(slot, config.clone())
        };

        self.persist().await;
        self.emit(McpEvent::server_updated(&config));

        let connected = self.inner.connections.read().await.contains_key(config.id());
        if !config.enabled() {
            if previous.enabled() {
                self.disconnect_from_server(config.id()).await?;
            }
        } else if self.auto_connect
            && (!connected || previous.auth_token() != config.auth_token())
        {
            self.spawn_connect(config);
        }
        Ok(())
    }

    /// Connect to a configured server and discover its capabilities.
    ///
    /// Never fails: the outcome is recorded in the server's status. A
    /// server that is already connected is reconnected.
    pub async fn connect_to_server(&self, config: &ServerConfig) {
        let id = config.id().to_string();

        let previous = self.inner.connections.write().await.remove(&id);
        if let Some(previous) = previous {
            previous.client.close().await;
        }

        let attempt = self.inner.next_attempt.fetch_add(1, Ordering::SeqCst);
        let stale_catalog = {
            let mut state = self.inner.state.write().await;
            if !state.contains(&id) {
                drop(state);
                self.logger().warn(&format!(
                    "Ignoring connect request for unknown server '{}'",
                    config.name()
                ));
                return;
            }
            state.attempts.insert(id.clone(), attempt);
            state.statuses.insert(id.clone(), ServerStatus::connecting());

            // Entries of the previous session go until discovery succeeds again.
            let before = state.catalog_len();
            state.purge_catalogs(&id);
            (state.catalog_len() != before).then(|| state.catalog_event())
        };
        self.emit(McpEvent::status_changed(&id, ServerStatus::connecting()));
        if let Some(catalog) = stale_catalog {
            self.emit(catalog);
        }
        self.logger()
            .info(&format!("Connecting to '{}'", config.name()));

        let client = match self.open_session(config).await {
            Ok(client) => client,
            Err(message) => {
                self.fail_attempt(&id, attempt, &message).await;
                return;
            }
        };

        let status = ServerStatus::connected(Utc::now());
        {
            let mut state = self.inner.state.write().await;
            if state.attempts.get(&id) != Some(&attempt) {
                drop(state);
                client.close().await;
                self.logger().debug(&format!(
                    "Discarding session for '{}': connect was cancelled",
                    config.name()
                ));
                return;
            }
            state.attempts.remove(&id);
            self.inner.connections.write().await.insert(
                id.clone(),
                Connection {
                    client: Arc::clone(&client),
                    attempt,
                },
            );
            state.statuses.insert(id.clone(), status.clone());
        }
        self.emit(McpEvent::status_changed(&id, status));
        self.logger().info(&format!(
            "Connected to '{}' ({})",
            config.name(),
            client.server_info().name
        ));

        self.discover(config, client.as_ref(), attempt).await;
    }

    async fn open_session(&self, config: &ServerConfig) -> Result<Arc<dyn ProtocolClient>, String> {
        let transport = self
            .inner
            .factory
            .create_transport(config)
            .await
            .map_err(|e| e.to_string())?;
        self.inner
            .connector
            .connect(transport)
            .await
            .map_err(|e| e.to_string())
    }

    async fn fail_attempt(&self, id: &str, attempt: u64, message: &str) {
        let status = ServerStatus::error(message);
        {
            let mut state = self.inner.state.write().await;
            if state.attempts.get(id) != Some(&attempt) {
                return;
            }
            state.attempts.remove(id);
            state.statuses.insert(id.to_string(), status.clone());
        }
        self.emit(McpEvent::status_changed(id, status));
        self.logger()
            .warn(&format!("Failed to connect to server {id}: {message}"));
    }

    /// List tools, resources and prompts independently. Missing optional
    /// capabilities are expected and logged at debug level.
    async fn discover(&self, config: &ServerConfig, client: &dyn ProtocolClient, attempt: u64) {
        let id = config.id();
        let name = config.name();

        let tools = match client.list_tools().await {
            Ok(tools) => Some(tools),
            Err(e) => {
                self.logger()
                    .warn(&format!("Tool discovery failed for '{name}': {e}"));
                None
            }
        };
        let resources = self.optional_listing(name, "resources", client.list_resources().await);
        let prompts = self.optional_listing(name, "prompts", client.list_prompts().await);

        let tools_listed = tools.is_some();
        let tools: Vec<Tool> = tools
            .unwrap_or_default()
            .into_iter()
            .map(|info| tool_from_info(id, info))
            .collect();
        let resources: Vec<Resource> = resources
            .into_iter()
            .map(|info| resource_from_info(id, info))
            .collect();
        let prompts: Vec<Prompt> = prompts
            .into_iter()
            .map(|info| prompt_from_info(id, info))
            .collect();
        let counts = (tools.len(), resources.len(), prompts.len());

        let catalog = {
            let mut state = self.inner.state.write().await;
            let current = self
                .inner
                .connections
                .read()
                .await
                .get(id)
                .is_some_and(|connection| connection.attempt == attempt);
            if !current {
                return;
            }
            state.purge_catalogs(id);
            state.tools.extend(tools.iter().cloned());
            state.resources.extend(resources.iter().cloned());
            state.prompts.extend(prompts);
            state.catalog_event()
        };
        self.emit(catalog);

        if tools_listed {
            self.inner
                .registry
                .set_cached(id, &tools, &resources)
                .await;
        }
        self.logger().info(&format!(
            "Discovered {} tool(s), {} resource(s), {} prompt(s) on '{name}'",
            counts.0, counts.1, counts.2
        ));
    }

    fn optional_listing<T>(
        &self,
        server: &str,
        what: &str,
        result: Result<Vec<T>, ProtocolError>,
    ) -> Vec<T> {
        match result {
            Ok(items) => items,
            Err(e) if e.is_method_not_found() => {
                self.logger()
                    .debug(&format!("'{server}' does not support {what}"));
                Vec::new()
            }
            Err(e) => {
                self.logger()
                    .warn(&format!("Listing {what} failed for '{server}': {e}"));
                Vec::new()
            }
        }
    }

    /// Connect to every enabled server in configuration order, then mark the
    /// manager initialized.
    pub async fn connect_to_all_enabled(&self) {
        let configs: Vec<ServerConfig> = self
            .inner
            .state
            .read()
            .await
            .configs
            .iter()
            .filter(|config| config.enabled())
            .cloned()
            .collect();
        self.logger().info(&format!(
            "Connecting to {} enabled server(s)",
            configs.len()
        ));

        let mut connected = 0;
        let mut failed = 0;
        for config in &configs {
            self.connect_to_server(config).await;
            if self
                .status(config.id())
                .await
                .is_some_and(|status| status.is_connected())
            {
                connected += 1;
            } else {
                failed += 1;
            }
        }

        self.inner.state.write().await.initialized = true;
        self.emit(McpEvent::initialized(connected, failed));
        self.logger().info(&format!(
            "Initialization finished: {connected} connected, {failed} failed"
        ));
    }

    /// Close the server's session and drop its catalog entries.
    pub async fn disconnect_from_server(&self, id: &str) -> Result<(), McpError> {
        let catalog = {
            let mut state = self.inner.state.write().await;
            if !state.contains(id) {
                return Err(McpError::UnknownServer(id.to_string()));
            }
            state.attempts.remove(id);
            state.purge_catalogs(id);
            state
                .statuses
                .insert(id.to_string(), ServerStatus::disconnected());
            state.catalog_event()
        };

        let connection = self.inner.connections.write().await.remove(id);
        if let Some(connection) = connection {
            connection.client.close().await;
            self.logger().info(&format!("Disconnected server {id}"));
        }

        self.emit(McpEvent::status_changed(id, ServerStatus::disconnected()));
        self.emit(catalog);
        Ok(())
    }

    /// Disconnect every server.
    pub async fn shutdown(&self) {
        let ids: Vec<ServerId> = {
            let state = self.inner.state.read().await;
            let connections = self.inner.connections.read().await;
            state
                .configs
                .iter()
                .map(|config| config.id().to_string())
                .filter(|id| connections.contains_key(id) || state.attempts.contains_key(id))
                .collect()
        };
        for id in ids {
            if let Err(e) = self.disconnect_from_server(&id).await {
                self.logger()
                    .debug(&format!("Shutdown skipped server {id}: {e}"));
            }
        }
    }

    async fn connection(&self, server_id: &str) -> Result<Connection, McpError> {
        self.inner
            .connections
            .read()
            .await
            .get(server_id)
            .cloned()
            .ok_or_else(|| McpError::ServerNotConnected(server_id.to_string()))
    }

    /// Mark a server failed after its session died mid-call.
    async fn connection_lost(&self, server_id: &str, attempt: u64, error: &ProtocolError) {
        let removed = {
            let mut connections = self.inner.connections.write().await;
            match connections.get(server_id) {
                Some(connection) if connection.attempt == attempt => {
                    connections.remove(server_id)
                }
                _ => None,
            }
        };
        let Some(connection) = removed else {
            return;
        };
        connection.client.close().await;

        let status = ServerStatus::error(format!("Connection lost: {error}"));
        let catalog = {
            let mut state = self.inner.state.write().await;
            state.purge_catalogs(server_id);
            if state.contains(server_id) {
                state.statuses.insert(server_id.to_string(), status.clone());
            }
            state.catalog_event()
        };
        self.emit(McpEvent::status_changed(server_id, status));
        self.emit(catalog);
        self.logger()
            .warn(&format!("Lost connection to server {server_id}: {error}"));
    }

    /// Invoke a tool on its server.
    ///
    /// Fails only when the server is not connected. Tool-reported errors and
    /// transport failures come back as a failed [`ToolResult`].
    pub async fn call_tool(&self, tool: &Tool, params: &Arguments) -> Result<ToolResult, McpError> {
        let connection = self.connection(&tool.server_id).await?;
        let call = ToolCall::new(tool, params.clone());

        self.logger().debug(&format!(
            "Calling tool '{}' on server {}",
            tool.name, tool.server_id
        ));
        match connection
            .client
            .call_tool(&tool.name, to_protocol_arguments(params))
            .await
        {
            Ok(result) => {
                let text = render_content(&result.content);
                if result.is_error {
                    self.logger()
                        .debug(&format!("Tool '{}' reported an error: {text}", tool.name));
                    Ok(ToolResult::failure(call.call_id, text))
                } else {
                    Ok(ToolResult::success(call.call_id, text))
                }
            }
            Err(e) => {
                self.logger()
                    .warn(&format!("Tool call '{}' failed: {e}", tool.name));
                if e.is_connection_lost() {
                    self.connection_lost(&tool.server_id, connection.attempt, &e)
                        .await;
                }
                Ok(ToolResult::failure(call.call_id, e.to_string()))
            }
        }
    }

    /// Read a resource and normalize its contents to text.
    pub async fn read_resource(&self, resource: &Resource) -> Result<ResourceContent, McpError> {
        let connection = self.connection(&resource.server_id).await?;

        let result = match connection.client.read_resource(&resource.uri).await {
            Ok(result) => result,
            Err(e) => {
                if e.is_connection_lost() {
                    self.connection_lost(&resource.server_id, connection.attempt, &e)
                        .await;
                }
                return Err(e.into());
            }
        };

        let mime_type = result
            .contents
            .iter()
            .find_map(|entry| entry.mime_type.clone())
            .or_else(|| resource.mime_type.clone());
        Ok(ResourceContent {
            uri: resource.uri.clone(),
            mime_type,
            text: render_resource_contents(&result.contents),
        })
    }

    /// Render a prompt by name. When several servers offer the same name,
    /// the first discovered one is used.
    pub async fn get_prompt(&self, name: &str, args: &Arguments) -> Result<String, McpError> {
        let prompt = self
            .inner
            .state
            .read()
            .await
            .prompts
            .iter()
            .find(|prompt| prompt.name == name)
            .cloned()
            .ok_or_else(|| McpError::PromptNotFound(name.to_string()))?;
        let connection = self.connection(&prompt.server_id).await?;

        let result = match connection
            .client
            .get_prompt(&prompt.name, to_prompt_arguments(args))
            .await
        {
            Ok(result) => result,
            Err(e) => {
                if e.is_connection_lost() {
                    self.connection_lost(&prompt.server_id, connection.attempt, &e)
                        .await;
                }
                return Err(e.into());
            }
        };

        let body = render_prompt_messages(&result.messages);
        Ok(match result.description.filter(|d| !d.trim().is_empty()) {
            Some(description) if body.is_empty() => description,
            Some(description) => format!("{description}\n\n{body}"),
            None => body,
        })
    }

    /// Probe a configuration without keeping the connection.
    pub async fn test_connection(&self, config: &ServerConfig) -> Result<bool, McpError> {
        probe::test_connection(
            self.inner.factory.as_ref(),
            self.inner.connector.as_ref(),
            config,
        )
        .await
    }

    /// Probe a configuration, reporting the outcome as data.
    pub async fn health_check(&self, config: &ServerConfig) -> HealthCheckResult {
        probe::health_check(
            self.inner.factory.as_ref(),
            self.inner.connector.as_ref(),
            config,
        )
        .await
    }

    // ── Snapshots ───────────────────────────────────────────────────────

    /// Configured servers in order.
    pub async fn servers(&self) -> Vec<ServerConfig> {
        self.inner.state.read().await.configs.clone()
    }

    pub async fn server(&self, id: &str) -> Option<ServerConfig> {
        self.inner
            .state
            .read()
            .await
            .configs
            .iter()
            .find(|config| config.id() == id)
            .cloned()
    }

    pub async fn statuses(&self) -> HashMap<ServerId, ServerStatus> {
        self.inner.state.read().await.statuses.clone()
    }

    pub async fn status(&self, id: &str) -> Option<ServerStatus> {
        self.inner.state.read().await.statuses.get(id).cloned()
    }

    pub async fn tools(&self) -> Vec<Tool> {
        self.inner.state.read().await.tools.clone()
    }

    pub async fn resources(&self) -> Vec<Resource> {
        self.inner.state.read().await.resources.clone()
    }

    pub async fn prompts(&self) -> Vec<Prompt> {
        self.inner.state.read().await.prompts.clone()
    }

    /// Whether `connect_to_all_enabled` has completed.
    pub async fn is_initialized(&self) -> bool {
        self.inner.state.read().await.initialized
    }

    pub async fn find_tool(&self, server_id: &str, name: &str) -> Option<Tool> {
        self.inner
            .state
            .read()
            .await
            .tools
            .iter()
            .find(|tool| tool.server_id == server_id && tool.name == name)
            .cloned()
    }

    pub async fn find_resource(&self, server_id: &str, uri: &str) -> Option<Resource> {
        self.inner
            .state
            .read()
            .await
            .resources
            .iter()
            .find(|resource| resource.server_id == server_id && resource.uri == uri)
            .cloned()
    }

    /// Capabilities cached by the registry from an earlier discovery.
    pub async fn cached_capabilities(&self, id: &str) -> Option<CachedCapabilities> {
        self.inner.registry.get_cached(id).await
    }
}

fn tool_from_info(server_id: &str, info: ToolInfo) -> Tool {
    let mut tool = Tool::new(server_id, info.name);
    if let Some(description) = info.description {
        tool = tool.with_description(description);
    }
    if let Some(schema) = info.input_schema {
        tool = tool.with_input_schema(schema);
    }
    tool
}

fn resource_from_info(server_id: &str, info: ResourceInfo) -> Resource {
    let name = info.name.unwrap_or_else(|| info.uri.clone());
    let mut resource = Resource::new(server_id, info.uri, name);
    if let Some(description) = info.description {
        resource = resource.with_description(description);
    }
    if let Some(mime_type) = info.mime_type {
        resource = resource.with_mime_type(mime_type);
    }
    resource
}

fn prompt_from_info(server_id: &str, info: PromptInfo) -> Prompt {
    let mut prompt = Prompt::new(server_id, info.name);
    if let Some(description) = info.description {
        prompt = prompt.with_description(description);
    }
    for argument in info.arguments {
        prompt = prompt.with_argument(PromptArgument {
            name: argument.name,
            description: argument.description,
            required: argument.required.unwrap_or(false),
        });
    }
    prompt
}
