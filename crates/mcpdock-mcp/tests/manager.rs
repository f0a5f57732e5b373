//! Integration tests for `ConnectionManager`.
//!
//! Servers are scripted in memory (see `common`); the JSON-RPC client and
//! the in-memory registry are the production implementations.
//!
//! # What is tested
//!
//! - Discovery tags catalog entries with their server and caches tools
//! - Connection failures land in status, never in errors
//! - Missing optional capabilities are logged at debug level only; other
//!   listing failures are warnings and never fail the connect
//! - Reconnecting replaces the catalog, and a failed reconnect empties it
//! - Removal and disconnection purge catalogs and statuses
//! - Tool calls, resource reads and prompt rendering
//! - Configuration validation and replacement rules
//! - A disconnect cancels a connect that is still in flight

mod common;

use std::sync::Arc;
use std::time::Duration;

use common::{FakeFactory, FakeServer, Harness, eventually};
use mcpdock_core::domain::{ArgValue, Arguments, ConnectionState, ServerConfig};
use mcpdock_core::events::McpEvent;
use mcpdock_core::ports::{LogLevel, NoopEmitter, NoopLogger, ServerRegistryPort};
use mcpdock_mcp::{
    ClientIdentity, ConnectionManager, DefaultTransportFactory, JsonRpcConnector, ManagerConfig,
    McpError, probe,
};
use mcpdock_registry::RegistryFactory;

fn weather() -> ServerConfig {
    ServerConfig::with_id("weather", "Weather", "stdio://weather-server")
}

fn files() -> ServerConfig {
    ServerConfig::with_id("files", "Files", "stdio://files-server")
}

fn serve_weather(harness: &Harness) {
    harness.factory.serve(
        "stdio://weather-server",
        FakeServer::new("weather")
            .with_tools(&["echo", "add", "fail", "crash"])
            .with_prompts(&["greet"]),
    );
}

fn serve_files(harness: &Harness) {
    harness.factory.serve(
        "stdio://files-server",
        FakeServer::new("files")
            .with_tools(&["echo"])
            .with_resources(&["file:///readme.md", "file:///notes.txt"]),
    );
}

async fn connected(harness: &Harness, configs: &[ServerConfig]) {
    harness.registry.save_configs(configs).await;
    harness.manager.load().await;
    harness.manager.connect_to_all_enabled().await;
}

fn args(pairs: &[(&str, ArgValue)]) -> Arguments {
    pairs
        .iter()
        .map(|(key, value)| ((*key).to_string(), value.clone()))
        .collect()
}

// ── Discovery ──────────────────────────────────────────────────────

#[tokio::test]
async fn test_connect_tags_catalog_with_server() {
    let harness = Harness::new();
    serve_weather(&harness);
    serve_files(&harness);
    connected(&harness, &[weather(), files()]).await;

    let tools = harness.manager.tools().await;
    assert_eq!(tools.len(), 5);
    assert!(tools.iter().any(|t| t.server_id == "weather" && t.name == "add"));
    assert!(tools.iter().any(|t| t.server_id == "files" && t.name == "echo"));

    let resources = harness.manager.resources().await;
    assert_eq!(resources.len(), 2);
    assert!(resources.iter().all(|r| r.server_id == "files"));

    let prompts = harness.manager.prompts().await;
    assert_eq!(prompts.len(), 1);
    assert_eq!(prompts[0].server_id, "weather");
    assert!(prompts[0].arguments[0].required);

    for id in ["weather", "files"] {
        let status = harness.manager.status(id).await.unwrap();
        assert_eq!(status.state, ConnectionState::Connected);
        assert!(status.connected_at.is_some());
    }
    assert!(harness.manager.is_initialized().await);
}

#[tokio::test]
async fn test_discovery_caches_tools_and_resources() {
    let harness = Harness::new();
    serve_files(&harness);
    connected(&harness, &[files()]).await;

    let cached = harness.manager.cached_capabilities("files").await.unwrap();
    assert_eq!(cached.tools.len(), 1);
    assert_eq!(cached.resources.len(), 2);
}

#[tokio::test]
async fn test_missing_optional_capabilities_logged_at_debug() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    assert!(harness.logger.contains(LogLevel::Debug, "does not support resources"));
    assert!(
        harness
            .logger
            .messages_at(LogLevel::Warn)
            .iter()
            .all(|message| !message.contains("resources"))
    );
    assert!(harness.manager.resources().await.is_empty());
}

#[tokio::test]
async fn test_unreachable_server_reports_error_status() {
    let harness = Harness::new();
    serve_weather(&harness);
    let offline = ServerConfig::with_id("offline", "Offline", "stdio://nowhere");
    connected(&harness, &[weather(), offline]).await;

    let status = harness.manager.status("offline").await.unwrap();
    assert_eq!(status.state, ConnectionState::Error);
    assert!(status.last_error.unwrap().contains("connection refused"));

    // The other server is unaffected.
    assert!(harness.manager.status("weather").await.unwrap().is_connected());
    assert!(harness.manager.is_initialized().await);
}

#[tokio::test]
async fn test_rejected_handshake_reports_error_status() {
    let harness = Harness::new();
    harness.factory.serve(
        "stdio://weather-server",
        FakeServer::new("weather").rejecting_handshake(),
    );
    connected(&harness, &[weather()]).await;

    let status = harness.manager.status("weather").await.unwrap();
    assert_eq!(status.state, ConnectionState::Error);
    assert!(status.last_error.unwrap().contains("handshake refused"));
    assert_eq!(harness.factory.closed(), 1);
}

#[tokio::test]
async fn test_failed_tool_listing_is_warned_but_connect_succeeds() {
    let harness = Harness::new();
    harness.factory.serve(
        "stdio://weather-server",
        FakeServer::new("weather")
            .with_tools(&["echo"])
            .with_prompts(&["greet"])
            .failing("tools/list"),
    );
    connected(&harness, &[weather()]).await;

    assert!(harness.manager.status("weather").await.unwrap().is_connected());
    assert!(harness.logger.contains(LogLevel::Warn, "Tool discovery failed"));
    assert!(harness.manager.tools().await.is_empty());
    assert_eq!(harness.manager.prompts().await.len(), 1);
    // Nothing worth caching without a tool list.
    assert!(harness.manager.cached_capabilities("weather").await.is_none());
}

#[tokio::test]
async fn test_failed_optional_listings_are_warned() {
    let harness = Harness::new();
    harness.factory.serve(
        "stdio://files-server",
        FakeServer::new("files")
            .with_tools(&["echo"])
            .with_resources(&["file:///readme.md"])
            .with_prompts(&["greet"])
            .failing("resources/list")
            .failing("prompts/list"),
    );
    connected(&harness, &[files()]).await;

    assert!(harness.manager.status("files").await.unwrap().is_connected());
    assert!(harness.logger.contains(LogLevel::Warn, "Listing resources failed"));
    assert!(harness.logger.contains(LogLevel::Warn, "Listing prompts failed"));
    assert!(!harness.logger.contains(LogLevel::Debug, "does not support"));
    assert_eq!(harness.manager.tools().await.len(), 1);
    assert!(harness.manager.resources().await.is_empty());
    assert!(harness.manager.prompts().await.is_empty());
}

#[tokio::test]
async fn test_failed_reconnect_drops_previous_catalog() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;
    assert!(harness.manager.find_tool("weather", "echo").await.is_some());

    harness.factory.serve(
        "stdio://weather-server",
        FakeServer::new("weather").rejecting_handshake(),
    );
    harness.manager.connect_to_server(&weather()).await;

    let status = harness.manager.status("weather").await.unwrap();
    assert_eq!(status.state, ConnectionState::Error);
    assert!(harness.manager.tools().await.is_empty());
    assert!(harness.manager.prompts().await.is_empty());
    assert!(matches!(
        harness.manager.get_prompt("greet", &Arguments::new()).await,
        Err(McpError::PromptNotFound(_))
    ));
}

#[tokio::test]
async fn test_reconnect_replaces_catalog() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    harness.factory.serve(
        "stdio://weather-server",
        FakeServer::new("weather").with_tools(&["forecast"]),
    );
    harness.manager.connect_to_server(&weather()).await;

    let tools = harness.manager.tools().await;
    assert_eq!(tools.len(), 1);
    assert_eq!(tools[0].name, "forecast");
    assert!(harness.manager.status("weather").await.unwrap().is_connected());
    // The first session was closed before the second opened.
    assert_eq!(harness.factory.created(), 2);
    assert_eq!(harness.factory.closed(), 1);
}

#[tokio::test]
async fn test_connect_all_skips_disabled_and_emits_initialized() {
    let harness = Harness::new();
    serve_weather(&harness);
    serve_files(&harness);
    let mut events = harness.emitter.subscribe();

    connected(&harness, &[weather(), files().with_enabled(false)]).await;

    assert_eq!(harness.factory.created(), 1);
    assert_eq!(
        harness.manager.status("files").await.unwrap().state,
        ConnectionState::Disconnected
    );

    let mut initialized = None;
    while let Ok(event) = events.try_recv() {
        if let McpEvent::Initialized { connected, failed } = event {
            initialized = Some((connected, failed));
        }
    }
    assert_eq!(initialized, Some((1, 0)));
}

#[tokio::test]
async fn test_unsupported_scheme_with_default_transports() {
    let registry = Arc::new(RegistryFactory::in_memory(Arc::new(NoopLogger)));
    registry
        .save_configs(&[ServerConfig::with_id("ftp", "Legacy", "ftp://files.example.com")])
        .await;
    let manager = ConnectionManager::with_defaults(
        registry,
        Arc::new(NoopEmitter),
        Arc::new(NoopLogger),
        ManagerConfig::default(),
    )
    .unwrap();

    manager.load().await;
    manager.connect_to_all_enabled().await;

    let status = manager.status("ftp").await.unwrap();
    assert_eq!(status.state, ConnectionState::Error);
    assert!(status.last_error.unwrap().contains("Unsupported"));
}

// ── Configuration ──────────────────────────────────────────────────

#[tokio::test]
async fn test_load_bootstraps_default_server_once() {
    let registry = Arc::new(RegistryFactory::in_memory(Arc::new(NoopLogger)));
    let manager = ConnectionManager::new(
        registry.clone(),
        Arc::new(FakeFactory::new()),
        Arc::new(JsonRpcConnector::new(
            ClientIdentity::default(),
            Duration::from_secs(1),
            Arc::new(NoopLogger),
        )),
        Arc::new(NoopEmitter),
        Arc::new(NoopLogger),
    );

    assert_eq!(manager.load().await, 1);
    assert_eq!(
        manager.servers().await[0].id(),
        mcpdock_registry::DEFAULT_SERVER_ID
    );

    registry.save_configs(&[]).await;
    assert_eq!(manager.load().await, 0);
}

#[tokio::test]
async fn test_add_server_connects_in_background() {
    let harness = Harness::new();
    serve_weather(&harness);
    harness.manager.load().await;

    harness.manager.add_server(weather()).await.unwrap();

    let manager = harness.manager.clone();
    assert!(
        eventually(|| {
            let manager = manager.clone();
            async move { manager.find_tool("weather", "echo").await.is_some() }
        })
        .await
    );
    assert_eq!(harness.registry.list_configs().await.len(), 1);
}

#[tokio::test]
async fn test_add_server_without_auto_connect_stays_disconnected() {
    let harness = Harness::new();
    serve_weather(&harness);
    let manager = harness.manager.clone().with_auto_connect(false);
    manager.load().await;

    manager.add_server(weather()).await.unwrap();
    tokio::time::sleep(Duration::from_millis(50)).await;

    assert_eq!(harness.factory.created(), 0);
    assert_eq!(
        manager.status("weather").await.unwrap().state,
        ConnectionState::Disconnected
    );

    manager.connect_to_server(&weather()).await;
    assert_eq!(harness.factory.created(), 1);
    assert!(manager.status("weather").await.unwrap().is_connected());
}

#[tokio::test]
async fn test_add_server_rejects_duplicates() {
    let harness = Harness::new();
    harness.manager.load().await;
    harness
        .manager
        .add_server(weather().with_enabled(false))
        .await
        .unwrap();

    let same_id = harness.manager.add_server(weather()).await;
    assert!(matches!(same_id, Err(McpError::ServerExists(_))));

    let same_name = ServerConfig::with_id("other", "  WEATHER ", "stdio://other");
    match harness.manager.add_server(same_name).await {
        Err(McpError::InvalidConfig(errors)) => assert_eq!(errors.len(), 1),
        other => panic!("expected InvalidConfig, got {other:?}"),
    }

    let bad_scheme = ServerConfig::with_id("ftp", "Legacy", "ftp://files.example.com");
    assert!(matches!(
        harness.manager.add_server(bad_scheme).await,
        Err(McpError::InvalidConfig(_))
    ));
    assert_eq!(harness.manager.servers().await.len(), 1);
}

#[tokio::test]
async fn test_replace_server_keeps_identity_fields() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    let renamed = ServerConfig::with_id("weather", "Forecast", "stdio://weather-server");
    assert!(matches!(
        harness.manager.replace_server(renamed).await,
        Err(McpError::ImmutableField("name"))
    ));

    let unknown = ServerConfig::with_id("nope", "Nope", "stdio://nope");
    assert!(matches!(
        harness.manager.replace_server(unknown).await,
        Err(McpError::UnknownServer(_))
    ));
}

#[tokio::test]
async fn test_disabling_server_disconnects_it() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    harness
        .manager
        .replace_server(weather().with_enabled(false))
        .await
        .unwrap();

    assert_eq!(
        harness.manager.status("weather").await.unwrap().state,
        ConnectionState::Disconnected
    );
    assert!(harness.manager.tools().await.is_empty());
    assert!(!harness.registry.list_configs().await[0].enabled());
}

#[tokio::test]
async fn test_remove_server_purges_everything() {
    let harness = Harness::new();
    serve_weather(&harness);
    serve_files(&harness);
    connected(&harness, &[weather(), files()]).await;

    harness.manager.remove_server("files").await.unwrap();

    assert!(harness.manager.status("files").await.is_none());
    assert!(harness.manager.resources().await.is_empty());
    assert!(
        harness
            .manager
            .tools()
            .await
            .iter()
            .all(|tool| tool.server_id == "weather")
    );
    assert!(harness.manager.cached_capabilities("files").await.is_none());
    assert_eq!(harness.registry.list_configs().await.len(), 1);
    assert_eq!(harness.factory.closed(), 1);

    assert!(matches!(
        harness.manager.remove_server("files").await,
        Err(McpError::UnknownServer(_))
    ));
}

#[tokio::test]
async fn test_disconnect_cancels_pending_connect() {
    let harness = Harness::with_factory(FakeFactory::new().with_delay(Duration::from_millis(200)));
    serve_weather(&harness);
    harness.manager.load().await;
    harness.manager.add_server(weather()).await.unwrap();

    let manager = harness.manager.clone();
    assert!(
        eventually(|| {
            let manager = manager.clone();
            async move {
                manager
                    .status("weather")
                    .await
                    .is_some_and(|s| s.state == ConnectionState::Connecting)
            }
        })
        .await
    );
    harness
        .manager
        .disconnect_from_server("weather")
        .await
        .unwrap();

    tokio::time::sleep(Duration::from_millis(400)).await;
    assert_eq!(
        harness.manager.status("weather").await.unwrap().state,
        ConnectionState::Disconnected
    );
    assert!(harness.manager.tools().await.is_empty());
}

// ── Invocation ─────────────────────────────────────────────────────

#[tokio::test]
async fn test_call_tool_requires_connection() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;
    let tool = harness.manager.find_tool("weather", "echo").await.unwrap();

    harness
        .manager
        .disconnect_from_server("weather")
        .await
        .unwrap();

    let result = harness.manager.call_tool(&tool, &Arguments::new()).await;
    assert!(matches!(result, Err(McpError::ServerNotConnected(_))));
}

#[tokio::test]
async fn test_call_tool_normalizes_results() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    let echo = harness.manager.find_tool("weather", "echo").await.unwrap();
    let result = harness
        .manager
        .call_tool(&echo, &args(&[("text", ArgValue::from("sunny"))]))
        .await
        .unwrap();
    assert!(result.is_success);
    assert_eq!(result.content, "sunny");

    let add = harness.manager.find_tool("weather", "add").await.unwrap();
    let result = harness
        .manager
        .call_tool(&add, &args(&[("a", ArgValue::from(2)), ("b", ArgValue::from(40))]))
        .await
        .unwrap();
    assert_eq!(result.content, "42");

    let fail = harness.manager.find_tool("weather", "fail").await.unwrap();
    let result = harness
        .manager
        .call_tool(&fail, &Arguments::new())
        .await
        .unwrap();
    assert!(!result.is_success);
    assert_eq!(result.error.as_deref(), Some("boom"));
}

#[tokio::test]
async fn test_transport_failure_during_call_marks_server_failed() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    let crash = harness.manager.find_tool("weather", "crash").await.unwrap();
    let result = harness
        .manager
        .call_tool(&crash, &Arguments::new())
        .await
        .unwrap();

    assert!(!result.is_success);
    assert!(result.error.is_some());
    let status = harness.manager.status("weather").await.unwrap();
    assert_eq!(status.state, ConnectionState::Error);
    assert!(status.last_error.unwrap().starts_with("Connection lost"));
    assert!(harness.manager.tools().await.is_empty());
}

#[tokio::test]
async fn test_read_resource_uses_content_mime_type() {
    let harness = Harness::new();
    serve_files(&harness);
    connected(&harness, &[files()]).await;

    let resource = harness
        .manager
        .find_resource("files", "file:///readme.md")
        .await
        .unwrap();
    let content = harness.manager.read_resource(&resource).await.unwrap();

    assert_eq!(content.uri, "file:///readme.md");
    assert_eq!(content.text, "contents of file:///readme.md");
    assert_eq!(content.mime_type.as_deref(), Some("text/markdown"));
}

#[tokio::test]
async fn test_get_prompt_renders_description_and_messages() {
    let harness = Harness::new();
    serve_weather(&harness);
    connected(&harness, &[weather()]).await;

    let text = harness
        .manager
        .get_prompt("greet", &args(&[("who", ArgValue::from("Ada"))]))
        .await
        .unwrap();
    assert_eq!(text, "Greeting\n\nHello, Ada");

    assert!(matches!(
        harness.manager.get_prompt("missing", &Arguments::new()).await,
        Err(McpError::PromptNotFound(_))
    ));
}

// ── Probes ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_probes_do_not_keep_connections() {
    let harness = Harness::new();
    serve_weather(&harness);
    harness.manager.load().await;

    assert!(harness.manager.test_connection(&weather()).await.unwrap());
    assert_eq!(harness.factory.closed(), 1);
    assert!(harness.manager.tools().await.is_empty());

    let offline = ServerConfig::with_id("offline", "Offline", "stdio://nowhere");
    assert!(!harness.manager.test_connection(&offline).await.unwrap());

    let health = harness.manager.health_check(&offline).await;
    assert!(!health.is_healthy);
    assert!(health.error.unwrap().contains("connection refused"));

    let bad_scheme = ServerConfig::with_id("ftp", "Legacy", "ftp://files.example.com");
    assert!(harness.manager.test_connection(&bad_scheme).await.is_err());
    let health = harness.manager.health_check(&bad_scheme).await;
    assert!(!health.is_healthy);
    assert!(health.error.unwrap().contains("ftp"));
}

#[tokio::test]
async fn test_default_transports_reject_empty_command() {
    let factory = DefaultTransportFactory::new(Arc::new(NoopLogger)).unwrap();
    let connector = JsonRpcConnector::new(
        ClientIdentity::default(),
        Duration::from_secs(1),
        Arc::new(NoopLogger),
    );

    let empty = ServerConfig::with_id("empty", "Empty", "stdio://%20%20");
    let result = probe::test_connection(&factory, &connector, &empty).await;
    assert!(matches!(result, Err(McpError::Transport(_))));
}
