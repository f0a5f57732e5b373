//! Persistent registry of server configurations.
//!
//! Configurations are stored as one JSON document in a [`KeyValueStore`];
//! auth tokens live in a [`CredentialStore`] keyed by server id and are
//! re-attached on read. Capability snapshots are stored in a second
//! document keyed by server id.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tokio::sync::Mutex;

use mcpdock_core::domain::{Endpoint, Resource, ServerConfig, Tool};
use mcpdock_core::ports::{
    CAPABILITY_CACHE_TTL, CachedCapabilities, CredentialStore, KeyValueStore, Logger,
    ServerRegistryPort,
};

/// Store key of the configuration list.
pub const SERVERS_KEY: &str = "servers";

/// Store key of the capability cache.
pub const CAPABILITY_CACHE_KEY: &str = "capability_cache";

/// Identifier of the built-in first-run server.
pub const DEFAULT_SERVER_ID: &str = "builtin-everything";

/// Credential key holding the auth token of `server_id`.
pub fn token_key(server_id: &str) -> String {
    format!("server-token:{server_id}")
}

/// Configurations returned before anything was ever saved.
pub fn default_servers() -> Vec<ServerConfig> {
    vec![
        ServerConfig::with_id(
            DEFAULT_SERVER_ID,
            "Everything",
            Endpoint::stdio_endpoint("npx", &["-y", "@modelcontextprotocol/server-everything"]),
        )
        .with_description("Reference server exposing sample tools, resources and prompts"),
    ]
}

type CacheDocument = HashMap<String, CachedCapabilities>;

/// [`ServerRegistryPort`] over a key-value store and a credential store.
pub struct ServerRegistry {
    store: Arc<dyn KeyValueStore>,
    credentials: Arc<dyn CredentialStore>,
    logger: Arc<dyn Logger>,
    defaults: Vec<ServerConfig>,
    // Serializes read-modify-write cycles on the stored documents.
    write_lock: Mutex<()>,
}

impl ServerRegistry {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        credentials: Arc<dyn CredentialStore>,
        logger: Arc<dyn Logger>,
    ) -> Self {
        Self {
            store,
            credentials,
            logger,
            defaults: default_servers(),
            write_lock: Mutex::new(()),
        }
    }

    /// Replace the first-run default configurations.
    #[must_use]
    pub fn with_defaults(mut self, defaults: Vec<ServerConfig>) -> Self {
        self.defaults = defaults;
        self
    }

    /// Stored configurations without tokens.
    ///
    /// `None` when nothing was ever saved. Unreadable documents are logged
    /// and treated as an empty list.
    async fn load_stored(&self) -> Option<Vec<ServerConfig>> {
        match self.store.get(SERVERS_KEY).await {
            Ok(None) => None,
            Ok(Some(value)) => match serde_json::from_value(value) {
                Ok(configs) => Some(configs),
                Err(e) => {
                    self.logger
                        .warn(&format!("Stored server list is unreadable, ignoring it: {e}"));
                    Some(Vec::new())
                }
            },
            Err(e) => {
                self.logger.warn(&format!("Failed to read server list: {e}"));
                Some(Vec::new())
            }
        }
    }

    /// Run credential calls on the blocking pool. Platform keychains may
    /// wait on a user prompt.
    async fn with_credentials<T, F>(&self, work: F) -> Option<T>
    where
        F: FnOnce(&dyn CredentialStore) -> T + Send + 'static,
        T: Send + 'static,
    {
        let credentials = Arc::clone(&self.credentials);
        match tokio::task::spawn_blocking(move || work(credentials.as_ref())).await {
            Ok(value) => Some(value),
            Err(e) => {
                self.logger
                    .warn(&format!("Credential store task failed: {e}"));
                None
            }
        }
    }

    async fn attach_tokens(&self, configs: Vec<ServerConfig>) -> Vec<ServerConfig> {
        let keys: Vec<String> = configs.iter().map(|config| token_key(config.id())).collect();
        let tokens = self
            .with_credentials(move |store| keys.iter().map(|key| store.get(key)).collect::<Vec<_>>())
            .await
            .unwrap_or_default();

        let mut tokens = tokens.into_iter();
        configs
            .into_iter()
            .map(|config| match tokens.next() {
                Some(Ok(token)) => config.with_auth_token(token),
                Some(Err(e)) => {
                    self.logger.warn(&format!(
                        "Failed to read auth token for server '{}': {e}",
                        config.name()
                    ));
                    config
                }
                None => config,
            })
            .collect()
    }

    /// Set or delete each token. `writes` holds (label, key, token).
    async fn store_tokens(&self, writes: Vec<(String, String, Option<String>)>) {
        let failures = self
            .with_credentials(move |store| {
                writes
                    .into_iter()
                    .filter_map(|(label, key, token)| {
                        let result = match &token {
                            Some(token) => store.set(&key, token),
                            None => store.delete(&key),
                        };
                        result
                            .err()
                            .map(|e| format!("Failed to store auth token for {label}: {e}"))
                    })
                    .collect::<Vec<_>>()
            })
            .await
            .unwrap_or_default();
        for failure in failures {
            self.logger.warn(&failure);
        }
    }

    async fn load_cache(&self) -> CacheDocument {
        match self.store.get(CAPABILITY_CACHE_KEY).await {
            Ok(Some(value)) => serde_json::from_value(value).unwrap_or_else(|e| {
                self.logger
                    .debug(&format!("Discarding unreadable capability cache: {e}"));
                CacheDocument::new()
            }),
            Ok(None) => CacheDocument::new(),
            Err(e) => {
                self.logger
                    .debug(&format!("Failed to read capability cache: {e}"));
                CacheDocument::new()
            }
        }
    }

    async fn save_cache(&self, cache: &CacheDocument) {
        let value = match serde_json::to_value(cache) {
            Ok(value) => value,
            Err(e) => {
                self.logger
                    .warn(&format!("Failed to encode capability cache: {e}"));
                return;
            }
        };
        if let Err(e) = self.store.set(CAPABILITY_CACHE_KEY, value).await {
            self.logger
                .warn(&format!("Failed to write capability cache: {e}"));
        }
    }
}

#[async_trait]
impl ServerRegistryPort for ServerRegistry {
    async fn list_configs(&self) -> Vec<ServerConfig> {
        let configs = self
            .load_stored()
            .await
            .unwrap_or_else(|| self.defaults.clone());
        self.attach_tokens(configs).await
    }

    async fn save_configs(&self, configs: &[ServerConfig]) {
        let _guard = self.write_lock.lock().await;

        let previous: HashSet<String> = self
            .load_stored()
            .await
            .unwrap_or_default()
            .into_iter()
            .map(|config| config.id().to_string())
            .collect();

        let kept: HashSet<&str> = configs.iter().map(ServerConfig::id).collect();
        let writes = configs
            .iter()
            .map(|config| {
                (
                    format!("server '{}'", config.name()),
                    token_key(config.id()),
                    config.auth_token().map(str::to_string),
                )
            })
            .chain(
                previous
                    .iter()
                    .filter(|id| !kept.contains(id.as_str()))
                    .map(|id| (format!("removed server {id}"), token_key(id), None)),
            )
            .collect();
        self.store_tokens(writes).await;

        let value = match serde_json::to_value(configs) {
            Ok(value) => value,
            Err(e) => {
                self.logger.warn(&format!("Failed to encode server list: {e}"));
                return;
            }
        };
        match self.store.set(SERVERS_KEY, value).await {
            Ok(()) => self
                .logger
                .debug(&format!("Saved {} server configuration(s)", configs.len())),
            Err(e) => self.logger.warn(&format!("Failed to save server list: {e}")),
        }
    }

    async fn get_cached(&self, server_id: &str) -> Option<CachedCapabilities> {
        self.load_cache()
            .await
            .remove(server_id)
            .filter(|entry| entry.is_fresh_at(Utc::now(), CAPABILITY_CACHE_TTL))
    }

    async fn set_cached(&self, server_id: &str, tools: &[Tool], resources: &[Resource]) {
        let _guard = self.write_lock.lock().await;
        let mut cache = self.load_cache().await;
        cache.insert(
            server_id.to_string(),
            CachedCapabilities::new(tools.to_vec(), resources.to_vec()),
        );
        self.save_cache(&cache).await;
    }

    async fn clear_cached(&self, server_id: &str) {
        let _guard = self.write_lock.lock().await;
        let mut cache = self.load_cache().await;
        if cache.remove(server_id).is_some() {
            self.save_cache(&cache).await;
        }
    }
}
