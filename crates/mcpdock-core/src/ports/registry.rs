//! Server registry port.
//!
//! The connection manager persists configurations and capability snapshots
//! through this trait without knowing how or where they are stored.

use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{Resource, ServerConfig, Tool, ValidationError, validate_config_with};

/// How long a cached capability snapshot stays usable.
pub const CAPABILITY_CACHE_TTL: Duration = Duration::from_secs(60 * 60);

/// Tools and resources last discovered for one server.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedCapabilities {
    pub tools: Vec<Tool>,
    pub resources: Vec<Resource>,
    pub cached_at: DateTime<Utc>,
}

impl CachedCapabilities {
    pub fn new(tools: Vec<Tool>, resources: Vec<Resource>) -> Self {
        Self {
            tools,
            resources,
            cached_at: Utc::now(),
        }
    }

    /// Whether the snapshot is younger than `ttl` at `now`.
    ///
    /// Snapshots stamped in the future (clock changes) are treated as stale.
    pub fn is_fresh_at(&self, now: DateTime<Utc>, ttl: Duration) -> bool {
        let Ok(ttl) = chrono::Duration::from_std(ttl) else {
            return false;
        };
        let age = now.signed_duration_since(self.cached_at);
        age >= chrono::Duration::zero() && age < ttl
    }
}

/// Persistent store of server configurations.
///
/// # Design Rules
///
/// - Persistence is best-effort: save failures are logged by the
///   implementation and never surfaced
/// - `list_configs()` returns a built-in default only if nothing was ever saved
/// - The capability cache is a hint; discovery never depends on it
#[async_trait]
pub trait ServerRegistryPort: Send + Sync {
    /// Persisted configurations in order, auth tokens attached.
    async fn list_configs(&self) -> Vec<ServerConfig>;

    /// Replace the persisted set wholesale.
    async fn save_configs(&self, configs: &[ServerConfig]);

    /// Case-insensitive name check against persisted configs, ignoring
    /// the config with `excluding_id`.
    async fn is_name_unique(&self, name: &str, excluding_id: Option<&str>) -> bool {
        let needle = name.trim().to_lowercase();
        !self.list_configs().await.iter().any(|config| {
            Some(config.id()) != excluding_id && config.name().trim().to_lowercase() == needle
        })
    }

    /// Configuration errors including name uniqueness.
    async fn validate(&self, config: &ServerConfig) -> Vec<ValidationError> {
        let unique = self.is_name_unique(config.name(), Some(config.id())).await;
        validate_config_with(config, unique)
    }

    /// Fresh cached capabilities for a server, if any.
    async fn get_cached(&self, server_id: &str) -> Option<CachedCapabilities>;

    /// Store a capability snapshot.
    async fn set_cached(&self, server_id: &str, tools: &[Tool], resources: &[Resource]);

    /// Drop the capability snapshot of a server.
    async fn clear_cached(&self, server_id: &str);
}
