//! Event emitter trait for publishing connection-manager state changes.
//!
//! This module defines the abstraction for emitting [`McpEvent`]s.
//! Implementations handle transport details (channels, UI bridges, etc.).

use tokio::sync::broadcast;

use crate::events::McpEvent;

/// Trait for emitting manager events.
///
/// This abstraction keeps event plumbing out of the manager and prevents
/// channel types from becoming part of its public API surface.
///
/// # Implementations
///
/// - `NoopEmitter` - For tests and CLI contexts that don't need events
/// - `BroadcastEmitter` - Fan-out to any number of subscribers
pub trait EventEmitter: Send + Sync {
    /// Emit an event.
    ///
    /// This method must not block.
    fn emit(&self, event: McpEvent);

    /// Clone this emitter into a boxed trait object.
    fn clone_box(&self) -> Box<dyn EventEmitter>;
}

/// A no-op event emitter for tests and CLI contexts.
#[derive(Debug, Clone, Default)]
pub struct NoopEmitter;

impl NoopEmitter {
    /// Create a new no-op emitter.
    pub const fn new() -> Self {
        Self
    }
}

impl EventEmitter for NoopEmitter {
    fn emit(&self, _event: McpEvent) {}

    fn clone_box(&self) -> Box<dyn EventEmitter> {
        Box::new(self.clone())
    }
}

/// Emitter backed by a `tokio::sync::broadcast` channel.
///
/// Slow subscribers lag (and see `RecvError::Lagged`) rather than blocking
/// the manager.
#[derive(Debug, Clone)]
pub struct BroadcastEmitter {
    sender: broadcast::Sender<McpEvent>,
}

impl BroadcastEmitter {
    /// Default number of buffered events per subscriber.
    pub const DEFAULT_CAPACITY: usize = 256;

    /// Create an emitter buffering up to `capacity` events per subscriber.
    pub fn new(capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(capacity.max(1));
        Self { sender }
    }

    /// Subscribe to events emitted after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<McpEvent> {
        self.sender.subscribe()
    }
}

impl Default for BroadcastEmitter {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CAPACITY)
    }
}

impl EventEmitter for BroadcastEmitter {
    fn emit(&self, event: McpEvent) {
        // Sending only fails when nobody is subscribed.
        let _ = self.sender.send(event);
    }

    fn clone_box(&self) -> Box<dyn EventEmitter> {
        Box::new(self.clone())
    }
}
