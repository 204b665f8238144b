//! Event system infrastructure for the SSE relay.
//!
//! This crate provides the event seam that keeps the upstream consumer
//! decoupled from the delivery infrastructure (the SSE broadcast hub).
//!
//! # Architecture
//!
//! - **UpstreamEvent**: One event received from the upstream stream
//! - **EventHandler**: Trait for implementing event handlers
//! - **EventPublisher**: Publishes events to registered handlers
//!
//! This crate has no dependencies on the other relay crates, so the
//! `upstream` connector (producer side) and the `sse` hub (delivery side)
//! can both depend on it without cycles. Payloads are carried as opaque
//! strings; the relay never parses upstream message content.

use async_trait::async_trait;
use std::sync::Arc;

/// A single event received from the upstream stream.
///
/// The payload is forwarded to subscribers verbatim. Malformed or
/// unexpected upstream content is not validated here or anywhere else in
/// the relay.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpstreamEvent {
    pub payload: String,
}

impl UpstreamEvent {
    pub fn new(payload: impl Into<String>) -> Self {
        Self {
            payload: payload.into(),
        }
    }
}

/// Trait for handling upstream events.
/// Implementations can perform side effects like fanning the event out to
/// connected subscribers, updating counters, logging, etc.
#[async_trait]
pub trait EventHandler: Send + Sync {
    async fn handle(&self, event: &UpstreamEvent);
}

/// Publishes upstream events to registered handlers.
/// Handlers are called sequentially in registration order, which preserves
/// per-handler event ordering.
#[derive(Clone)]
pub struct EventPublisher {
    handlers: Arc<Vec<Arc<dyn EventHandler>>>,
}

impl EventPublisher {
    pub fn new() -> Self {
        Self {
            handlers: Arc::new(Vec::new()),
        }
    }

    /// Register a new event handler.
    /// Note: This creates a new publisher instance with the additional handler.
    /// Store the returned publisher in your application state.
    pub fn with_handler(mut self, handler: Arc<dyn EventHandler>) -> Self {
        let mut handlers = (*self.handlers).clone();
        handlers.push(handler);
        self.handlers = Arc::new(handlers);
        self
    }

    /// Publish an event to all registered handlers.
    pub async fn publish(&self, event: UpstreamEvent) {
        for handler in self.handlers.iter() {
            handler.handle(&event).await;
        }
    }
}

impl Default for EventPublisher {
    fn default() -> Self {
        Self::new()
    }
}
