use crate::message::Frame;
use dashmap::DashMap;
use log::*;
use tokio::sync::mpsc::UnboundedSender;

/// Unique identifier for a connection (server-generated)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConnectionId(String);

impl ConnectionId {
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConnectionId {
    fn default() -> Self {
        Self::new()
    }
}

/// Connection information held for each registered subscriber.
#[derive(Debug, Clone)]
pub struct ConnectionInfo {
    pub sender: UnboundedSender<Frame>,
}

/// Subscriber set with O(1) registration and removal.
///
/// All mutation goes through this registry; fan-out iteration and removal
/// never overlap (stale connections are collected during iteration and
/// removed afterwards).
pub struct ConnectionRegistry {
    connections: DashMap<ConnectionId, ConnectionInfo>,
}

impl ConnectionRegistry {
    pub fn new() -> Self {
        Self {
            connections: DashMap::new(),
        }
    }

    /// Register a new connection - O(1)
    pub fn register(&self, sender: UnboundedSender<Frame>) -> ConnectionId {
        let connection_id = ConnectionId::new();
        self.connections
            .insert(connection_id.clone(), ConnectionInfo { sender });
        connection_id
    }

    /// Unregister a connection - O(1). Removing an id that is no longer
    /// present is a no-op, so teardown paths can race without harm.
    pub fn unregister(&self, connection_id: &ConnectionId) {
        self.connections.remove(connection_id);
    }

    /// Broadcast a frame to all connections - O(n).
    ///
    /// A connection whose receiver is gone fails the send; those
    /// connections are dropped from the set once iteration completes. A
    /// failure on one connection never interrupts delivery to the rest.
    pub fn broadcast(&self, frame: Frame) {
        let mut stale: Vec<ConnectionId> = Vec::new();

        for entry in self.connections.iter() {
            if entry.value().sender.send(frame.clone()).is_err() {
                warn!(
                    "Failed to send to connection {}. Connection will be removed.",
                    entry.key().as_str()
                );
                stale.push(entry.key().clone());
            }
        }

        for connection_id in stale {
            self.unregister(&connection_id);
        }
    }

    pub fn len(&self) -> usize {
        self.connections.len()
    }

    pub fn is_empty(&self) -> bool {
        self.connections.is_empty()
    }
}

impl Default for ConnectionRegistry {
    fn default() -> Self {
        Self::new()
    }
}
