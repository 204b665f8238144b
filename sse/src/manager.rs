use crate::connection::{ConnectionId, ConnectionRegistry};
use crate::message::Frame;
use log::*;
use std::sync::Arc;
use tokio::sync::mpsc::{self, UnboundedReceiver};

/// The broadcast hub. One instance per process, shared between the upstream
/// delivery path and every connection handler.
pub struct Manager {
    registry: Arc<ConnectionRegistry>,
}

impl Manager {
    pub fn new() -> Self {
        Self {
            registry: Arc::new(ConnectionRegistry::new()),
        }
    }

    /// Register a new subscriber and return its handle.
    ///
    /// The acknowledgement frame is queued before the connection enters the
    /// registry, so it is always the first frame the subscriber receives --
    /// no concurrent broadcast can get in ahead of it.
    pub fn subscribe(&self) -> Subscription {
        let (sender, receiver) = mpsc::unbounded_channel();

        // Receiver is in scope, this cannot fail.
        let _ = sender.send(Frame::Ack);

        let connection_id = self.registry.register(sender);
        info!("Registered new SSE connection {}", connection_id.as_str());

        Subscription {
            connection_id,
            registry: Arc::clone(&self.registry),
            receiver,
        }
    }

    /// Remove a subscriber by id. Unknown ids are a no-op.
    pub fn unsubscribe(&self, connection_id: &ConnectionId) {
        info!("Unregistering SSE connection {}", connection_id.as_str());
        self.registry.unregister(connection_id);
    }

    /// Deliver a payload to every current subscriber.
    ///
    /// Payloads are forwarded verbatim; delivery failures drop the affected
    /// subscriber without surfacing an error here.
    pub fn broadcast(&self, payload: &str) {
        debug!(
            "Broadcasting event to {} subscriber(s)",
            self.registry.len()
        );
        self.registry.broadcast(Frame::Data(payload.to_string()));
    }

    pub fn subscriber_count(&self) -> usize {
        self.registry.len()
    }
}

impl Default for Manager {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle owned by one subscriber's connection task.
///
/// Receives the frames the hub pushes for this subscriber. Dropping the
/// handle deregisters the connection; since either side may end the stream
/// first, teardown runs exactly once via this drop no matter who closes.
pub struct Subscription {
    connection_id: ConnectionId,
    registry: Arc<ConnectionRegistry>,
    receiver: UnboundedReceiver<Frame>,
}

impl Subscription {
    /// Wait for the next frame. Returns `None` once the hub side is gone.
    pub async fn recv(&mut self) -> Option<Frame> {
        self.receiver.recv().await
    }

    pub fn connection_id(&self) -> &ConnectionId {
        &self.connection_id
    }
}

impl Drop for Subscription {
    fn drop(&mut self) {
        debug!(
            "SSE connection {} closed, cleaning up",
            self.connection_id.as_str()
        );
        self.registry.unregister(&self.connection_id);
    }
}
