use crate::Manager;
use async_trait::async_trait;
use events::{EventHandler, UpstreamEvent};
use std::sync::Arc;

/// Handles upstream events by fanning them out to all connected subscribers.
///
/// The upstream connector publishes through the `events` seam and knows
/// nothing about SSE connections; this handler is the bridge into the hub.
pub struct RelayEventHandler {
    manager: Arc<Manager>,
}

impl RelayEventHandler {
    pub fn new(manager: Arc<Manager>) -> Self {
        Self { manager }
    }
}

#[async_trait]
impl EventHandler for RelayEventHandler {
    async fn handle(&self, event: &UpstreamEvent) {
        self.manager.broadcast(&event.payload);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::message::Frame;

    #[tokio::test]
    async fn handled_events_reach_subscribers() {
        let manager = Arc::new(Manager::new());
        let handler = RelayEventHandler::new(manager.clone());
        let mut subscription = manager.subscribe();

        handler.handle(&UpstreamEvent::new("payload")).await;

        assert_eq!(subscription.recv().await, Some(Frame::Ack));
        assert_eq!(
            subscription.recv().await,
            Some(Frame::Data("payload".to_string()))
        );
    }
}
