use crate::error::Error;
use events::{EventPublisher, UpstreamEvent};
use eventsource_client::{self as es, Client, SSE};
use futures_util::stream::StreamExt;
use log::*;
use std::sync::atomic::{AtomicBool, AtomicU8, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Lifecycle of the single upstream connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ConnectionState {
    Disconnected = 0,
    Connecting = 1,
    Connected = 2,
}

/// Maintains at most one live connection to the upstream event stream and
/// publishes every received event through the `events` seam.
///
/// On stream error or close, the connector transitions to `Disconnected`,
/// waits out a fixed backoff, and reconnects. The loop retries forever;
/// upstream failures are never fatal to the process and are never surfaced
/// to subscribers.
pub struct Connector {
    client: Box<dyn Client>,
    publisher: EventPublisher,
    backoff: Duration,
    state: AtomicU8,
    started: AtomicBool,
}

impl Connector {
    /// Build a connector for a fixed upstream URL.
    ///
    /// The eventsource client's internal reconnection is disabled so the
    /// connector's own supervise loop owns all retry behavior.
    pub fn new(url: &str, backoff: Duration, publisher: EventPublisher) -> Result<Self, Error> {
        let client = es::ClientBuilder::for_url(url)?
            .reconnect(es::ReconnectOptions::reconnect(false).build())
            .build();

        Ok(Self {
            client: Box::new(client),
            publisher,
            backoff,
            state: AtomicU8::new(ConnectionState::Disconnected as u8),
            started: AtomicBool::new(false),
        })
    }

    /// Begin consuming the upstream stream on a spawned task.
    ///
    /// Idempotent: the supervising task is spawned at most once per
    /// connector. Calling again while `Connecting`, `Connected`, or waiting
    /// out a backoff (a reconnect is already scheduled) is a no-op.
    pub fn start(self: Arc<Self>) {
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        tokio::spawn(async move {
            self.run().await;
        });
    }

    /// Current lifecycle state.
    pub fn state(&self) -> ConnectionState {
        match self.state.load(Ordering::Acquire) {
            0 => ConnectionState::Disconnected,
            1 => ConnectionState::Connecting,
            _ => ConnectionState::Connected,
        }
    }

    fn set_state(&self, next: ConnectionState) {
        self.state.store(next as u8, Ordering::Release);
    }

    /// The stream itself gives no explicit open signal, so the first item
    /// received (event or keep-alive comment) marks the connection live.
    fn mark_connected(&self) {
        if self.state() != ConnectionState::Connected {
            info!("Upstream event stream connected");
            self.set_state(ConnectionState::Connected);
        }
    }

    /// Supervise loop: stream until failure or close, back off, reconnect.
    async fn run(&self) {
        loop {
            self.set_state(ConnectionState::Connecting);
            info!("Connecting to upstream event stream");

            let mut stream = self.client.stream();

            loop {
                match stream.next().await {
                    Some(Ok(SSE::Event(event))) => {
                        self.mark_connected();
                        self.publisher.publish(UpstreamEvent::new(event.data)).await;
                    }
                    Some(Ok(SSE::Comment(comment))) => {
                        // Keep-alive only; never forwarded.
                        self.mark_connected();
                        trace!("Upstream keep-alive comment: {comment}");
                    }
                    Some(Err(e)) => {
                        warn!("Upstream stream error: {e}");
                        break;
                    }
                    None => {
                        warn!("Upstream stream ended");
                        break;
                    }
                }
            }

            self.set_state(ConnectionState::Disconnected);
            debug!("Reconnecting to upstream in {:?}", self.backoff);
            tokio::time::sleep(self.backoff).await;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn new_rejects_an_invalid_upstream_url() {
        let err = Connector::new(
            "not a url",
            Duration::from_millis(100),
            EventPublisher::new(),
        )
        .err()
        .expect("invalid URL must be rejected");

        assert_eq!(err.error_kind, ErrorKind::InvalidUrl);
    }

    #[test]
    fn a_new_connector_starts_disconnected() {
        let connector = Connector::new(
            "http://localhost:7070/events",
            Duration::from_millis(100),
            EventPublisher::new(),
        )
        .expect("valid URL");

        assert_eq!(connector.state(), ConnectionState::Disconnected);
    }
}
