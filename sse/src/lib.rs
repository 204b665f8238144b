//! Server-Sent Events (SSE) broadcast hub for the relay.
//!
//! This crate owns the set of connected subscribers and fans every upstream
//! event out to all of them.
//!
//! # Architecture
//!
//! - **Explicitly owned hub**: One `Manager` per process, injected into the
//!   upstream delivery path and every connection handler; no module-level
//!   state.
//! - **Ephemeral events**: Nothing is persisted or replayed. A subscriber
//!   that connects after an event was broadcast never sees it.
//! - **Best-effort delivery**: A subscriber whose sink fails a write is
//!   dropped from the set; the failure never reaches other subscribers or
//!   the upstream connection.
//! - **Scoped teardown**: Subscribing yields a `Subscription` handle whose
//!   drop deregisters the connection, whichever side closes first.
//!
//! # Modules
//!
//! - `connection`: ConnectionRegistry subscriber set and type-safe ConnectionId
//! - `manager`: High-level subscribe/unsubscribe/broadcast API
//! - `message`: Frame definitions pushed to subscriber channels
//! - `event_handler`: Bridges the `events` seam into the hub

pub mod connection;
pub mod event_handler;
pub mod manager;
pub mod message;

pub use event_handler::RelayEventHandler;
pub use manager::{Manager, Subscription};
