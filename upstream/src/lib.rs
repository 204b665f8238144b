//! Upstream connector for the SSE relay.
//!
//! Consumes the single upstream event stream and hands every received event
//! to the `events` publisher. The connector owns the process-wide upstream
//! connection state; no other component opens upstream connections.
//!
//! # Modules
//!
//! - `connector`: the supervised connect/stream/backoff state machine
//! - `error`: layered error type wrapping `eventsource-client` failures

pub mod connector;
pub mod error;

pub use connector::{ConnectionState, Connector};
