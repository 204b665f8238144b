//! HTTP layer for the SSE relay.
//!
//! Exposes the relayed event stream (`GET /events`) and a liveness check
//! (`GET /health`). The heavy lifting lives elsewhere: the `sse` crate owns
//! the subscriber set and fan-out, the `upstream` crate owns the upstream
//! connection. This crate only adapts hub frames onto client sockets.

use axum::http::{HeaderValue, Method};
use log::*;
use service::AppState;
use tower_http::cors::CorsLayer;

pub(crate) mod controller;
pub mod router;

/// Bind the configured interface and serve the router until the process
/// exits. Subscriber connections are torn down with the server; no
/// per-connection shutdown signaling is needed.
pub async fn init_server(app_state: AppState) -> std::io::Result<()> {
    let interface = app_state
        .config
        .interface
        .clone()
        .unwrap_or_else(|| "127.0.0.1".to_string());
    let listen_addr = format!("{}:{}", interface, app_state.config.port);

    let allowed_origins: Vec<HeaderValue> = app_state
        .config
        .allowed_origins
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();
    let cors = CorsLayer::new()
        .allow_methods([Method::GET])
        .allow_origin(allowed_origins);

    let routes = router::define_routes(app_state).layer(cors);

    info!("Server starting... listening for incoming connections on http://{listen_addr}");

    let listener = tokio::net::TcpListener::bind(&listen_addr).await?;
    axum::serve(listener, routes).await
}
