use crate::controller::{event_stream_controller, health_check_controller};
use axum::{routing::get, Router};
use service::AppState;

pub fn define_routes(app_state: AppState) -> Router {
    Router::new()
        .merge(health_routes())
        .merge(event_stream_routes(app_state))
}

fn health_routes() -> Router {
    Router::new().route("/health", get(health_check_controller::health_check))
}

/// Routes for the relayed event stream. No authentication; the relay is an
/// open fan-out endpoint.
fn event_stream_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/events", get(event_stream_controller::subscribe))
        .with_state(app_state)
}
