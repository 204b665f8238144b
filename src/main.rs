use events::EventPublisher;
use log::{error, info};
use service::{config::Config, logging::Logger, AppState};
use sse::{Manager, RelayEventHandler};
use std::sync::Arc;
use upstream::Connector;

#[tokio::main]
async fn main() {
    let config = Config::new();
    Logger::init_logger(&config);

    info!("Relaying events from upstream [{}]", config.upstream_url());

    let sse_manager = Arc::new(Manager::new());

    let publisher = EventPublisher::new()
        .with_handler(Arc::new(RelayEventHandler::new(Arc::clone(&sse_manager))));

    let connector = match Connector::new(
        config.upstream_url(),
        config.upstream_reconnect_backoff(),
        publisher,
    ) {
        Ok(connector) => Arc::new(connector),
        Err(e) => {
            error!("Failed to build upstream connector: {e}");
            std::process::exit(1);
        }
    };
    connector.start();

    let app_state = AppState::new(config, &sse_manager);

    if let Err(e) = web::init_server(app_state).await {
        error!("Server error: {e}");
        std::process::exit(1);
    }
}
