//! Gateway binary: load configuration, wire up the router, serve.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn};

use rcon_gateway::gateway::{self, AppState};
use rcon_gateway::utils::logging;
use rcon_gateway::GatewayConfig;

#[tokio::main]
async fn main() -> std::io::Result<()> {
    logging::init();

    let config = GatewayConfig::from_env();
    for issue in config.rcon.validate() {
        warn!(%issue, "configuration issue");
    }
    if config.rcon.password.is_empty() {
        warn!(
            "RCON password is not set; this is likely to cause problems. \
             Set the RCON_PASSWORD environment variable."
        );
    }

    let addr = config.bind_addr();
    let state = Arc::new(AppState::new(config));
    let app = gateway::router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!(%addr, "gateway listening");

    // ConnectInfo carries the peer address into the allowlist middleware.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await
}

async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("received CTRL+C, shutting down");
    }
}
