//! Waymark server binary.

use tokio::net::TcpListener;
use tracing::{error, info};

use waymark::config::Config;
use waymark::server::{build_router, serve};
use waymark::storage::init_storage;
use waymark::utils::bootstrap::init_tracing;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let config = Config::load(None).map_err(|e| {
        error!("Failed to load configuration: {}", e);
        e
    })?;

    info!("Starting waymark server");

    let store = init_storage(&config.storage).await?;
    info!("Storage initialized");

    let router = build_router(store, &config.server);

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;

    serve(listener, router).await
}
