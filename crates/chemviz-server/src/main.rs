//! ChemViz Server - Main entry point

use anyhow::Result;
use chemviz_common::logging::{init_logging, LogConfig};
use chemviz_core::{DatasetService, DatasetStore};
use std::{net::SocketAddr, time::Duration};
use tracing::info;

use chemviz_server::{
    api::{self, AppState},
    config::Config,
    shutdown,
};

#[tokio::main]
async fn main() -> Result<()> {
    // Pick up LOG_* from .env before logging starts
    dotenvy::dotenv().ok();

    // Initialize logging with configuration from environment
    let log_config = LogConfig::builder()
        .log_file_prefix("chemviz-server".to_string())
        .filter_directives(
            "chemviz_server=debug,chemviz_core=debug,tower_http=debug,sqlx=warn".to_string(),
        )
        .build();

    // Environment variables take precedence
    let log_config = log_config.merge_env()?;

    let _log_guard = init_logging(&log_config)?;

    info!("Starting ChemViz Server");

    let config = Config::load()?;
    info!(
        "Configuration loaded - server will bind to {}:{}",
        config.server.host, config.server.port
    );

    let store_config = config.store_config();
    let store = DatasetStore::open(&store_config).await?;
    info!(
        data_dir = %config.storage.data_dir.display(),
        retention = store.retention(),
        "Dataset store ready"
    );

    let state = AppState {
        service: DatasetService::new(store),
    };
    let app = api::create_router(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    info!("Server listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;

    shutdown::serve_until(
        listener,
        app,
        shutdown::shutdown_signal(),
        Duration::from_secs(config.server.shutdown_timeout_secs),
    )
    .await?;

    info!("Server shut down gracefully");

    Ok(())
}
