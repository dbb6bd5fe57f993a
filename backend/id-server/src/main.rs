use id_server::{AppState, ServerError, build_router, logger, signing};

use id_cache::CacheSettings;
use id_config::Config;

use std::error::Error;

use log::{error, info};
use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    // Load and validate configuration
    let config = Config::load()?;
    config.validate()?;

    // Initialize logger (before any other logging)
    logger::initialize(
        config.logging.level,
        config.log_file_path()?,
        config.logging.colored,
    )?;

    info!("Starting id-server v{}", env!("CARGO_PKG_VERSION"));
    config.log_summary();

    let database_path = config.database_path()?;
    info!("Connecting to database: {}", database_path.display());
    let pool = id_db::connect(&database_path)
        .await
        .map_err(ServerError::from)?;
    info!("Database ready");

    let issuer = signing::issuer_from_config(&config)?;

    let cache = CacheSettings {
        capacity: config.cache.capacity,
        shards: config.cache.shards,
        ttl: config.cache_ttl(),
        eviction_percentage: config.cache.eviction_percentage,
    };

    let app_state = AppState::new(pool.clone(), cache, issuer, config.handler.timeout());
    let app = build_router(app_state);

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr).await?;
    info!("Server listening on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    pool.close().await;
    info!("Graceful shutdown complete");

    Ok(())
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => info!("Received SIGINT (Ctrl+C), initiating graceful shutdown"),
        Err(e) => {
            error!("Failed to listen for SIGINT: {}", e);
            std::future::pending::<()>().await;
        }
    }
}
