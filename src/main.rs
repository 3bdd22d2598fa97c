use anyhow::Context;
use tracing::{info, warn};

use advocate_directory::{app, config, logging, source};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load .env if present so cargo run picks up DATABASE_URL, APP_ENV, etc.
    let _ = dotenvy::dotenv();

    logging::init_tracing();

    // Initialize configuration (this loads the config singleton)
    let config = config::config().clone();
    info!("Starting advocate directory in {:?} mode", config.environment);

    let source = source::from_config(&config.database).context("failed to initialise record source")?;
    if config.database.url.is_none() {
        warn!("DATABASE_URL is not set; serving the built-in fixture dataset");
    }

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let state = app::AppState::new(config, source);

    let listener = tokio::net::TcpListener::bind(&bind_addr)
        .await
        .with_context(|| format!("failed to bind {}", bind_addr))?;

    info!("Advocate directory listening on http://{}", bind_addr);

    axum::serve(listener, app::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
