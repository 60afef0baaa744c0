use std::sync::Arc;

use anyhow::Context;
use tracing::{error, info, warn, Level};
use tracing_subscriber::{fmt, EnvFilter};

mod controllers;
mod error;
mod middleware;
mod models;
mod routers;
mod secrets;

use controllers::SongController;
use routers::create_router;
use secrets::RelayConfig;

async fn serve(config: Arc<RelayConfig>) -> anyhow::Result<()> {
    let songs = SongController::new(config.clone()).context("Failed to build HTTP client")?;
    let app = create_router(songs);

    let addr = format!("0.0.0.0:{}", config.listen_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;

    info!("🎧 PublicMusicService (PMS) starting on port {}", config.listen_port);
    info!("🎵 Netease Music API: {}", config.upstream_base_url);
    info!("🎚️ Default Level: {}", config.default_level);

    axum::serve(listener, app).await.context("Server error")?;
    Ok(())
}

#[tokio::main]
async fn main() {
    // Loaded before the subscriber so RUST_LOG can come from .env
    let dotenv = dotenvy::dotenv();

    fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(Level::INFO.into()))
        .with_target(false)
        .init();

    if let Some(message) = secrets::dotenv_warning(&dotenv) {
        warn!("{}", message);
    }

    let config = match RelayConfig::from_env() {
        Ok(config) => Arc::new(config),
        Err(e) => {
            error!("❌ {}", e);
            std::process::exit(1);
        }
    };

    if let Err(e) = serve(config).await {
        error!("❌ Failed to start server: {:#}", e);
        std::process::exit(1);
    }
}
