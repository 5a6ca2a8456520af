// Receipt Points - Web Server
// POST /receipts/process, GET /receipts/:id/points

use anyhow::{Context, Result};
use receipt_points::api::{router, AppState};
use receipt_points::ServerConfig;
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Log level comes from `RUST_LOG`, defaulting to info with debug for this crate.
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,receipt_points=debug,tower_http=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = ServerConfig::load().context("Failed to load configuration")?;
    info!(
        bind_addr = %config.bind_addr,
        max_body_bytes = config.max_body_bytes,
        version = receipt_points::VERSION,
        "Configuration loaded"
    );

    let app = router(AppState::default(), config.max_body_bytes);

    let listener = tokio::net::TcpListener::bind(config.bind_addr)
        .await
        .with_context(|| format!("Failed to bind to {}", config.bind_addr))?;

    info!("Server running on http://{}", config.bind_addr);

    axum::serve(listener, app)
        .await
        .context("Server terminated")?;

    Ok(())
}
