use std::sync::Arc;

use anyhow::Context;
use holz_delivery_server::{
    clock::UtcClock,
    config::Config,
    db::{SqlitePieceStore, init_db_pool},
    handlers::{AppState, router},
    services::{HeaderIdentityProvider, PageRenderer},
};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::from_env().context("failed to read configuration")?;

    let pool = init_db_pool(&config.database_url, config.max_pool_size)
        .await
        .context("failed to open piece database")?;

    let state = AppState {
        store: Arc::new(SqlitePieceStore::new(pool)),
        identity: Arc::new(HeaderIdentityProvider::new(&config.identity_header)?),
        renderer: Arc::new(PageRenderer::new(&config.template_dir)),
        clock: Arc::new(UtcClock),
        piece_group: config.piece_group.clone(),
    };

    let addr = config.server_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("failed to bind {}", addr))?;

    tracing::info!(
        "Starting delivery piece server on {} (group {})",
        addr,
        config.piece_group
    );

    axum::serve(listener, router(state)).await?;

    Ok(())
}
