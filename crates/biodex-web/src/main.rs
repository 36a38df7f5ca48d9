//! Biodex Web Server
//!
//! Run with: cargo run -p biodex-web

use anyhow::Context;
use biodex_config::Config;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    info!("Starting Biodex web server...");

    let config = Config::load().context("loading configuration")?;
    let addr = config.bind_addr();

    let state = biodex_web::state::AppState::new(config)?;
    let app = biodex_web::router::build_router(state);

    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!("Server listening on http://{}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}
