use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;

use chart_services::{app, config::Config, logging, AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    logging::init_logging()?;

    // Load configuration
    let config = Config::new()?;
    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));

    // Build our application state and router
    let state = Arc::new(AppState::new(config));
    let app = app(state);

    // Run it
    tracing::info!("listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
