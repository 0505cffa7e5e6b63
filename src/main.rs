//! Lending Desk Server
//!
//! Serves the in-memory lending service over a REST API.

use std::net::SocketAddr;

use lending_desk::{api, config::AppConfig, logging, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    // Load configuration
    let config = AppConfig::load()?;

    // Initialize tracing
    logging::init(&config.logging);

    tracing::info!("Starting Lending Desk v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        "Loan duration {} days, up to {} renewals",
        config.loans.duration_days,
        config.loans.max_renews
    );

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);

    // Create application state and router
    let state = AppState::new(config);
    let app = api::create_router(state);

    tracing::info!("Server listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
