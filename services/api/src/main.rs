use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod auth_client;
mod config;
mod context;
mod error;
mod middleware;
mod routes;
mod state;

use crate::{auth_client::AuthClient, config::ApiConfig, state::AppState};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting API service");

    let config = ApiConfig::from_env()?;

    // One validation client per process, injected through state.
    let auth_client = AuthClient::new(&config.auth_server_url, config.validate_timeout)?;
    info!("Validating sessions against {}", config.auth_server_url);

    let app_state = AppState { auth_client };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("API service listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
