use anyhow::Result;
use tracing::{Level, info};
use tracing_subscriber::FmtSubscriber;

mod config;
mod routes;
mod store;

use crate::{config::AuthConfig, store::SessionStore};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub store: SessionStore,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    let subscriber = FmtSubscriber::builder()
        .with_max_level(Level::INFO)
        .finish();

    tracing::subscriber::set_global_default(subscriber).expect("setting default subscriber failed");

    info!("Starting authentication service");

    let config = AuthConfig::from_env()?;

    // Sessions are issued by the login/signup flows, which feed this
    // store; the service starts empty.
    let store = SessionStore::new(config.cookie_name.clone());

    let app_state = AppState { store };

    // Start the web server
    let app = routes::create_router(app_state);

    let listener = tokio::net::TcpListener::bind(("0.0.0.0", config.port)).await?;
    info!("Authentication service listening on 0.0.0.0:{}", config.port);

    axum::serve(listener, app).await?;

    Ok(())
}
