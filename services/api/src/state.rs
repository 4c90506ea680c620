//! Application state for the API service

use crate::auth_client::AuthClient;

/// State shared across handlers
///
/// The auth client is constructed once per process and injected here, so
/// per-request code never reaches for globals.
#[derive(Clone)]
pub struct AppState {
    pub auth_client: AuthClient,
}
