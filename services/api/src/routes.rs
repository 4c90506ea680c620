//! API service routes
//!
//! The procedure registry: public procedures are callable with any
//! context, protected procedures are the same handlers composed with the
//! authorization gate. Registration is static; the gate runs per request.

use axum::{Extension, Json, Router, middleware, response::IntoResponse, routing::get};
use chrono::Utc;
use serde_json::json;

use common::models::AuthContext;

use crate::{
    error::ApiError,
    middleware::{context_middleware, require_auth},
    state::AppState,
};

/// Create the router for the API service
pub fn create_router(state: AppState) -> Router {
    let protected_routes = Router::new()
        .route("/rpc/me", get(me))
        .route("/rpc/private-data", get(private_data))
        .route_layer(middleware::from_fn(require_auth));

    Router::new()
        .route("/", get(liveness))
        .route("/rpc/health-check", get(health_check))
        .merge(protected_routes)
        .fallback(unknown_procedure)
        .layer(middleware::from_fn_with_state(
            state.clone(),
            context_middleware,
        ))
        .with_state(state)
}

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    "API Server OK"
}

/// Public health-check procedure
pub async fn health_check() -> &'static str {
    "All systems GO!"
}

/// Identity of the authenticated caller
pub async fn me(Extension(auth): Extension<AuthContext>) -> impl IntoResponse {
    Json(json!({
        "userId": auth.user.id,
        "sessionId": auth.session.id,
    }))
}

/// Example protected procedure
pub async fn private_data(Extension(auth): Extension<AuthContext>) -> impl IntoResponse {
    Json(json!({
        "message": "This is private data from API server",
        "user": auth.user,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

/// Dispatch rejection for unregistered procedure names
pub async fn unknown_procedure() -> ApiError {
    ApiError::NotFound
}
