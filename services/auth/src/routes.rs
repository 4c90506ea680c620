//! Authentication service routes

use axum::{
    Json, Router,
    extract::{State, rejection::JsonRejection},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use chrono::Utc;
use tracing::{debug, info};

use common::contract::{VALIDATE_SESSION_PATH, ValidateSessionRequest, ValidateSessionResponse};

use crate::AppState;

/// Create the router for the authentication service
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(liveness))
        .route(VALIDATE_SESSION_PATH, post(validate_session))
        .with_state(state)
}

/// Liveness endpoint
pub async fn liveness() -> &'static str {
    "Auth Server OK"
}

/// Validate a forwarded session credential
///
/// The API service forwards the original client's cookie header in the
/// request body. The verdict is either 200 with the bound user and
/// session, or 401 with an opaque error string; the concrete rejection
/// reason is logged here, never sent to the caller.
pub async fn validate_session(
    State(state): State<AppState>,
    body: Result<Json<ValidateSessionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // A missing or malformed body counts as an absent credential.
    let cookies = match body {
        Ok(Json(request)) => request.cookies,
        Err(rejection) => {
            debug!("malformed validation request body: {rejection}");
            String::new()
        }
    };

    match state.store.resolve(&cookies, Utc::now()) {
        Ok((user, session)) => {
            info!(user_id = %user.id, session_id = %session.id, "session validated");
            (
                StatusCode::OK,
                Json(ValidateSessionResponse::valid(user, session)),
            )
        }
        Err(rejection) => {
            debug!("session validation rejected: {rejection}");
            (
                StatusCode::UNAUTHORIZED,
                Json(ValidateSessionResponse::invalid("Invalid session")),
            )
        }
    }
}
