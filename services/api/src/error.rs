//! Custom error types for the API service

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// Errors surfaced to API callers
///
/// These are the only failures the core ever shows a caller: a rejected
/// protected call, or an unresolvable procedure name. Everything that
/// goes wrong during session validation resolves to an anonymous context
/// instead of an error.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Protected procedure called without an authenticated context
    #[error("Unauthorized")]
    Unauthorized,

    /// No procedure registered under the requested name
    #[error("Not found")]
    NotFound,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::NotFound => StatusCode::NOT_FOUND,
        };

        let body = Json(json!({
            "error": self.to_string(),
        }));

        (status, body).into_response()
    }
}
