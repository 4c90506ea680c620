//! Client for the auth service's session-validation endpoint
//!
//! The verdict is an explicit result type rather than an error: every
//! negative outcome, including transport failure, comes back as
//! [`SessionVerdict::Invalid`], so callers are forced to handle the
//! anonymous case and can never end up authenticated by accident.

use std::time::Duration;

use anyhow::Result;
use reqwest::StatusCode;
use thiserror::Error;
use tracing::{debug, error};

use common::contract::{VALIDATE_SESSION_PATH, ValidateSessionRequest, ValidateSessionResponse};
use common::models::{Session, User};

/// Outcome of one validation round trip
#[derive(Debug, Clone)]
pub enum SessionVerdict {
    /// The auth service vouched for the credential
    Valid { user: User, session: Session },
    /// Anything else; the request proceeds anonymously
    Invalid(InvalidReason),
}

/// Why a validation attempt did not produce an authenticated principal
#[derive(Error, Debug, Clone)]
pub enum InvalidReason {
    /// 401 verdict from the auth service
    #[error("rejected by auth service: {0}")]
    Rejected(String),

    /// Status code outside the wire contract
    #[error("unexpected status {0} from auth service")]
    UnexpectedStatus(u16),

    /// Response body did not match the contract
    #[error("malformed validation response: {0}")]
    MalformedResponse(String),

    /// Network failure or timeout reaching the auth service
    #[error("auth service transport failure: {0}")]
    Transport(String),
}

/// Shared HTTP client for the validation endpoint
///
/// Built once per process with the round-trip timeout baked in, then
/// cloned cheaply into per-request state.
#[derive(Clone)]
pub struct AuthClient {
    http: reqwest::Client,
    validate_url: String,
}

impl AuthClient {
    /// Create a client for the auth service at `base_url`
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let validate_url = format!(
            "{}{}",
            base_url.trim_end_matches('/'),
            VALIDATE_SESSION_PATH
        );
        Ok(Self { http, validate_url })
    }

    /// Ask the auth service whether `cookies` identifies a live session
    ///
    /// Never returns an error; anything that prevents a positive verdict
    /// is folded into `Invalid`. Transport failures are logged here since
    /// they are the one reason operators need to see.
    pub async fn validate_session(&self, cookies: &str) -> SessionVerdict {
        let request = ValidateSessionRequest {
            cookies: cookies.to_string(),
        };

        let response = match self.http.post(&self.validate_url).json(&request).send().await {
            Ok(response) => response,
            Err(e) => {
                error!("session validation transport failure: {e}");
                return SessionVerdict::Invalid(InvalidReason::Transport(e.to_string()));
            }
        };

        match response.status() {
            StatusCode::OK => match response.json::<ValidateSessionResponse>().await {
                Ok(ValidateSessionResponse {
                    valid: true,
                    user: Some(user),
                    session: Some(session),
                    ..
                }) => SessionVerdict::Valid { user, session },
                Ok(_) => SessionVerdict::Invalid(InvalidReason::MalformedResponse(
                    "200 verdict without user and session".to_string(),
                )),
                Err(e) => SessionVerdict::Invalid(InvalidReason::MalformedResponse(e.to_string())),
            },
            StatusCode::UNAUTHORIZED => {
                let reason = response
                    .json::<ValidateSessionResponse>()
                    .await
                    .ok()
                    .and_then(|body| body.error)
                    .unwrap_or_else(|| "Invalid session".to_string());
                debug!("session validation rejected: {reason}");
                SessionVerdict::Invalid(InvalidReason::Rejected(reason))
            }
            other => SessionVerdict::Invalid(InvalidReason::UnexpectedStatus(other.as_u16())),
        }
    }
}
