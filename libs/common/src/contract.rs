//! Wire contract for the session-validation endpoint
//!
//! The API service forwards the inbound request's cookie header to the
//! auth service as request content rather than as a proxied header; the
//! two services sit on different origins, so carrying the credential in
//! the body keeps it free of header-name and cookie-domain constraints.
//!
//! Contract:
//! - `POST /api/validate-session` with `{ "cookies": "<verbatim header>" }`
//! - `200 { "valid": true, "user": ..., "session": ... }` on success
//! - `401 { "valid": false, "error": "..." }` on rejection
//!
//! No other status code is part of the contract; callers treat anything
//! else as a failed validation.

use serde::{Deserialize, Serialize};

use crate::models::{Session, User};

/// Path of the validation endpoint on the auth service
pub const VALIDATE_SESSION_PATH: &str = "/api/validate-session";

/// Request body carrying the forwarded credential
///
/// `cookies` is the verbatim cookie header of the original client
/// request, or the empty string when the client sent none.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSessionRequest {
    pub cookies: String,
}

/// Validation verdict as it appears on the wire
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidateSessionResponse {
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user: Option<User>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session: Option<Session>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ValidateSessionResponse {
    /// Successful verdict carrying the bound user and session
    pub fn valid(user: User, session: Session) -> Self {
        Self {
            valid: true,
            user: Some(user),
            session: Some(session),
            error: None,
        }
    }

    /// Negative verdict with an opaque reason string
    pub fn invalid(error: impl Into<String>) -> Self {
        Self {
            valid: false,
            user: None,
            session: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Session, User};
    use chrono::{Duration, Utc};

    #[test]
    fn invalid_verdict_has_no_identity_fields() {
        let response = ValidateSessionResponse::invalid("Invalid session");
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["valid"], false);
        assert_eq!(value["error"], "Invalid session");
        assert!(value.get("user").is_none());
        assert!(value.get("session").is_none());
    }

    #[test]
    fn valid_verdict_carries_user_and_session() {
        let now = Utc::now();
        let user = User {
            id: "u1".to_string(),
            name: "Test".to_string(),
            email: "u1@example.com".to_string(),
            email_verified: true,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let session = Session {
            id: "s1".to_string(),
            token: "tok_abc".to_string(),
            expires_at: now + Duration::hours(1),
            user_id: "u1".to_string(),
            ip_address: None,
            user_agent: None,
            created_at: now,
            updated_at: now,
        };

        let response = ValidateSessionResponse::valid(user, session);
        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["valid"], true);
        assert_eq!(value["user"]["id"], "u1");
        assert_eq!(value["session"]["userId"], "u1");
        assert!(value.get("error").is_none());
    }
}
