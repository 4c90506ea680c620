//! Identity and session models shared across services
//!
//! Users and sessions are owned by the auth service; the API service only
//! ever sees them as the payload of a successful validation verdict. Field
//! names serialize as camelCase because that is what travels on the wire
//! between the two services.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::warn;

/// User identity record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub name: String,
    pub email: String,
    pub email_verified: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Session entity
///
/// The `token` is the opaque credential presented by clients as a cookie.
/// Validity is authoritative at the auth service's session store and is
/// never cached elsewhere.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Session {
    pub id: String,
    pub token: String,
    pub expires_at: DateTime<Utc>,
    pub user_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Session {
    /// Whether the session has expired as of `now`
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// An authenticated principal: exactly one user paired with exactly one
/// of their sessions
///
/// The pair is only constructible when the session actually belongs to
/// the user, so downstream code never has to re-check the binding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthContext {
    pub user: User,
    pub session: Session,
}

impl AuthContext {
    /// Pair a user with a session, or `None` when the session is not
    /// bound to that user.
    pub fn new(user: User, session: Session) -> Option<Self> {
        if session.user_id != user.id {
            warn!(
                user_id = %user.id,
                session_user_id = %session.user_id,
                "session/user mismatch, refusing to build auth context"
            );
            return None;
        }
        Some(Self { user, session })
    }
}

/// Per-request context threaded through dispatch on the API service
///
/// Built fresh for every inbound request and discarded with the response.
/// `auth` is `Some` only when the auth service vouched for the request's
/// credential; its absence is the single signal downstream code inspects.
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    pub auth: Option<AuthContext>,
}

impl RequestContext {
    /// Context for an authenticated request
    pub fn authenticated(auth: AuthContext) -> Self {
        Self { auth: Some(auth) }
    }

    /// Context for an anonymous request
    pub fn anonymous() -> Self {
        Self { auth: None }
    }
}
