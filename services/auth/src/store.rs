//! In-memory session store
//!
//! The store owns all session state for the system. Lookups are read-only:
//! resolving a credential never mutates a session and never issues a new
//! one, so validation can be retried safely for the same credential.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::debug;

use common::models::{Session, User};

/// Why a credential failed to resolve to a live session
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionRejection {
    /// The request carried no session cookie at all
    #[error("missing session credential")]
    MissingCredential,

    /// The presented token is not known to the store
    #[error("unknown session token")]
    NotFound,

    /// The session exists but its expiry has passed
    #[error("session expired")]
    Expired,
}

#[derive(Debug, Clone)]
struct SessionRecord {
    user: User,
    session: Session,
}

/// Session store keyed by the opaque session token
///
/// Cloning is cheap; all clones share the same underlying map.
#[derive(Clone)]
pub struct SessionStore {
    cookie_name: String,
    inner: Arc<RwLock<HashMap<String, SessionRecord>>>,
}

impl SessionStore {
    /// Create an empty store resolving the given session cookie name
    pub fn new(cookie_name: impl Into<String>) -> Self {
        Self {
            cookie_name: cookie_name.into(),
            inner: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Register a session for a user
    ///
    /// Session issuance (login/signup) happens elsewhere; this is the
    /// seam through which issued sessions reach the store.
    pub fn insert(&self, user: User, session: Session) {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        sessions.insert(session.token.clone(), SessionRecord { user, session });
    }

    /// Remove a session by token, returning whether it was present
    pub fn remove(&self, token: &str) -> bool {
        let mut sessions = self.inner.write().expect("session store lock poisoned");
        sessions.remove(token).is_some()
    }

    /// Resolve a forwarded cookie header to the user and session bound to
    /// the presented token
    ///
    /// Read-only and idempotent: expired sessions are reported, not
    /// evicted, and nothing about the session is touched on the way out.
    pub fn resolve(
        &self,
        cookie_header: &str,
        now: DateTime<Utc>,
    ) -> Result<(User, Session), SessionRejection> {
        let token = extract_cookie(cookie_header, &self.cookie_name)
            .ok_or(SessionRejection::MissingCredential)?;

        let sessions = self.inner.read().expect("session store lock poisoned");
        let record = sessions.get(token).ok_or(SessionRejection::NotFound)?;

        if record.session.is_expired(now) {
            debug!(session_id = %record.session.id, "rejecting expired session");
            return Err(SessionRejection::Expired);
        }

        Ok((record.user.clone(), record.session.clone()))
    }
}

/// Find the value of `name` in a `;`-separated cookie header
fn extract_cookie<'a>(header: &'a str, name: &str) -> Option<&'a str> {
    header.split(';').find_map(|pair| {
        let (key, value) = pair.split_once('=')?;
        (key.trim() == name).then(|| value.trim())
    })
}
