//! Per-request context construction
//!
//! Every inbound request gets exactly one fresh [`RequestContext`]. The
//! builder itself cannot fail: whatever happens on the way to a verdict,
//! the request proceeds, and the only downstream signal is whether the
//! context carries an authenticated principal.

use axum::http::{HeaderMap, header};
use tracing::debug;

use common::models::{AuthContext, RequestContext};

use crate::auth_client::{AuthClient, SessionVerdict};

/// Build the context for one inbound request
///
/// Forwards the verbatim cookie header (empty string when the client
/// sent none) to the auth service and folds every negative outcome into
/// an anonymous context. The remote call is the single suspension point
/// on the request path; if the client disconnects, dropping this future
/// cancels the outstanding call.
pub async fn build_context(auth_client: &AuthClient, headers: &HeaderMap) -> RequestContext {
    let cookies = headers
        .get(header::COOKIE)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("");

    match auth_client.validate_session(cookies).await {
        SessionVerdict::Valid { user, session } => match AuthContext::new(user, session) {
            Some(auth) => RequestContext::authenticated(auth),
            // A verdict pairing a session with the wrong user is never
            // trusted, even from our own auth service.
            None => RequestContext::anonymous(),
        },
        SessionVerdict::Invalid(reason) => {
            debug!("proceeding anonymously: {reason}");
            RequestContext::anonymous()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{Json, Router, http::HeaderValue, routing::post};
    use chrono::{Duration as ChronoDuration, Utc};
    use common::contract::{VALIDATE_SESSION_PATH, ValidateSessionResponse};
    use common::models::{Session, User};
    use std::time::Duration;

    fn identity(user_id: &str, session_user_id: &str) -> (User, Session) {
        let now = Utc::now();
        let user = User {
            id: user_id.to_string(),
            name: "Test User".to_string(),
            email: format!("{user_id}@example.com"),
            email_verified: true,
            image: None,
            created_at: now,
            updated_at: now,
        };
        let session = Session {
            id: "s1".to_string(),
            token: "tok_abc".to_string(),
            expires_at: now + ChronoDuration::hours(1),
            user_id: session_user_id.to_string(),
            ip_address: None,
            user_agent: None,
            created_at: now,
            updated_at: now,
        };
        (user, session)
    }

    async fn spawn_stub(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind stub listener");
        let addr = listener.local_addr().expect("local addr");
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("serve stub");
        });
        format!("http://{addr}")
    }

    fn cookie_headers(value: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(value).expect("cookie value"),
        );
        headers
    }

    #[tokio::test]
    async fn positive_verdict_becomes_authenticated_context() {
        let app = Router::new().route(
            VALIDATE_SESSION_PATH,
            post(|| async {
                let (user, session) = identity("u1", "u1");
                Json(ValidateSessionResponse::valid(user, session))
            }),
        );
        let base = spawn_stub(app).await;
        let client = AuthClient::new(&base, Duration::from_millis(500)).expect("client");

        let context = build_context(&client, &cookie_headers("session_token=tok_abc")).await;
        let auth = context.auth.expect("authenticated context");
        assert_eq!(auth.user.id, "u1");
        assert_eq!(auth.session.user_id, "u1");
    }

    #[tokio::test]
    async fn mismatched_identity_from_auth_service_stays_anonymous() {
        let app = Router::new().route(
            VALIDATE_SESSION_PATH,
            post(|| async {
                let (user, session) = identity("u1", "u2");
                Json(ValidateSessionResponse::valid(user, session))
            }),
        );
        let base = spawn_stub(app).await;
        let client = AuthClient::new(&base, Duration::from_millis(500)).expect("client");

        let context = build_context(&client, &cookie_headers("session_token=tok_abc")).await;
        assert!(context.auth.is_none());
    }

    #[tokio::test]
    async fn unreachable_auth_service_stays_anonymous_without_panicking() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind");
        let addr = listener.local_addr().expect("local addr");
        drop(listener);

        let client =
            AuthClient::new(&format!("http://{addr}"), Duration::from_millis(200)).expect("client");
        let context = build_context(&client, &HeaderMap::new()).await;
        assert!(context.auth.is_none());
    }

    #[tokio::test]
    async fn absent_cookie_header_is_forwarded_as_empty_string() {
        let app = Router::new().route(
            VALIDATE_SESSION_PATH,
            post(
                |Json(request): Json<common::contract::ValidateSessionRequest>| async move {
                    assert_eq!(request.cookies, "");
                    (
                        axum::http::StatusCode::UNAUTHORIZED,
                        Json(ValidateSessionResponse::invalid("Invalid session")),
                    )
                },
            ),
        );
        let base = spawn_stub(app).await;
        let client = AuthClient::new(&base, Duration::from_millis(500)).expect("client");

        let context = build_context(&client, &HeaderMap::new()).await;
        assert!(context.auth.is_none());
    }
}
