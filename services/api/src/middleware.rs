//! Request context and authorization middleware
//!
//! Two layers cooperate here. `context_middleware` runs for every route
//! and attaches the per-request [`RequestContext`]. `require_auth` is the
//! authorization gate composed onto protected routes only: it rejects
//! before the handler runs, or narrows the context so the handler can
//! take the authenticated principal as a plain `Extension<AuthContext>`
//! with no null-checks of its own.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};

use common::models::RequestContext;

use crate::{context::build_context, error::ApiError, state::AppState};

/// Build and attach the request context
///
/// Applied to the whole router, so every handler (and the gate) sees
/// exactly one context, built fresh for this request and dropped with
/// the response.
pub async fn context_middleware(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let context = build_context(&state.auth_client, req.headers()).await;
    req.extensions_mut().insert(context);
    next.run(req).await
}

/// Authorization gate for protected routes
///
/// Anonymous contexts are rejected with `Unauthorized` before the inner
/// handler is ever invoked. A request that somehow reaches the gate
/// without a context at all is rejected the same way.
pub async fn require_auth(mut req: Request, next: Next) -> Result<Response, ApiError> {
    let auth = req
        .extensions()
        .get::<RequestContext>()
        .and_then(|context| context.auth.clone())
        .ok_or(ApiError::Unauthorized)?;

    // Narrowed context for the handler: presence is now guaranteed.
    req.extensions_mut().insert(auth);

    Ok(next.run(req).await)
}
