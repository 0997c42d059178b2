//! Request identity resolution.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use docbox_core::Identity;

use crate::auth::cookies;
use crate::state::AppState;

/// Resolve the caller's identity from the session cookie and stash it in the
/// request extensions. Runs on every identity-aware route and never rejects;
/// enforcement belongs to the per-route extractors.
pub async fn identify(
    State(state): State<Arc<AppState>>,
    mut request: Request,
    next: Next,
) -> Response {
    let identity = match cookies::session_token(request.headers()) {
        Some(token) => state
            .sessions
            .resolve(&token)
            .await
            .unwrap_or(Identity::Anonymous),
        None => Identity::Anonymous,
    };

    request.extensions_mut().insert(identity);
    next.run(request).await
}
