//! Allowlist middleware for mutating requests.
//!
//! Only POST requests are gated; read-only requests pass through
//! untouched. This asymmetry is deliberate and narrow: the allowlist
//! protects state-changing admin operations, it is not an authentication
//! layer for the status surface.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::extract::{ConnectInfo, Request, State};
use axum::http::{Method, StatusCode};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};
use tracing::warn;

use crate::gateway::AppState;

/// Reject POSTs from clients outside the configured allowlist.
pub async fn restrict_mutations(
    State(state): State<Arc<AppState>>,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
    request: Request,
    next: Next,
) -> Response {
    if request.method() == Method::POST && !state.allowlist.is_allowed(Some(addr.ip())) {
        warn!(client = %addr.ip(), path = %request.uri().path(), "denied mutating request");
        return (StatusCode::FORBIDDEN, "Access denied").into_response();
    }
    next.run(request).await
}
