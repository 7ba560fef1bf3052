//! Request middleware.
//!
//! The superuser gate protects all mutating endpoints: a bearer token is
//! compared against the configured admin token. A missing or malformed
//! header is 401; a wrong token is 403.

use crate::errors::StatsError;
use crate::routes::AppState;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use tracing::instrument;

/// Reject requests that do not carry the admin bearer token.
#[instrument(skip_all, name = "stats.middleware.require_superuser")]
pub async fn require_superuser(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Result<Response, StatsError> {
    let header = request
        .headers()
        .get(AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| StatsError::Unauthorized("Missing Authorization header".to_string()))?;

    let token = header.strip_prefix("Bearer ").ok_or_else(|| {
        StatsError::Unauthorized("Authorization header must be 'Bearer <token>'".to_string())
    })?;

    if token != state.config.admin_token {
        tracing::warn!(target: "stats.auth", "Rejected request with invalid admin token");
        return Err(StatsError::Forbidden("Superuser required".to_string()));
    }

    Ok(next.run(request).await)
}
