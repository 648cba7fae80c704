//! Admin access gate
//!
//! A single shared-secret check in front of the moderation endpoints. The
//! token arrives in the `x-admin-token` header or, as a convenience for
//! manual calls, the `token` query parameter.
//!
//! The two failure modes stay distinguishable on purpose: a missing token
//! is a 401 (likely a client bug), a wrong token is a 403 (likely an
//! actual unauthorized attempt). There are no sessions, no expiry and no
//! lockout; one static credential is the whole scheme.

use std::collections::HashMap;

use axum::{
    extract::{Query, Request, State},
    middleware::Next,
    response::Response,
};

use crate::error::ApiError;
use crate::server::state::AppState;

/// Header carrying the admin token.
const ADMIN_TOKEN_HEADER: &str = "x-admin-token";

/// Query parameter fallback for the admin token.
const ADMIN_TOKEN_PARAM: &str = "token";

/// Middleware enforcing the shared-secret check.
///
/// # Errors
///
/// * [`ApiError::MissingToken`] when neither the header nor the query
///   parameter is present
/// * [`ApiError::InvalidToken`] when a token is presented but does not
///   equal the configured secret (including when no secret is configured)
pub async fn require_admin(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let presented = presented_token(&request);

    let Some(presented) = presented else {
        tracing::warn!("Moderation call without admin token");
        return Err(ApiError::MissingToken);
    };

    let matches = state
        .config
        .admin
        .access_token
        .as_deref()
        .is_some_and(|secret| secret == presented);

    if !matches {
        tracing::warn!("Moderation call with invalid admin token");
        return Err(ApiError::InvalidToken);
    }

    Ok(next.run(request).await)
}

/// Pull the token out of the header or the query string.
fn presented_token(request: &Request) -> Option<String> {
    if let Some(token) = request
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|v| v.to_str().ok())
    {
        return Some(token.to_string());
    }

    Query::<HashMap<String, String>>::try_from_uri(request.uri())
        .ok()
        .and_then(|Query(params)| params.get(ADMIN_TOKEN_PARAM).cloned())
}
