//! Router configuration
//!
//! Assembles the full route table:
//!
//! - `POST /api/feedback` - public submission (rate limited)
//! - `GET  /api/feedback/info` - public constraint description
//! - `GET  /api/admin/feedback` - list (gated, rate limited)
//! - `GET  /api/admin/statistics` - statistics (gated, rate limited)
//! - `PATCH /api/admin/feedback/{id}/read` - mark read (gated, rate limited)
//! - `DELETE /api/admin/feedback/{id}` - delete (gated, rate limited)
//! - `GET  /health` - liveness probe
//!
//! On the admin subtree the access gate runs before the admin rate
//! limiter, matching the layering of the public submission path where the
//! limiter is the outermost check.

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::Json,
    routing::{delete, get, patch, post},
    Router,
};
use tower_http::trace::TraceLayer;

use crate::admin;
use crate::feedback;
use crate::middleware::{admin_rate_limit, require_admin, submission_rate_limit};
use crate::server::state::AppState;

/// Request bodies larger than this are rejected before parsing.
const MAX_BODY_BYTES: usize = 10 * 1024;

/// Create the router with all routes and middleware configured.
pub fn create_router(state: AppState) -> Router {
    let admin_routes = Router::new()
        .route("/feedback", get(admin::list_feedback))
        .route("/statistics", get(admin::get_statistics))
        .route("/feedback/{id}/read", patch(admin::mark_feedback_read))
        .route("/feedback/{id}", delete(admin::delete_feedback))
        // Layers run outermost-last: the gate wraps the limiter.
        .layer(middleware::from_fn_with_state(
            state.clone(),
            admin_rate_limit,
        ))
        .layer(middleware::from_fn_with_state(state.clone(), require_admin));

    Router::new()
        .route(
            "/api/feedback",
            post(feedback::submit_feedback).layer(middleware::from_fn_with_state(
                state.clone(),
                submission_rate_limit,
            )),
        )
        .route("/api/feedback/info", get(feedback::feedback_info))
        .nest("/api/admin", admin_routes)
        .route("/health", get(health_check))
        .fallback(not_found)
        .layer(DefaultBodyLimit::max(MAX_BODY_BYTES))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Liveness probe.
async fn health_check() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "status": "ok",
        "timestamp": chrono::Utc::now().timestamp_millis(),
    }))
}

/// JSON 404 for unknown routes.
async fn not_found() -> (StatusCode, Json<serde_json::Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(serde_json::json!({
            "success": false,
            "error": "Endpoint not found",
        })),
    )
}
