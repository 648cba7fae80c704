//! Moderation handlers
//!
//! The authenticated surface: paginated listing, aggregate statistics,
//! mark-read and delete. The access gate and the admin rate limiter run
//! as middleware before any of these; handlers only validate their own
//! parameters and talk to the store.
//!
//! # Routes
//!
//! - `GET /api/admin/feedback` - list with pagination
//! - `GET /api/admin/statistics` - aggregate counts
//! - `PATCH /api/admin/feedback/{id}/read` - mark one record read
//! - `DELETE /api/admin/feedback/{id}` - delete one record

use axum::{
    extract::{Path, Query, State},
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::state::AppState;
use crate::store::{FeedbackRecord, FeedbackStatistics};

/// Query parameters of the listing endpoint.
#[derive(Debug, Deserialize)]
pub struct ListFeedbackQuery {
    /// Page size; defaults to the configured page size.
    pub limit: Option<i64>,
    /// Records to skip; defaults to 0.
    pub offset: Option<i64>,
}

/// Pagination block returned with every listing.
#[derive(Debug, Serialize)]
pub struct Pagination {
    /// Total records in the store.
    pub total: i64,
    /// Applied page size.
    pub limit: i64,
    /// Applied offset.
    pub offset: i64,
    /// True if records remain past this page.
    #[serde(rename = "hasMore")]
    pub has_more: bool,
}

/// Data payload of the listing endpoint.
#[derive(Debug, Serialize)]
pub struct FeedbackPage {
    /// Records, newest first.
    pub feedback: Vec<FeedbackRecord>,
    /// Pagination details.
    pub pagination: Pagination,
}

/// Envelope with a data payload.
#[derive(Debug, Serialize)]
pub struct DataResponse<T> {
    /// Always true on this path.
    pub success: bool,
    /// Payload.
    pub data: T,
}

/// Envelope with a confirmation message only.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    /// Always true on this path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: &'static str,
}

/// Handle `GET /api/admin/feedback`.
///
/// # Errors
///
/// * `400` when `limit` is outside `[1, max_items_per_page]` or `offset`
///   is negative
/// * `500` when the store fails
pub async fn list_feedback(
    State(state): State<AppState>,
    Query(query): Query<ListFeedbackQuery>,
) -> Result<Json<DataResponse<FeedbackPage>>, ApiError> {
    let limit = query.limit.unwrap_or(state.config.admin.items_per_page);
    let offset = query.offset.unwrap_or(0);

    if limit < 1 || limit > state.config.admin.max_items_per_page {
        return Err(ApiError::invalid_parameter(format!(
            "Limit must be between 1 and {}",
            state.config.admin.max_items_per_page
        )));
    }
    if offset < 0 {
        return Err(ApiError::invalid_parameter("Offset must be non-negative"));
    }

    let feedback = state.store.list(limit, offset).await?;
    let total = state.store.count().await?;

    Ok(Json(DataResponse {
        success: true,
        data: FeedbackPage {
            feedback,
            pagination: Pagination {
                total,
                limit,
                offset,
                has_more: offset + limit < total,
            },
        },
    }))
}

/// Handle `GET /api/admin/statistics`.
pub async fn get_statistics(
    State(state): State<AppState>,
) -> Result<Json<DataResponse<FeedbackStatistics>>, ApiError> {
    let stats = state.store.statistics().await?;

    Ok(Json(DataResponse {
        success: true,
        data: stats,
    }))
}

/// Handle `PATCH /api/admin/feedback/{id}/read`.
///
/// # Errors
///
/// * `400` when the id is not positive
/// * `404` when the store reports no changed row; a record that was
///   already read is indistinguishable from a missing one here
/// * `500` when the store fails
pub async fn mark_feedback_read(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_id(id)?;

    let changed = state.store.mark_read(id).await?;
    if changed == 0 {
        return Err(ApiError::NotFound { what: "Feedback" });
    }

    tracing::info!(id, "Feedback marked as read");

    Ok(Json(MessageResponse {
        success: true,
        message: "Feedback marked as read",
    }))
}

/// Handle `DELETE /api/admin/feedback/{id}`.
///
/// # Errors
///
/// * `400` when the id is not positive
/// * `404` when no record with that id exists
/// * `500` when the store fails
pub async fn delete_feedback(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_id(id)?;

    let changed = state.store.delete(id).await?;
    if changed == 0 {
        return Err(ApiError::NotFound { what: "Feedback" });
    }

    tracing::info!(id, "Feedback deleted");

    Ok(Json(MessageResponse {
        success: true,
        message: "Feedback deleted",
    }))
}

/// Record ids are positive integers.
fn validate_id(id: i64) -> Result<(), ApiError> {
    if id < 1 {
        return Err(ApiError::invalid_parameter("Invalid feedback ID"));
    }
    Ok(())
}
