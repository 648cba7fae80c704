//! Public feedback handlers
//!
//! The anonymous side of the API: one endpoint that accepts a submission
//! and one that describes the constraints. The rate limiter has already
//! run by the time `submit_feedback` executes, so the pipeline here is
//! validate, then persist, in that order. A validation failure leaves no
//! trace anywhere.
//!
//! Nothing about the submitter is read, logged or stored; the response
//! says so explicitly.

use axum::{
    extract::State,
    http::StatusCode,
    response::Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::server::state::AppState;

/// Wording returned with every accepted submission.
const ANONYMITY_GUARANTEE: &str = "No identifying information was collected or stored";

/// Body of `POST /api/feedback`.
///
/// Both fields are optional at the type level so that a missing field
/// reaches the validator and produces its specific error instead of a
/// generic deserialization failure.
#[derive(Debug, Deserialize)]
pub struct SubmitFeedbackRequest {
    /// Raw feedback text.
    pub content: Option<String>,
    /// Raw category tag.
    pub category: Option<String>,
}

/// Payload of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmittedFeedback {
    /// Assigned record id.
    pub id: i64,
    /// Creation time in epoch milliseconds.
    pub timestamp: i64,
    /// Restates the anonymity promise to the submitter.
    #[serde(rename = "anonymityGuarantee")]
    pub anonymity_guarantee: &'static str,
}

/// Envelope of a successful submission.
#[derive(Debug, Serialize)]
pub struct SubmitFeedbackResponse {
    /// Always true on this path.
    pub success: bool,
    /// Human-readable confirmation.
    pub message: &'static str,
    /// Submission details.
    pub data: SubmittedFeedback,
}

/// Handle `POST /api/feedback`.
///
/// Runs the validator over the raw input and persists the sanitized
/// outcome.
///
/// # Errors
///
/// * `400` with the specific reason when validation rejects the input
/// * `500` when the store fails
pub async fn submit_feedback(
    State(state): State<AppState>,
    Json(request): Json<SubmitFeedbackRequest>,
) -> Result<(StatusCode, Json<SubmitFeedbackResponse>), ApiError> {
    let validated = state
        .validator
        .validate(request.content.as_deref(), request.category.as_deref())?;

    if validated.has_profanity {
        tracing::debug!("Profanity filtered from a submission");
    }

    let created = state
        .store
        .create(&validated.content, &validated.category)
        .await?;

    tracing::info!(
        id = created.id,
        category = %validated.category,
        "Feedback submitted"
    );

    Ok((
        StatusCode::CREATED,
        Json(SubmitFeedbackResponse {
            success: true,
            message: "Your feedback has been submitted anonymously",
            data: SubmittedFeedback {
                id: created.id,
                timestamp: created.created_at,
                anonymity_guarantee: ANONYMITY_GUARANTEE,
            },
        }),
    ))
}

/// Handle `GET /api/feedback/info`.
///
/// Static description of the submission constraints; reads no state.
pub async fn feedback_info(State(state): State<AppState>) -> Json<serde_json::Value> {
    let config = &state.config;

    Json(serde_json::json!({
        "success": true,
        "data": {
            "anonymityGuarantees": [
                "No authentication required",
                "No IP addresses logged",
                "No browser fingerprinting",
                "No cookies or tracking",
                "Content is sanitized for security",
            ],
            "constraints": {
                "minLength": config.feedback.min_length,
                "maxLength": config.feedback.max_length,
                "rateLimit": config.rate_limit_description(),
            },
            "categories": config.feedback.categories,
        }
    }))
}
