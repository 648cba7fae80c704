//! Error conversion
//!
//! `IntoResponse` for [`ApiError`], so handlers can return
//! `Result<_, ApiError>` and bubble failures with `?`.
//!
//! # Response Format
//!
//! ```json
//! { "success": false, "error": "Feedback must be at least 10 characters" }
//! ```
//!
//! Rate-limit responses additionally carry `retryAfter` in minutes. A
//! storage failure logs its cause at error level and renders the generic
//! message only; callers never see driver details.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};

use crate::error::types::ApiError;

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();

        if let ApiError::Storage(cause) = &self {
            tracing::error!("Storage error: {:?}", cause);
        }

        let body = match &self {
            ApiError::RateLimited {
                retry_after_minutes,
                ..
            } => serde_json::json!({
                "success": false,
                "error": self.to_string(),
                "retryAfter": retry_after_minutes,
            }),
            _ => serde_json::json!({
                "success": false,
                "error": self.to_string(),
            }),
        };

        (status, Json(body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::ValidationError;
    use axum::body::to_bytes;

    async fn body_json(response: Response) -> serde_json::Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_validation_error_response() {
        let err: ApiError = ValidationError::MissingContent.into();
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "Content is required");
        assert!(body.get("retryAfter").is_none());
    }

    #[tokio::test]
    async fn test_rate_limited_response_carries_retry_after() {
        let err = ApiError::RateLimited {
            message: "Too many submissions from this location. Please try again later."
                .to_string(),
            retry_after_minutes: 15,
        };
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::TOO_MANY_REQUESTS);

        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["retryAfter"], 15);
    }

    #[tokio::test]
    async fn test_storage_error_hides_cause() {
        let err = ApiError::Storage(sqlx::Error::PoolClosed);
        let response = err.into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = body_json(response).await;
        assert_eq!(body["error"], "Internal server error");
    }
}
