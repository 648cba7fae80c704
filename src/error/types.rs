//! API error definitions
//!
//! [`ApiError`] is the full failure taxonomy of the service: validation
//! rejections, rate limiting, the two access-gate outcomes, parameter
//! errors, missing records and storage failures. Handlers return it
//! directly and the conversion module maps it onto HTTP.

use axum::http::StatusCode;
use thiserror::Error;

use crate::validation::ValidationError;

/// Everything that can go wrong while serving a request.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Submission failed validation. Always a client error; carries the
    /// specific reason from the validator.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The caller exceeded a rate-limit window.
    #[error("{message}")]
    RateLimited {
        /// Message configured for the tripped limiter.
        message: String,
        /// Minutes until a fresh window opens.
        retry_after_minutes: u64,
    },

    /// No admin token was presented.
    #[error("Authentication required")]
    MissingToken,

    /// An admin token was presented but does not match the secret.
    #[error("Invalid authentication token")]
    InvalidToken,

    /// A query or path parameter was out of range.
    #[error("{message}")]
    InvalidParameter {
        /// Human-readable description of the bad parameter.
        message: String,
    },

    /// The addressed record does not exist (or, for mark-read, was already
    /// read; the store cannot tell the two apart).
    #[error("{what} not found")]
    NotFound {
        /// What was being looked up.
        what: &'static str,
    },

    /// The persistence layer failed. Details are logged, never returned.
    #[error("Internal server error")]
    Storage(#[from] sqlx::Error),
}

impl ApiError {
    /// Convenience constructor for parameter errors.
    pub fn invalid_parameter(message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            message: message.into(),
        }
    }

    /// The HTTP status this error maps to.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::RateLimited { .. } => StatusCode::TOO_MANY_REQUESTS,
            Self::MissingToken => StatusCode::UNAUTHORIZED,
            Self::InvalidToken => StatusCode::FORBIDDEN,
            Self::InvalidParameter { .. } => StatusCode::BAD_REQUEST,
            Self::NotFound { .. } => StatusCode::NOT_FOUND,
            Self::Storage(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}
