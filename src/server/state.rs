//! Application state
//!
//! [`AppState`] is the central container threaded through the router. It
//! holds the store handle, the compiled validator, the immutable
//! configuration and the two rate limiters. Everything inside is cheap to
//! clone and safe for concurrent use; the store owns a connection pool and
//! the limiters share their counters across clones.
//!
//! `FromRef` implementations let handlers extract just the piece they
//! need instead of the whole state.

use std::sync::Arc;

use axum::extract::FromRef;

use crate::config::AppConfig;
use crate::middleware::RateLimiter;
use crate::store::FeedbackStore;
use crate::validation::ContentValidator;

/// Shared state for all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// Immutable configuration, loaded once at startup.
    pub config: Arc<AppConfig>,
    /// Feedback persistence.
    pub store: FeedbackStore,
    /// Compiled content validator.
    pub validator: Arc<ContentValidator>,
    /// Limiter for public submissions.
    pub submission_limiter: RateLimiter,
    /// Limiter for moderation calls.
    pub admin_limiter: RateLimiter,
}

impl AppState {
    /// Assemble state from configuration and a connected store.
    pub fn new(config: AppConfig, store: FeedbackStore) -> Self {
        let validator = ContentValidator::new(config.feedback.clone());
        let submission_limiter = RateLimiter::new(&config.submission_rate_limit);
        let admin_limiter = RateLimiter::new(&config.admin_rate_limit);

        Self {
            config: Arc::new(config),
            store,
            validator: Arc::new(validator),
            submission_limiter,
            admin_limiter,
        }
    }
}

impl FromRef<AppState> for FeedbackStore {
    fn from_ref(state: &AppState) -> Self {
        state.store.clone()
    }
}

impl FromRef<AppState> for Arc<AppConfig> {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}

impl FromRef<AppState> for Arc<ContentValidator> {
    fn from_ref(state: &AppState) -> Self {
        state.validator.clone()
    }
}
