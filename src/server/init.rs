//! Server initialization
//!
//! Builds the application from its parts:
//!
//! 1. Connect the feedback store (creating the database and schema on
//!    first run)
//! 2. Assemble [`AppState`] with the validator and rate limiters
//! 3. Hand the state to the router
//!
//! Unlike the rest of the startup path, a storage failure here is fatal;
//! there is no degraded mode without the database.

use axum::Router;

use crate::config::AppConfig;
use crate::routes::create_router;
use crate::server::state::AppState;
use crate::store::FeedbackStore;

/// Create the configured application router.
///
/// # Errors
///
/// Fails if the database cannot be opened or the schema cannot be
/// prepared.
pub async fn create_app(config: AppConfig) -> Result<Router, sqlx::Error> {
    tracing::info!("Connecting to database at {}", config.database_url);
    let store = FeedbackStore::connect(&config.database_url).await?;
    tracing::info!("Database ready");

    Ok(build_app(config, store))
}

/// Build the router from configuration and an already-connected store.
///
/// Split out so tests can supply their own store.
pub fn build_app(config: AppConfig, store: FeedbackStore) -> Router {
    let state = AppState::new(config, store);
    create_router(state)
}
