//! Shared test fixtures
//!
//! Spins up the full router against a throwaway on-disk SQLite database.
//! The store handle is exposed so tests can seed or inspect records
//! without going through the HTTP surface.

use axum_test::TestServer;
use tempfile::TempDir;

use echobox::{build_app, AppConfig, FeedbackStore};

/// Admin secret installed by [`test_config`].
pub const ADMIN_TOKEN: &str = "test-admin-token";

/// A running application over a temporary database.
pub struct TestApp {
    /// In-process HTTP client for the router.
    pub server: TestServer,
    /// Direct handle to the same store the router uses.
    pub store: FeedbackStore,
    _db_dir: TempDir,
}

impl TestApp {
    /// Spawn with the default test configuration.
    pub async fn spawn() -> Self {
        Self::spawn_with(test_config()).await
    }

    /// Spawn with a custom configuration, e.g. a short rate-limit window.
    pub async fn spawn_with(config: AppConfig) -> Self {
        let db_dir = tempfile::tempdir().expect("temp dir");
        let db_path = db_dir.path().join("feedback.db");
        let database_url = format!("sqlite://{}", db_path.display());

        let store = FeedbackStore::connect(&database_url)
            .await
            .expect("test database");

        let app = build_app(config, store.clone());
        let server = TestServer::new(app).expect("test server");

        Self {
            server,
            store,
            _db_dir: db_dir,
        }
    }
}

/// Default configuration with the admin token installed.
pub fn test_config() -> AppConfig {
    let mut config = AppConfig::default();
    config.admin.access_token = Some(ADMIN_TOKEN.to_string());
    config
}
