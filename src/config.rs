//! Application configuration
//!
//! All tunables live in [`AppConfig`], built once at process start and
//! threaded into the router state. Core logic never reads environment
//! variables directly; everything it needs arrives through this struct.
//!
//! # Configuration Sources
//!
//! Compiled defaults cover the content constraints, the category set, both
//! rate-limit windows and the pagination bounds. The environment supplies
//! the values that differ between deployments:
//!
//! - `SERVER_PORT` - HTTP listen port (default 3000)
//! - `DATABASE_URL` - SQLite database location (default `sqlite:feedback.db`)
//! - `ADMIN_TOKEN` - shared secret for the moderation endpoints
//! - `RUST_LOG` - tracing filter, read by the binary

use std::time::Duration;

/// Content constraints for submitted feedback.
#[derive(Debug, Clone)]
pub struct FeedbackLimits {
    /// Minimum trimmed content length in characters.
    pub min_length: usize,
    /// Maximum trimmed content length in characters.
    pub max_length: usize,
    /// Closed set of accepted category tags.
    pub categories: Vec<String>,
}

impl FeedbackLimits {
    /// True if `category` (already normalized) is on the configured list.
    pub fn is_valid_category(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    /// Comma-separated category list for error messages and the info endpoint.
    pub fn categories_joined(&self) -> String {
        self.categories.join(", ")
    }
}

impl Default for FeedbackLimits {
    fn default() -> Self {
        Self {
            min_length: 10,
            max_length: 2000,
            categories: ["general", "suggestion", "complaint", "praise", "other"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

/// Settings for one fixed-window rate limiter.
#[derive(Debug, Clone)]
pub struct RateLimitSettings {
    /// Window length.
    pub window: Duration,
    /// Accepted requests per key per window.
    pub max_requests: u32,
    /// Message returned when the ceiling is hit.
    pub message: String,
}

impl RateLimitSettings {
    /// Window length in whole minutes, rounded up. Reported as `retryAfter`.
    pub fn retry_after_minutes(&self) -> u64 {
        self.window.as_secs().div_ceil(60)
    }
}

/// Settings for the moderation surface.
#[derive(Debug, Clone)]
pub struct AdminSettings {
    /// Shared secret for the access gate. `None` means the gate denies
    /// every presented token.
    pub access_token: Option<String>,
    /// Default page size for feedback listings.
    pub items_per_page: i64,
    /// Upper bound on a requested page size.
    pub max_items_per_page: i64,
}

/// Process-wide configuration, immutable after [`AppConfig::from_env`].
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// HTTP listen port.
    pub port: u16,
    /// SQLite database URL.
    pub database_url: String,
    /// Content constraints.
    pub feedback: FeedbackLimits,
    /// Rate limit applied to public submissions.
    pub submission_rate_limit: RateLimitSettings,
    /// Rate limit applied to moderation calls.
    pub admin_rate_limit: RateLimitSettings,
    /// Moderation settings.
    pub admin: AdminSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            database_url: "sqlite:feedback.db".to_string(),
            feedback: FeedbackLimits::default(),
            submission_rate_limit: RateLimitSettings {
                window: Duration::from_secs(15 * 60),
                max_requests: 5,
                message: "Too many submissions from this location. Please try again later."
                    .to_string(),
            },
            admin_rate_limit: RateLimitSettings {
                window: Duration::from_secs(15 * 60),
                max_requests: 100,
                message: "Too many requests. Please try again later.".to_string(),
            },
            admin: AdminSettings {
                access_token: None,
                items_per_page: 50,
                max_items_per_page: 200,
            },
        }
    }
}

impl AppConfig {
    /// Build the configuration from the environment.
    ///
    /// Unset or unparsable variables fall back to the defaults above. A
    /// missing `ADMIN_TOKEN` is allowed but logged, since it makes every
    /// moderation call fail the gate.
    pub fn from_env() -> Self {
        let mut config = Self::default();

        if let Ok(port) = std::env::var("SERVER_PORT") {
            match port.parse::<u16>() {
                Ok(port) => config.port = port,
                Err(_) => tracing::warn!("Ignoring unparsable SERVER_PORT value"),
            }
        }

        if let Ok(url) = std::env::var("DATABASE_URL") {
            config.database_url = url;
        }

        match std::env::var("ADMIN_TOKEN") {
            Ok(token) if !token.is_empty() => config.admin.access_token = Some(token),
            _ => {
                tracing::warn!(
                    "ADMIN_TOKEN is not set; moderation endpoints will reject all tokens"
                );
            }
        }

        config
    }

    /// Human-readable description of the submission rate limit, used by the
    /// public info endpoint.
    pub fn rate_limit_description(&self) -> String {
        format!(
            "{} submissions per {} minutes",
            self.submission_rate_limit.max_requests,
            self.submission_rate_limit.retry_after_minutes()
        )
    }
}
