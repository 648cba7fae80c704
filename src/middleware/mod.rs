//! Request middleware
//!
//! Middleware that runs before a handler sees the request:
//!
//! - **`auth`** - the shared-secret access gate for moderation routes
//! - **`rate_limit`** - fixed-window limiters for submissions and admin
//!   calls
//!
//! On an admin route the gate runs first, then the admin limiter, so an
//! unauthenticated caller cannot burn the window.

pub mod auth;
pub mod rate_limit;

pub use auth::require_admin;
pub use rate_limit::{admin_rate_limit, submission_rate_limit, RateLimiter};
