//! Public feedback intake
//!
//! Handlers for the unauthenticated surface: submitting feedback and
//! reading the constraint description. Orchestration only; the actual
//! decision logic lives in `validation` and `store`.

pub mod handlers;

pub use handlers::{feedback_info, submit_feedback};
