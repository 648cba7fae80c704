//! Moderation surface
//!
//! Authenticated handlers for reviewing, marking and deleting feedback.
//! Access control and rate limiting sit in `middleware`; this module is
//! the query/mutation layer over the store.

pub mod handlers;

pub use handlers::{delete_feedback, get_statistics, list_feedback, mark_feedback_read};
