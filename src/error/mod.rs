//! API error types
//!
//! One crate-level error enum covers every failure a handler can surface.
//! The split mirrors the rest of the tree:
//!
//! - **`types`** - the [`ApiError`] enum and status-code mapping
//! - **`conversion`** - `IntoResponse` so handlers can `?` straight out
//!
//! Every error renders as the JSON envelope
//! `{"success": false, "error": <message>}` with the mapped status code.
//! Storage failures are the one class whose detail stays out of the
//! response body; the cause goes to the log instead.

/// Error type definitions
pub mod types;

/// Error conversion implementations
pub mod conversion;

pub use types::ApiError;
