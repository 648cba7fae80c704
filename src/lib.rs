//! Echobox - anonymous feedback service
//!
//! A small HTTP service that accepts anonymous text feedback and exposes a
//! token-guarded moderation surface over it. Submissions pass through a
//! validation pipeline (length bounds, HTML escaping, category
//! normalization, spam and profanity heuristics) before landing in a
//! single SQLite table; moderators can list, inspect statistics, mark
//! read and delete.
//!
//! # Module Structure
//!
//! - **`config`** - process-wide configuration, loaded once at startup
//! - **`error`** - the API error taxonomy and its HTTP mapping
//! - **`validation`** - the content validation pipeline
//! - **`store`** - SQLite persistence for feedback records
//! - **`middleware`** - access gate and rate limiting
//! - **`server`** - application state and assembly
//! - **`routes`** - router construction
//! - **`feedback`** - public submission handlers
//! - **`admin`** - authenticated moderation handlers
//!
//! # Anonymity
//!
//! The service stores nothing about a submitter. The rate limiter keys on
//! the caller's address in process memory only, and no request metadata
//! reaches the database.

/// Process-wide configuration
pub mod config;

/// API error types
pub mod error;

/// Content validation pipeline
pub mod validation;

/// Feedback persistence
pub mod store;

/// Access gate and rate limiting
pub mod middleware;

/// Application state and assembly
pub mod server;

/// Router construction
pub mod routes;

/// Public submission handlers
pub mod feedback;

/// Moderation handlers
pub mod admin;

pub use config::AppConfig;
pub use error::ApiError;
pub use server::{build_app, create_app, AppState};
pub use store::FeedbackStore;
