//! Server assembly
//!
//! - **`state`** - [`state::AppState`] and `FromRef` implementations
//! - **`init`** - store connection and app construction

/// Application state management
pub mod state;

/// Server initialization
pub mod init;

pub use init::{build_app, create_app};
pub use state::AppState;
