//! Fixed-window rate limiting
//!
//! In-process, per-key counters over a fixed window. The only state kept
//! per caller is the counting key itself and a window timestamp; nothing
//! is persisted, and a restart resets every window. That trade is
//! intentional for an anonymous service: the limiter must not become a
//! submitter log.
//!
//! Two independent instances are installed: a tight one on public
//! submissions and a loose one on the moderation surface.

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use axum::{
    extract::{ConnectInfo, Request, State},
    middleware::Next,
    response::Response,
};

use crate::config::RateLimitSettings;
use crate::error::ApiError;
use crate::server::state::AppState;

/// Fallback key when no peer address is available.
const ANONYMOUS_KEY: &str = "anonymous";

/// Map size at which expired windows are swept out.
const PRUNE_THRESHOLD: usize = 1024;

/// One caller's window.
#[derive(Debug, Clone, Copy)]
struct Window {
    started_at: Instant,
    count: u32,
}

/// Shared fixed-window limiter.
///
/// Cloning is cheap and clones share the same counters.
#[derive(Debug, Clone)]
pub struct RateLimiter {
    windows: Arc<Mutex<HashMap<String, Window>>>,
    window: Duration,
    max_requests: u32,
    message: String,
}

impl RateLimiter {
    /// Create a limiter from its settings.
    pub fn new(settings: &RateLimitSettings) -> Self {
        Self {
            windows: Arc::new(Mutex::new(HashMap::new())),
            window: settings.window,
            max_requests: settings.max_requests,
            message: settings.message.clone(),
        }
    }

    /// Count one request against `key`.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::RateLimited`] once the key has used up its
    /// window, without touching any other component.
    pub fn try_acquire(&self, key: &str) -> Result<(), ApiError> {
        let now = Instant::now();
        let mut windows = self.windows.lock().expect("rate limiter lock");

        if windows.len() > PRUNE_THRESHOLD {
            let window = self.window;
            windows.retain(|_, w| now.duration_since(w.started_at) < window);
        }

        let entry = windows.entry(key.to_string()).or_insert(Window {
            started_at: now,
            count: 0,
        });

        if now.duration_since(entry.started_at) >= self.window {
            entry.started_at = now;
            entry.count = 0;
        }

        if entry.count >= self.max_requests {
            return Err(ApiError::RateLimited {
                message: self.message.clone(),
                retry_after_minutes: self.window.as_secs().div_ceil(60),
            });
        }

        entry.count += 1;
        Ok(())
    }
}

/// Derive the counting key for a request.
///
/// Prefers the first `X-Forwarded-For` entry (the service is expected to
/// sit behind a reverse proxy), then the peer address, then a shared
/// anonymous bucket. The key is used for counting and nothing else.
fn client_key(request: &Request) -> String {
    if let Some(forwarded) = request
        .headers()
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
    {
        if let Some(first) = forwarded.split(',').next() {
            let first = first.trim();
            if !first.is_empty() {
                return first.to_string();
            }
        }
    }

    request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|info| info.0.ip().to_string())
        .unwrap_or_else(|| ANONYMOUS_KEY.to_string())
}

/// Middleware guarding the public submission endpoint.
pub async fn submission_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&request);
    if let Err(err) = state.submission_limiter.try_acquire(&key) {
        tracing::warn!("Submission rate limit exceeded");
        return Err(err);
    }
    Ok(next.run(request).await)
}

/// Middleware guarding the moderation endpoints.
pub async fn admin_rate_limit(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let key = client_key(&request);
    if let Err(err) = state.admin_limiter.try_acquire(&key) {
        tracing::warn!("Admin rate limit exceeded");
        return Err(err);
    }
    Ok(next.run(request).await)
}
