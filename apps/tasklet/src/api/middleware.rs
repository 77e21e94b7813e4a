//! # Middleware Module
//!
//! Rate limiting middleware for the Tasklet HTTP API.
//!
//! ## Configuration
//!
//! Rate limiting is configured via environment variable:
//! - `TASKLET_RATE_LIMIT`: Requests per second (default: 100, 0 to disable)

use axum::{
    body::Body,
    extract::State,
    http::{Request, StatusCode},
    middleware::Next,
    response::Response,
};
use governor::{
    Quota, RateLimiter,
    clock::DefaultClock,
    state::{InMemoryState, NotKeyed},
};
use std::num::NonZeroU32;
use std::sync::Arc;

/// Default rate limit: 100 requests per second.
const DEFAULT_RPS: NonZeroU32 = NonZeroU32::new(100).unwrap();

// =============================================================================
// RATE LIMITER
// =============================================================================

/// Global rate limiter shared across all connections.
pub type GlobalRateLimiter = Arc<RateLimiter<NotKeyed, InMemoryState, DefaultClock>>;

/// Requests-per-second budget for the whole server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RateLimit {
    Disabled,
    PerSecond(NonZeroU32),
}

impl RateLimit {
    /// Read `TASKLET_RATE_LIMIT`. Unset or unparseable falls back to the
    /// default of 100 requests per second; an explicit `0` disables
    /// limiting.
    #[must_use]
    pub fn from_env() -> Self {
        let rps = std::env::var("TASKLET_RATE_LIMIT")
            .ok()
            .and_then(|s| s.parse::<u32>().ok());
        match rps {
            Some(0) => Self::Disabled,
            Some(n) => match NonZeroU32::new(n) {
                Some(nz) => Self::PerSecond(nz),
                None => Self::Disabled,
            },
            None => Self::PerSecond(DEFAULT_RPS),
        }
    }

    /// Build the shared limiter, or `None` when limiting is disabled.
    #[must_use]
    pub fn into_limiter(self) -> Option<GlobalRateLimiter> {
        match self {
            Self::Disabled => None,
            Self::PerSecond(rps) => {
                Some(Arc::new(RateLimiter::direct(Quota::per_second(rps))))
            }
        }
    }
}

/// Rate limiting middleware.
///
/// Checks the global rate limiter before allowing requests through.
/// Returns 429 Too Many Requests if the budget is exhausted.
pub async fn rate_limit_middleware(
    State(limiter): State<GlobalRateLimiter>,
    request: Request<Body>,
    next: Next,
) -> Result<Response, (StatusCode, &'static str)> {
    match limiter.check() {
        Ok(_) => Ok(next.run(request).await),
        Err(_) => {
            tracing::warn!("Rate limit exceeded");
            Err((StatusCode::TOO_MANY_REQUESTS, "Too Many Requests"))
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
