//! Proactive API rate limiting.

use std::num::NonZeroU32;
use std::sync::Arc;

use governor::clock::DefaultClock;
use governor::state::{InMemoryState, NotKeyed};
use governor::{Quota, RateLimiter};

/// Type alias for the governor rate limiter.
type GovernorRateLimiter = RateLimiter<NotKeyed, InMemoryState, DefaultClock>;

/// Courteous default pacing for the GitHub issues endpoint. The engine is a
/// single sequential worker sharing one token, so one request per second
/// keeps the whole batch well inside the authenticated quota.
pub const GITHUB_DEFAULT_RPS: u32 = 1;

/// A standalone API rate limiter using the governor crate.
///
/// The fetcher calls `wait()` before every network request to avoid
/// tripping remote rate limits proactively.
///
/// # Example
///
/// ```ignore
/// use issuewatch::rate_limit::ApiRateLimiter;
///
/// let limiter = ApiRateLimiter::new(1); // 1 request per second
///
/// // Before each API call:
/// limiter.wait().await;
/// ```
#[derive(Clone)]
pub struct ApiRateLimiter {
    inner: Arc<GovernorRateLimiter>,
}

impl ApiRateLimiter {
    /// Create a new rate limiter with the specified requests per second.
    ///
    /// A zero value is clamped to one request per second.
    pub fn new(requests_per_second: u32) -> Self {
        let rps = NonZeroU32::new(requests_per_second)
            .unwrap_or_else(|| NonZeroU32::new(1).expect("1 is non-zero"));
        let rate_limiter = RateLimiter::direct(Quota::per_second(rps));

        Self {
            inner: Arc::new(rate_limiter),
        }
    }

    /// Wait until a request is allowed by the rate limiter.
    pub async fn wait(&self) {
        self.inner.until_ready().await;
    }
}
