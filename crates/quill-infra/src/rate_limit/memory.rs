//! In-memory rate limiter using governor crate.

use std::num::NonZeroU32;
use std::time::Duration;

use async_trait::async_trait;
use governor::clock::{Clock, DefaultClock};
use governor::{DefaultKeyedRateLimiter, Quota};

use quill_core::ports::{RateLimitError, RateLimitResult, RateLimiter};

/// In-memory rate limiter configuration.
#[derive(Debug, Clone)]
pub struct RateLimitConfig {
    /// Maximum requests per window and key.
    pub max_requests: u32,
    /// Window duration.
    pub window: Duration,
}

impl Default for RateLimitConfig {
    fn default() -> Self {
        Self {
            max_requests: 10,
            window: Duration::from_secs(60),
        }
    }
}

impl RateLimitConfig {
    /// Read `LOGIN_RATE_LIMIT_MAX` and `LOGIN_RATE_LIMIT_WINDOW_SECS`.
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            max_requests: std::env::var("LOGIN_RATE_LIMIT_MAX")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.max_requests),
            window: std::env::var("LOGIN_RATE_LIMIT_WINDOW_SECS")
                .ok()
                .and_then(|s| s.parse().ok())
                .map(Duration::from_secs)
                .unwrap_or(defaults.window),
        }
    }
}

/// Keyed in-memory rate limiter using the GCRA algorithm.
///
/// Limits are per-process, not shared across instances.
pub struct InMemoryRateLimiter {
    limiter: DefaultKeyedRateLimiter<String>,
    clock: DefaultClock,
}

impl InMemoryRateLimiter {
    pub fn new(config: RateLimitConfig) -> Self {
        let burst = NonZeroU32::new(config.max_requests).unwrap_or(NonZeroU32::MIN);
        let period = (config.window / burst.get()).max(Duration::from_nanos(1));
        let quota = Quota::with_period(period)
            .unwrap_or_else(|| Quota::per_second(burst))
            .allow_burst(burst);

        Self {
            limiter: DefaultKeyedRateLimiter::keyed(quota),
            clock: DefaultClock::default(),
        }
    }

    pub fn from_env() -> Self {
        Self::new(RateLimitConfig::from_env())
    }
}

#[async_trait]
impl RateLimiter for InMemoryRateLimiter {
    async fn check(&self, key: &str) -> Result<RateLimitResult, RateLimitError> {
        match self.limiter.check_key(&key.to_string()) {
            Ok(()) => Ok(RateLimitResult {
                allowed: true,
                reset_after: Duration::ZERO,
            }),
            Err(not_until) => Ok(RateLimitResult {
                allowed: false,
                reset_after: not_until.wait_time_from(self.clock.now()),
            }),
        }
    }
}
