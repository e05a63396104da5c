//! Outbound request pacing.
//!
//! Nominatim's usage policy caps clients at one request per second and
//! rejects bursts, so the pacing delay is a correctness requirement rather
//! than an optimisation. Share one limiter instance across every client of
//! the same collaborator.

use std::thread;
use std::time::Duration;

use crate::traits::RateLimiter;

/// Sleeps a fixed delay before every paced call.
#[derive(Debug, Clone)]
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// The Nominatim ceiling: one request per second.
    pub fn one_per_second() -> Self {
        Self::new(Duration::from_secs(1))
    }
}

impl RateLimiter for FixedDelay {
    fn pace(&self) {
        thread::sleep(self.delay);
    }
}

/// No pacing. For tests and self-hosted collaborators without rate limits.
#[derive(Debug, Clone, Copy)]
pub struct NoDelay;

impl RateLimiter for NoDelay {
    fn pace(&self) {}
}
