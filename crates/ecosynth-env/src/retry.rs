//! Shared retry-policy helper.
//!
//! One policy parameterizes every collaborator call that retries, instead of
//! a hand-rolled loop per data source.

use std::fmt::Display;
use std::thread;
use std::time::Duration;

use tracing::warn;

/// A bounded retry policy with fixed or multiplicative backoff delay.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Treated as at least 1.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub delay: Duration,
    /// Multiplier applied to the delay after each retry (1.0 = fixed delay).
    pub backoff: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            delay: Duration::from_millis(500),
            backoff: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Creates a fixed-delay policy.
    pub fn fixed(max_attempts: u32, delay: Duration) -> Self {
        Self {
            max_attempts,
            delay,
            backoff: 1.0,
        }
    }

    /// Creates a policy that never retries.
    pub fn none() -> Self {
        Self::fixed(1, Duration::ZERO)
    }

    /// Runs `op` until it succeeds or the attempt budget is exhausted,
    /// returning the last error. Each failed attempt is logged.
    pub fn run<T, E: Display>(
        &self,
        what: &str,
        mut op: impl FnMut() -> Result<T, E>,
    ) -> Result<T, E> {
        let max_attempts = self.max_attempts.max(1);
        let mut delay = self.delay;
        let mut attempt = 1;
        loop {
            match op() {
                Ok(value) => return Ok(value),
                Err(err) if attempt < max_attempts => {
                    warn!(attempt, max_attempts, "{} failed: {}", what, err);
                    thread::sleep(delay);
                    delay = Duration::from_secs_f64(delay.as_secs_f64() * self.backoff);
                    attempt += 1;
                }
                Err(err) => {
                    warn!(attempt, max_attempts, "{} failed, giving up: {}", what, err);
                    return Err(err);
                }
            }
        }
    }
}
