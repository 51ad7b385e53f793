//! Retry policy for batched inserts
//!
//! Exponential backoff with a hard attempt bound. The policy is data, not
//! behavior: the inserter owns the loop, this type only answers "how long
//! before attempt N".

use std::time::Duration;

/// Default maximum attempts (first try included)
pub const DEFAULT_MAX_ATTEMPTS: u32 = 3;

/// Default delay before the first retry
pub const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(250);

/// Default backoff multiplier per attempt
pub const DEFAULT_GROWTH_FACTOR: f64 = 2.0;

/// Default ceiling on a single backoff delay
pub const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(30);

/// Backoff schedule for transient insert failures
///
/// Invariants: `max_attempts >= 1`, `growth_factor >= 1.0`, so the delay
/// sequence is monotonically non-decreasing.
#[derive(Debug, Clone, PartialEq)]
pub struct RetryPolicy {
    /// Total attempts, first try included
    pub max_attempts: u32,

    /// Delay before the first retry
    pub initial_delay: Duration,

    /// Multiplier applied per retry (exponential)
    pub growth_factor: f64,

    /// Ceiling on any single delay
    pub max_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            initial_delay: DEFAULT_INITIAL_DELAY,
            growth_factor: DEFAULT_GROWTH_FACTOR,
            max_delay: DEFAULT_MAX_DELAY,
        }
    }
}

impl RetryPolicy {
    /// Delay to wait before retry number `retry` (1-based).
    ///
    /// `initial_delay * growth_factor^(retry-1)`, clamped to `max_delay`.
    /// The exponent is capped so pathological configs cannot overflow.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let exp = retry.saturating_sub(1).min(32);
        let factor = self.growth_factor.max(1.0).powi(exp as i32);
        let delay = self.initial_delay.mul_f64(factor);
        delay.min(self.max_delay)
    }

    /// Attempt count with the `>= 1` invariant enforced
    pub fn attempts(&self) -> u32 {
        self.max_attempts.max(1)
    }
}
