//! Insert retry configuration

use crate::{ConfigError, Result};
use hydrant_protocol::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

/// Retry configuration for batched inserts
///
/// Deserializable mirror of [`hydrant_protocol::RetryPolicy`].
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    /// Total attempts, first try included. Default: 3
    pub max_attempts: u32,

    /// Delay before the first retry. Default: 250ms
    #[serde(with = "humantime_serde")]
    pub initial_delay: Duration,

    /// Backoff multiplier per retry. Default: 2.0
    pub growth_factor: f64,

    /// Ceiling on any single delay. Default: 30s
    #[serde(with = "humantime_serde")]
    pub max_delay: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        let policy = RetryPolicy::default();
        Self {
            max_attempts: policy.max_attempts,
            initial_delay: policy.initial_delay,
            growth_factor: policy.growth_factor,
            max_delay: policy.max_delay,
        }
    }
}

impl RetryConfig {
    /// Convert into the policy type the inserter consumes
    pub fn to_policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            initial_delay: self.initial_delay,
            growth_factor: self.growth_factor,
            max_delay: self.max_delay,
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.max_attempts == 0 {
            return Err(ConfigError::invalid("retry", "max_attempts", "must be >= 1"));
        }
        if self.growth_factor < 1.0 {
            return Err(ConfigError::invalid(
                "retry",
                "growth_factor",
                "must be >= 1.0 so delays never shrink",
            ));
        }
        Ok(())
    }
}
