//! Retry link with exponential backoff.
//!
//! # Backoff schedule (defaults)
//!
//! | Retry | Base delay | With jitter    |
//! |-------|------------|----------------|
//! | 1     | 300ms      | 300–450ms      |
//! | 2     | 600ms      | 600–900ms      |
//! | 3     | 1200ms     | 1200–1800ms    |
//! | ...   | ...        | capped at 30s  |
//!
//! With the default cap of 3 attempts only the first two rows are used.
//! Jitter only ever lengthens a delay, so no retry starts before the
//! initial delay has elapsed.

use crate::error::{LinkError, LinkResult};
use crate::link::Link;
use crate::operation::{GraphQlResponse, Operation};
use async_trait::async_trait;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

/// Backoff and attempt limits for the retry link.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RetryPolicy {
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound for any single delay, jitter included.
    pub max_delay: Duration,
    /// Total attempts per operation, the original call included.
    pub max_attempts: u32,
    /// Whether to randomize delays.
    pub jitter: bool,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            initial_delay: Duration::from_millis(300),
            max_delay: Duration::from_millis(30_000),
            max_attempts: 3,
            jitter: true,
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries.
    pub fn disabled() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }

    /// Base delay before retry number `retry` (1-based), without jitter.
    ///
    /// Doubles per retry and saturates at `max_delay`.
    pub fn base_delay(&self, retry: u32) -> Duration {
        let exponent = retry.saturating_sub(1).min(31);
        self.initial_delay
            .checked_mul(1u32 << exponent)
            .unwrap_or(self.max_delay)
            .min(self.max_delay)
    }

    /// Delay before retry number `retry` (1-based), with jitter applied.
    pub fn delay_for(&self, retry: u32) -> Duration {
        let base = self.base_delay(retry);
        if !self.jitter || base.is_zero() {
            return base;
        }
        let spread = base / 2;
        let extra = rand::thread_rng().gen_range(Duration::ZERO..=spread);
        (base + extra).min(self.max_delay)
    }

    /// Whether another attempt is allowed after `attempts` have been made.
    pub fn allows_another(&self, attempts: u32, error: &LinkError) -> bool {
        attempts < self.max_attempts && error.is_retryable()
    }
}

/// Repeats transient transport failures of the inner link.
///
/// Attempts for one operation are strictly sequential. Application errors
/// and non-transient transport failures pass through on the first attempt.
pub struct RetryLink<L> {
    inner: L,
    policy: RetryPolicy,
}

impl<L: Link> RetryLink<L> {
    pub fn new(inner: L, policy: RetryPolicy) -> Self {
        Self { inner, policy }
    }

    pub fn policy(&self) -> &RetryPolicy {
        &self.policy
    }

    pub fn inner(&self) -> &L {
        &self.inner
    }
}

#[async_trait]
impl<L: Link> Link for RetryLink<L> {
    async fn execute(&self, operation: &Operation) -> LinkResult<GraphQlResponse> {
        let mut attempts = 0u32;
        loop {
            attempts += 1;
            let error = match self.inner.execute(operation).await {
                Ok(response) => {
                    if attempts > 1 {
                        debug!(
                            "{} succeeded after {} attempts ({})",
                            operation.name(),
                            attempts,
                            operation.id()
                        );
                    }
                    return Ok(response);
                }
                Err(error) => error,
            };

            if !self.policy.allows_another(attempts, &error) {
                return Err(error);
            }

            let delay = self.policy.delay_for(attempts);
            warn!(
                "{} attempt {}/{} failed: {}; retrying in {:?}",
                operation.name(),
                attempts,
                self.policy.max_attempts,
                error,
                delay
            );
            tokio::time::sleep(delay).await;
        }
    }
}
