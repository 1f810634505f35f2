//! Bounded retry with exponential backoff.
//!
//! Applied around the model call only: `ModelUnavailable` is the one
//! transient category, so validation failures and malformed output are
//! returned immediately while flaky network or rate-limit errors get a
//! couple more chances.

use crate::error::GenerationError;
use std::future::Future;
use std::time::Duration;
use tracing::warn;

/// How many extra attempts to make and how long to wait between them.
/// The delay doubles after every failed attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub max_retries: u32,
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_retries: 2,
            base_delay: Duration::from_millis(250),
        }
    }
}

impl RetryPolicy {
    /// A policy that never retries. Useful in tests and for callers that
    /// want the single-shot behavior.
    pub fn none() -> Self {
        Self {
            max_retries: 0,
            base_delay: Duration::ZERO,
        }
    }
}

/// Runs `operation`, retrying transient failures up to the policy's budget.
pub async fn retry_generation<T, F, Fut>(
    policy: &RetryPolicy,
    mut operation: F,
) -> Result<T, GenerationError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, GenerationError>>,
{
    let mut attempt: u32 = 0;
    loop {
        match operation().await {
            Ok(value) => return Ok(value),
            Err(err) if err.is_transient() && attempt < policy.max_retries => {
                let delay = policy.base_delay * 2u32.pow(attempt);
                attempt += 1;
                warn!(
                    attempt,
                    delay_ms = delay.as_millis() as u64,
                    error = %err,
                    "Transient model failure, retrying"
                );
                tokio::time::sleep(delay).await;
            }
            Err(err) => return Err(err),
        }
    }
}
