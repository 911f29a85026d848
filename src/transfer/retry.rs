use std::{fmt::Display, future::Future, time::Duration};

use backon::{ExponentialBuilder, Retryable};

use crate::warning;

/// Bounded exponential backoff for remote writes.
///
/// With the defaults an operation is tried 10 times, waiting 5, 10, 20, ...
/// 1280 seconds between attempts. There is no wait after the last attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RetryPolicy {
    pub max_attempts: usize,
    pub initial_delay: Duration,
    pub multiplier: f32,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 10,
            initial_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    pub fn new(max_attempts: usize, initial_delay: Duration, multiplier: f32) -> Self {
        Self {
            max_attempts,
            initial_delay,
            multiplier,
        }
    }

    /// Sum of the waits before the last attempt.
    pub fn total_delay(&self) -> Duration {
        (0..self.retries())
            .map(|n| self.delay_before_retry(n))
            .sum()
    }

    fn retries(&self) -> usize {
        self.max_attempts.max(1) - 1
    }

    fn delay_before_retry(&self, retry: usize) -> Duration {
        self.initial_delay
            .mul_f64(f64::from(self.multiplier).powi(retry as i32))
    }

    fn backoff(&self) -> ExponentialBuilder {
        let longest = self.delay_before_retry(self.retries().saturating_sub(1));
        ExponentialBuilder::default()
            .with_min_delay(self.initial_delay)
            .with_max_delay(longest.max(self.initial_delay))
            .with_factor(self.multiplier)
            .with_max_times(self.retries())
    }

    /// Runs `op` until it succeeds or the attempts are exhausted; every error
    /// is retried. The last error is returned on exhaustion.
    pub async fn run<T, E, F, Fut>(&self, label: &str, op: F) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
    {
        self.run_when(label, op, |_: &E| true).await
    }

    /// Like [`RetryPolicy::run`], but an error for which `is_retryable`
    /// returns false is returned at once.
    pub async fn run_when<T, E, F, Fut, P>(
        &self,
        label: &str,
        op: F,
        is_retryable: P,
    ) -> Result<T, E>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, E>>,
        E: Display,
        P: FnMut(&E) -> bool,
    {
        op.retry(self.backoff())
            .sleep(tokio::time::sleep)
            .when(is_retryable)
            .notify(|err: &E, delay: Duration| {
                warning!(
                    "(Retrying {}) {} in {} seconds",
                    label,
                    err,
                    delay.as_secs_f64()
                );
            })
            .await
    }
}
