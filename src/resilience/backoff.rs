//! Bounded linear backoff for liveness polling.
//!
//! A [`BackoffBudget`] splits a total wait ceiling into fixed poll intervals.
//! The last segment is shortened so the sum of all segments equals the
//! ceiling exactly.

use std::future::Future;
use std::time::Duration;

use thiserror::Error;

/// Error building a [`BackoffBudget`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BudgetError {
    #[error("poll interval must be greater than zero")]
    ZeroInterval,
}

/// Total wait ceiling and fixed poll interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BackoffBudget {
    wait: Duration,
    interval: Duration,
}

impl BackoffBudget {
    /// Create a budget. A zero `wait` is allowed and yields no segments.
    pub fn new(wait: Duration, interval: Duration) -> Result<Self, BudgetError> {
        if interval.is_zero() {
            return Err(BudgetError::ZeroInterval);
        }
        Ok(Self { wait, interval })
    }

    /// Create a budget from whole seconds.
    pub fn from_secs(wait_secs: u64, interval_secs: u64) -> Result<Self, BudgetError> {
        Self::new(Duration::from_secs(wait_secs), Duration::from_secs(interval_secs))
    }

    pub fn wait(&self) -> Duration {
        self.wait
    }

    pub fn interval(&self) -> Duration {
        self.interval
    }

    /// Iterate over the sleep segments of this budget.
    pub fn segments(&self) -> Segments {
        Segments {
            budget: *self,
            elapsed: Duration::ZERO,
        }
    }
}

/// Sleep segments of a [`BackoffBudget`], each `min(interval, wait - elapsed)`.
#[derive(Debug, Clone)]
pub struct Segments {
    budget: BackoffBudget,
    elapsed: Duration,
}

impl Segments {
    /// Total of the segments handed out so far.
    pub fn elapsed(&self) -> Duration {
        self.elapsed
    }
}

impl Iterator for Segments {
    type Item = Duration;

    fn next(&mut self) -> Option<Duration> {
        if self.elapsed >= self.budget.wait {
            return None;
        }
        let step = self.budget.interval.min(self.budget.wait - self.elapsed);
        self.elapsed += step;
        Some(step)
    }
}

/// Something that can pause the calling task.
pub trait Sleeper: Send + Sync {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send;
}

/// Sleeps on the Tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

impl Sleeper for TokioSleeper {
    fn sleep(&self, duration: Duration) -> impl Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }
}
