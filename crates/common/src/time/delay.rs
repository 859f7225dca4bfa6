//! Bounded random delays
//!
//! A [`DelayRange`] describes an inclusive `[min, max]` window. Every call to
//! [`DelayRange::sample`] draws a fresh uniformly distributed duration from
//! the window at millisecond resolution, so consecutive waits never form a
//! detectable fixed cadence.

use std::time::Duration;

use rand::Rng;
use thiserror::Error;

/// Errors raised when constructing a [`DelayRange`]
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DelayRangeError {
    /// The lower bound is greater than the upper bound
    #[error("delay range is inverted: min {min:?} > max {max:?}")]
    Inverted { min: Duration, max: Duration },
}

/// Inclusive window of durations to wait between two operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DelayRange {
    min: Duration,
    max: Duration,
}

impl DelayRange {
    /// Create a new range, rejecting inverted bounds.
    pub fn new(min: Duration, max: Duration) -> Result<Self, DelayRangeError> {
        if min > max {
            return Err(DelayRangeError::Inverted { min, max });
        }
        Ok(Self { min, max })
    }

    /// Convenience constructor from whole seconds.
    pub fn from_secs(min: u64, max: u64) -> Result<Self, DelayRangeError> {
        Self::new(Duration::from_secs(min), Duration::from_secs(max))
    }

    /// Convenience constructor from milliseconds.
    pub fn from_millis(min: u64, max: u64) -> Result<Self, DelayRangeError> {
        Self::new(Duration::from_millis(min), Duration::from_millis(max))
    }

    /// A range that always yields the same duration.
    pub fn fixed(delay: Duration) -> Self {
        Self { min: delay, max: delay }
    }

    /// A range that never waits.
    pub fn zero() -> Self {
        Self::fixed(Duration::ZERO)
    }

    /// Lower bound of the window.
    pub fn min(&self) -> Duration {
        self.min
    }

    /// Upper bound of the window.
    pub fn max(&self) -> Duration {
        self.max
    }

    /// Returns true when the window can only yield a zero duration.
    pub fn is_zero(&self) -> bool {
        self.max.is_zero()
    }

    /// Draw a duration uniformly from the window.
    pub fn sample(&self) -> Duration {
        let min_ms = duration_millis(self.min);
        let max_ms = duration_millis(self.max);
        if min_ms == max_ms {
            return self.min;
        }
        Duration::from_millis(rand::thread_rng().gen_range(min_ms..=max_ms))
    }

    /// Sleep for a sampled duration and return how long was waited.
    pub async fn sleep(&self) -> Duration {
        let delay = self.sample();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
        delay
    }
}

fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
