//! Bounded exponential-backoff retry policy for the vision call.
//!
//! The analysis endpoint is the single most failure-prone network call in
//! the system, so the client retries transport errors and 5xx responses a
//! configurable number of times. Jitter keeps a fleet of store devices from
//! retrying in lockstep.

use std::time::Duration;

use rand::Rng;

/// Tunable parameters for the retry strategy.
#[derive(Debug, Clone)]
pub struct RetryPolicy {
    /// Total attempts including the first; 1 disables retries.
    pub max_attempts: u32,
    /// Delay before the first retry.
    pub initial_delay: Duration,
    /// Upper bound on the delay between attempts.
    pub max_delay: Duration,
    /// Factor by which the delay grows after each failure.
    pub multiplier: f64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_delay: Duration::from_millis(500),
            max_delay: Duration::from_secs(5),
            multiplier: 2.0,
        }
    }
}

impl RetryPolicy {
    /// Policy with retries disabled (single attempt).
    pub fn none() -> Self {
        Self {
            max_attempts: 1,
            ..Self::default()
        }
    }
}

/// Calculate the next backoff delay from the current delay and policy.
///
/// The result is clamped to [`RetryPolicy::max_delay`].
pub fn next_delay(current: Duration, policy: &RetryPolicy) -> Duration {
    let next_ms = (current.as_millis() as f64 * policy.multiplier) as u64;
    Duration::from_millis(next_ms).min(policy.max_delay)
}

/// Add up to 20% random jitter on top of a delay.
pub fn with_jitter(delay: Duration) -> Duration {
    let factor = 1.0 + rand::rng().random_range(0.0..0.2);
    Duration::from_millis((delay.as_millis() as f64 * factor) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delay_doubles_until_cap() {
        let policy = RetryPolicy::default();
        let d1 = next_delay(policy.initial_delay, &policy);
        assert_eq!(d1, Duration::from_secs(1));
        let d2 = next_delay(d1, &policy);
        assert_eq!(d2, Duration::from_secs(2));
        let d3 = next_delay(Duration::from_secs(4), &policy);
        assert_eq!(d3, Duration::from_secs(5), "clamped to max_delay");
    }

    #[test]
    fn jitter_stays_within_20_percent() {
        let base = Duration::from_millis(1000);
        for _ in 0..100 {
            let jittered = with_jitter(base);
            assert!(jittered >= base);
            assert!(jittered <= Duration::from_millis(1200));
        }
    }

    #[test]
    fn none_policy_is_single_attempt() {
        assert_eq!(RetryPolicy::none().max_attempts, 1);
    }
}
