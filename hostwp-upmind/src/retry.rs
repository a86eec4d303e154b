//! Retry policy for transient request failures.
//!
//! The policy is a small standalone value so attempt counting and backoff
//! can be unit-tested without the HTTP transport. The client consults
//! [`UpmindError::is_retryable`](crate::UpmindError::is_retryable) as the
//! retryable predicate.

use std::time::Duration;

/// Bounded retry with linear backoff.
///
/// `max_attempts` is the total attempt budget, first try included: a
/// policy of 3 issues at most three requests. Backoff is linear with no
/// jitter: `delay = base_delay * attempt_number` after the first failed
/// attempt, so the default waits 1 s then 2 s.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total number of attempts (>= 1).
    pub max_attempts: u32,
    /// Base delay multiplied by the attempt number.
    pub base_delay: Duration,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            base_delay: Duration::from_millis(1000),
        }
    }
}

impl RetryPolicy {
    /// Policy with an explicit attempt budget and base delay.
    #[must_use]
    pub fn new(max_attempts: u32, base_delay: Duration) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            base_delay,
        }
    }

    /// Policy with the given attempt budget and the default base delay.
    #[must_use]
    pub fn with_attempts(max_attempts: u32) -> Self {
        Self {
            max_attempts: max_attempts.max(1),
            ..Self::default()
        }
    }

    /// Whether another attempt is allowed after `attempt` (1-indexed)
    /// has failed.
    #[must_use]
    pub fn allows_retry(&self, attempt: u32) -> bool {
        attempt < self.max_attempts
    }

    /// Delay to wait after a failed `attempt` (1-indexed) before the next
    /// one. Linear: `base_delay * attempt`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay.saturating_mul(attempt.max(1))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_policy() {
        let p = RetryPolicy::default();
        assert_eq!(p.max_attempts, 3);
        assert_eq!(p.base_delay, Duration::from_millis(1000));
    }

    #[test]
    fn linear_backoff() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_after(1), Duration::from_millis(1000));
        assert_eq!(p.delay_after(2), Duration::from_millis(2000));
        assert_eq!(p.delay_after(3), Duration::from_millis(3000));
    }

    #[test]
    fn allows_retry_under_budget() {
        let p = RetryPolicy::default();
        assert!(p.allows_retry(1));
        assert!(p.allows_retry(2));
        assert!(!p.allows_retry(3));
        assert!(!p.allows_retry(4));
    }

    #[test]
    fn with_attempts_clamps_to_one() {
        let p = RetryPolicy::with_attempts(0);
        assert_eq!(p.max_attempts, 1);
        assert!(!p.allows_retry(1));
    }

    #[test]
    fn delay_after_zero_treated_as_first() {
        let p = RetryPolicy::default();
        assert_eq!(p.delay_after(0), Duration::from_millis(1000));
    }
}
