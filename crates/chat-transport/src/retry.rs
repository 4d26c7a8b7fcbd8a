//! Retry and backoff policy

use std::time::Duration;

use rand::Rng;

/// Bounded retry budget with exponential backoff and uniform jitter
#[derive(Debug, Clone, Copy)]
pub struct RetryPolicy {
    /// Total attempts, including the first one
    pub max_attempts: u32,
    /// Upper bound on the random jitter added to each delay
    pub jitter_ms: u64,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            max_attempts: 4,
            jitter_ms: 500,
        }
    }
}

impl RetryPolicy {
    /// True when zero-based `attempt` still has retry budget after it
    pub fn can_retry(&self, attempt: u32) -> bool {
        attempt + 1 < self.max_attempts
    }

    /// `2^attempt` seconds plus jitter in `[0, jitter_ms]`
    pub fn backoff(&self, attempt: u32) -> Duration {
        let base = Duration::from_secs(1u64 << attempt.min(16));
        let jitter = Duration::from_millis(rand::thread_rng().gen_range(0..=self.jitter_ms));
        base + jitter
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backoff_grows_exponentially_within_jitter() {
        let policy = RetryPolicy::default();
        for attempt in 0..3 {
            let base = Duration::from_secs(1 << attempt);
            let delay = policy.backoff(attempt);
            assert!(delay >= base);
            assert!(delay <= base + Duration::from_millis(policy.jitter_ms));
        }
    }

    #[test]
    fn test_retry_budget_boundaries() {
        let policy = RetryPolicy::default();
        assert!(policy.can_retry(0));
        assert!(policy.can_retry(2));
        assert!(!policy.can_retry(3));
        assert!(!policy.can_retry(4));
    }
}
