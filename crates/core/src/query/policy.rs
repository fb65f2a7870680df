use std::time::Duration;

use backon::ExponentialBuilder;

/// Timeout and retry settings for store calls.
///
/// Each attempt is bounded by `timeout`. Transient failures (throttling,
/// unavailability, timeout) are retried up to `max_retries` times with
/// jittered exponential backoff between `min_delay` and `max_delay`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub timeout: Duration,
    pub min_delay: Duration,
    pub max_delay: Duration,
    pub max_retries: usize,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(3),
            min_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(1),
            max_retries: 1,
        }
    }
}

impl RetryPolicy {
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_min_delay(mut self, min_delay: Duration) -> Self {
        self.min_delay = min_delay;
        self.max_delay = self.max_delay.max(min_delay);
        self
    }

    /// Backoff schedule for the retry loop.
    pub fn backoff(&self) -> ExponentialBuilder {
        ExponentialBuilder::default()
            .with_min_delay(self.min_delay)
            .with_max_delay(self.max_delay)
            .with_max_times(self.max_retries)
            .with_jitter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.timeout, Duration::from_secs(3));
        assert_eq!(policy.min_delay, Duration::from_millis(100));
        assert_eq!(policy.max_retries, 1);
    }

    #[test]
    fn test_with_min_delay_keeps_max_at_least_min() {
        let policy = RetryPolicy::default().with_min_delay(Duration::from_secs(5));
        assert_eq!(policy.min_delay, Duration::from_secs(5));
        assert_eq!(policy.max_delay, Duration::from_secs(5));
    }
}
