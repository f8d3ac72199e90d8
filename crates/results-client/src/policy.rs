//! Retry budget and wait schedule.

use std::time::Duration;

use rand::Rng;

use crate::outcome::FailureReason;

/// A fixed delay plus up to `jitter` of uniform random extra.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct JitteredDelay {
    pub base: Duration,
    pub jitter: Duration,
}

impl JitteredDelay {
    pub const fn new(base: Duration, jitter: Duration) -> Self {
        Self { base, jitter }
    }

    /// Delay for a jitter fraction in `[0, 1]`.
    pub fn at(&self, fraction: f64) -> Duration {
        self.base + self.jitter.mul_f64(fraction.clamp(0.0, 1.0))
    }
}

/// How many attempts to make and how long to wait between them.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RetryPolicy {
    /// Total attempts, including the first. Never below 1.
    pub max_attempts: u32,
    /// Upper bound on a single attempt, connect to last body byte.
    pub timeout_per_attempt: Duration,
    /// Ceiling for the exponential backoff.
    pub backoff_cap: Duration,
    /// Minimum wait after a 429.
    pub rate_limited: JitteredDelay,
    /// Minimum wait after a 503.
    pub unavailable: JitteredDelay,
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::interactive()
    }
}

impl RetryPolicy {
    /// For chat users waiting on a reply: few attempts, short backoff ceiling.
    pub fn interactive() -> Self {
        Self {
            max_attempts: 3,
            timeout_per_attempt: Duration::from_secs(30),
            backoff_cap: Duration::from_secs(10),
            rate_limited: JitteredDelay::new(Duration::from_secs(10), Duration::from_secs(2)),
            unavailable: JitteredDelay::new(Duration::from_secs(3), Duration::from_secs(2)),
        }
    }

    /// For one-shot command line lookups: more attempts, longer waits.
    pub fn batch() -> Self {
        Self {
            max_attempts: 5,
            timeout_per_attempt: Duration::from_secs(30),
            backoff_cap: Duration::from_secs(30),
            rate_limited: JitteredDelay::new(Duration::from_secs(10), Duration::from_secs(5)),
            unavailable: JitteredDelay::new(Duration::from_secs(5), Duration::from_secs(3)),
        }
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout_per_attempt = timeout;
        self
    }

    /// Exponential backoff before 1-based `attempt`: `min(2^(attempt-1) + jitter, cap)` seconds,
    /// zero for the first attempt. `jitter` is clamped to `[0, 1]` seconds.
    pub fn backoff(&self, attempt: u32, jitter: f64) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let exponent = (attempt - 1).min(62) as i32;
        let secs = 2f64.powi(exponent) + jitter.clamp(0.0, 1.0);
        Duration::from_secs_f64(secs.min(self.backoff_cap.as_secs_f64()))
    }

    /// Status-specific minimum wait after `failure`, if it has one.
    pub fn status_delay(&self, failure: &FailureReason, jitter: f64) -> Option<Duration> {
        match failure {
            FailureReason::RateLimited => Some(self.rate_limited.at(jitter)),
            FailureReason::ServiceUnavailable => Some(self.unavailable.at(jitter)),
            _ => None,
        }
    }

    /// Wait before `attempt`, given how the previous attempt failed: the larger of the backoff
    /// and the status-specific delay. The two are not added; a 429 on attempt 2 waits about 10 s,
    /// not 10 s plus the 2 s backoff.
    pub fn delay_before<R: Rng + ?Sized>(
        &self,
        attempt: u32,
        previous: Option<&FailureReason>,
        rng: &mut R,
    ) -> Duration {
        if attempt <= 1 {
            return Duration::ZERO;
        }
        let backoff = self.backoff(attempt, rng.gen::<f64>());
        match previous.and_then(|f| self.status_delay(f, rng.gen::<f64>())) {
            Some(status) => status.max(backoff),
            None => backoff,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn test_no_wait_before_first_attempt() {
        let policy = RetryPolicy::batch();
        let mut rng = StdRng::seed_from_u64(7);
        assert_eq!(policy.backoff(1, 1.0), Duration::ZERO);
        assert_eq!(
            policy.delay_before(1, Some(&FailureReason::RateLimited), &mut rng),
            Duration::ZERO
        );
    }

    #[test]
    fn test_backoff_schedule() {
        let policy = RetryPolicy::batch();
        assert_eq!(policy.backoff(2, 0.0), Duration::from_secs(2));
        assert_eq!(policy.backoff(3, 0.0), Duration::from_secs(4));
        assert_eq!(policy.backoff(4, 0.5), Duration::from_secs_f64(8.5));
        assert_eq!(policy.backoff(5, 0.0), Duration::from_secs(16));
    }

    #[test]
    fn test_backoff_is_capped_and_non_decreasing() {
        for policy in [RetryPolicy::interactive(), RetryPolicy::batch()] {
            let mut previous = Duration::ZERO;
            for attempt in 1..=100 {
                let mid = policy.backoff(attempt, 0.5);
                assert!(mid >= previous, "attempt {attempt} decreased");
                assert!(mid <= policy.backoff_cap);
                assert!(policy.backoff(attempt, 1.0) <= policy.backoff_cap);
                previous = mid;
            }
        }
    }

    #[test]
    fn test_interactive_cap() {
        let policy = RetryPolicy::interactive();
        assert_eq!(policy.backoff(5, 0.0), Duration::from_secs(10));
    }

    #[test]
    fn test_rate_limited_wait_is_at_least_base() {
        let policy = RetryPolicy::interactive();
        let mut rng = StdRng::seed_from_u64(42);
        for attempt in 2..=3 {
            let wait = policy.delay_before(attempt, Some(&FailureReason::RateLimited), &mut rng);
            assert!(wait >= policy.rate_limited.base);
            assert!(wait <= policy.rate_limited.base + policy.rate_limited.jitter);
        }
    }

    #[test]
    fn test_unavailable_wait_never_below_backoff() {
        let policy = RetryPolicy::batch();
        let mut rng = StdRng::seed_from_u64(3);
        let wait = policy.delay_before(4, Some(&FailureReason::ServiceUnavailable), &mut rng);
        assert!(wait >= Duration::from_secs(8));
    }

    #[test]
    fn test_status_delay_and_backoff_are_not_summed() {
        let policy = RetryPolicy::interactive();
        let mut rng = StdRng::seed_from_u64(9);
        for attempt in 2..=3 {
            let wait = policy.delay_before(attempt, Some(&FailureReason::RateLimited), &mut rng);
            // Sum would be at least 10 s + 2^(attempt-1) s.
            assert!(wait <= policy.rate_limited.base + policy.rate_limited.jitter);
        }
    }

    #[test]
    fn test_other_failures_use_backoff_only() {
        let policy = RetryPolicy::interactive();
        let mut rng = StdRng::seed_from_u64(1);
        let wait = policy.delay_before(2, Some(&FailureReason::Timeout), &mut rng);
        assert!(wait >= Duration::from_secs(2) && wait <= Duration::from_secs(3));
    }

    #[test]
    fn test_with_max_attempts_never_zero() {
        assert_eq!(RetryPolicy::interactive().with_max_attempts(0).max_attempts, 1);
        assert_eq!(RetryPolicy::interactive().with_max_attempts(7).max_attempts, 7);
    }

    #[test]
    fn test_jittered_delay_bounds() {
        let d = JitteredDelay::new(Duration::from_secs(10), Duration::from_secs(4));
        assert_eq!(d.at(0.0), Duration::from_secs(10));
        assert_eq!(d.at(1.0), Duration::from_secs(14));
        assert_eq!(d.at(7.0), Duration::from_secs(14));
    }
}
