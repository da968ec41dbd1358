//! Retry policy types and configuration.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use crate::fault::Error;
use crate::retry::error::PolicyError;

/// Called before each retry with the zero-based attempt number, the delay
/// about to be waited and the error that triggered the retry.
pub type RetryCallback = Arc<dyn Fn(u32, Duration, &Error) + Send + Sync>;

/// Decides whether an error is worth retrying.
pub type RetryPredicate = Arc<dyn Fn(&Error) -> bool + Send + Sync>;

/// Computes extra delay from the attempt number and the base delay.
pub type JitterFn = Arc<dyn Fn(u32, Duration) -> Duration + Send + Sync>;

/// A retry policy describing how to retry failed tasks.
///
/// Policies are plain values. The retry engine reads them and never mutates
/// them, so one policy can be cloned and shared between any number of
/// retries.
///
/// The delay before retry `n` (zero-based) is
/// `initial_interval * backoff_rate^n`, plus any [`Jitter`].
///
/// # Examples
///
/// ```rust
/// use taskchain::RetryPolicy;
/// use std::time::Duration;
///
/// let policy = RetryPolicy::new()
///     .with_max_retries(5)
///     .with_initial_interval(Duration::from_millis(100))
///     .with_backoff_rate(2.0);
///
/// assert_eq!(policy.max_retries(), 5);
/// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
/// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
/// ```
#[derive(Clone)]
pub struct RetryPolicy {
    max_retries: u32,
    initial_interval: Duration,
    backoff_rate: f64,
    on_retry: RetryCallback,
    should_retry: RetryPredicate,
    jitter: Jitter,
}

/// Extra delay added on top of the exponential backoff.
///
/// Jitter is always added, never subtracted.
#[derive(Clone, Default)]
pub enum Jitter {
    /// No jitter applied.
    #[default]
    None,
    /// A caller-supplied function of the attempt number and base delay.
    Custom(JitterFn),
    /// Add a random delay between zero and `factor` times the base delay.
    #[cfg(feature = "jitter")]
    Proportional(f64),
    /// Add a random delay between zero and the given bound.
    #[cfg(feature = "jitter")]
    UpTo(Duration),
}

impl RetryPolicy {
    /// The default policy: 3 attempts, 1 second initial interval, doubling,
    /// retrying every error, no callback and no jitter.
    pub fn new() -> Self {
        Self {
            max_retries: 3,
            initial_interval: Duration::from_secs(1),
            backoff_rate: 2.0,
            on_retry: Arc::new(|_, _, _| {}),
            should_retry: Arc::new(|_| true),
            jitter: Jitter::None,
        }
    }

    /// Set the number of attempts allowed before giving up.
    pub fn with_max_retries(mut self, n: u32) -> Self {
        self.max_retries = n;
        self
    }

    /// Set the delay before the first retry.
    pub fn with_initial_interval(mut self, interval: Duration) -> Self {
        self.initial_interval = interval;
        self
    }

    /// Set the multiplier applied to the delay after each failure.
    pub fn with_backoff_rate(mut self, rate: f64) -> Self {
        self.backoff_rate = rate;
        self
    }

    /// Set the callback invoked before each retry.
    ///
    /// The callback runs synchronously on the retrying task and should not
    /// block; use it for logging or metrics.
    ///
    /// ```rust
    /// use taskchain::RetryPolicy;
    ///
    /// let policy = RetryPolicy::new().with_on_retry(|attempt, delay, error| {
    ///     eprintln!("retry {attempt} in {delay:?}: {error}");
    /// });
    /// ```
    pub fn with_on_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(u32, Duration, &Error) + Send + Sync + 'static,
    {
        self.on_retry = Arc::new(f);
        self
    }

    /// Set the predicate deciding which errors are retried.
    ///
    /// Errors it rejects are returned as they are, without being wrapped in
    /// [`RetryExhausted`](crate::RetryExhausted).
    pub fn with_should_retry<F>(mut self, f: F) -> Self
    where
        F: Fn(&Error) -> bool + Send + Sync + 'static,
    {
        self.should_retry = Arc::new(f);
        self
    }

    /// Set the jitter strategy.
    pub fn with_jitter(mut self, jitter: Jitter) -> Self {
        self.jitter = jitter;
        self
    }

    /// Get the number of attempts allowed.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Get the delay before the first retry.
    pub fn initial_interval(&self) -> Duration {
        self.initial_interval
    }

    /// Get the backoff multiplier.
    pub fn backoff_rate(&self) -> f64 {
        self.backoff_rate
    }

    /// Get the jitter strategy.
    pub fn jitter(&self) -> &Jitter {
        &self.jitter
    }

    /// Whether `error` should be retried.
    pub fn should_retry(&self, error: &Error) -> bool {
        (self.should_retry)(error)
    }

    /// Invoke the retry callback.
    pub fn notify_retry(&self, attempt: u32, delay: Duration, error: &Error) {
        (self.on_retry)(attempt, delay, error)
    }

    /// Calculate the delay before retry `attempt` (zero-based), without
    /// jitter.
    ///
    /// Computed in floating point and saturated to [`Duration::MAX`].
    ///
    /// # Examples
    ///
    /// ```rust
    /// use taskchain::RetryPolicy;
    /// use std::time::Duration;
    ///
    /// let policy = RetryPolicy::new()
    ///     .with_initial_interval(Duration::from_millis(10))
    ///     .with_backoff_rate(2.0);
    ///
    /// assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(10));
    /// assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(20));
    /// assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(40));
    /// ```
    pub fn delay_for_attempt(&self, attempt: u32) -> Duration {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let nanos = self.initial_interval.as_nanos() as f64 * self.backoff_rate.powi(exponent);
        saturating_duration(nanos)
    }

    /// Calculate the delay with jitter applied.
    pub fn delay_with_jitter(&self, attempt: u32) -> Duration {
        let base = self.delay_for_attempt(attempt);
        base.saturating_add(self.jitter.extra(attempt, base))
    }

    /// Check that the policy produces sensible delays.
    ///
    /// The backoff rate must be finite and at least 1.0.
    pub fn validate(&self) -> Result<(), PolicyError> {
        if !self.backoff_rate.is_finite() {
            Err(PolicyError::NonFiniteBackoffRate(self.backoff_rate))
        } else if self.backoff_rate < 1.0 {
            Err(PolicyError::BackoffRateBelowOne(self.backoff_rate))
        } else {
            Ok(())
        }
    }
}

impl Default for RetryPolicy {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for RetryPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryPolicy")
            .field("max_retries", &self.max_retries)
            .field("initial_interval", &self.initial_interval)
            .field("backoff_rate", &self.backoff_rate)
            .field("on_retry", &"<function>")
            .field("should_retry", &"<function>")
            .field("jitter", &self.jitter)
            .finish()
    }
}

impl Jitter {
    /// Jitter computed by `f` from the attempt number and base delay.
    pub fn custom<F>(f: F) -> Self
    where
        F: Fn(u32, Duration) -> Duration + Send + Sync + 'static,
    {
        Jitter::Custom(Arc::new(f))
    }

    /// The extra delay to add for `attempt` on top of `base_delay`.
    pub fn extra(&self, attempt: u32, base_delay: Duration) -> Duration {
        match self {
            Jitter::None => Duration::ZERO,
            Jitter::Custom(f) => f(attempt, base_delay),
            #[cfg(feature = "jitter")]
            Jitter::Proportional(factor) => {
                use rand::Rng;
                let max_nanos = base_delay.as_nanos() as f64 * factor;
                if max_nanos.is_nan() || max_nanos <= 0.0 {
                    return Duration::ZERO;
                }
                let max_nanos = max_nanos.min(f64::MAX);
                saturating_duration(rand::rng().random_range(0.0..=max_nanos))
            }
            #[cfg(feature = "jitter")]
            Jitter::UpTo(max) => {
                use rand::Rng;
                let max_nanos = u64::try_from(max.as_nanos()).unwrap_or(u64::MAX);
                Duration::from_nanos(rand::rng().random_range(0..=max_nanos))
            }
        }
    }
}

impl fmt::Debug for Jitter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Jitter::None => f.write_str("None"),
            Jitter::Custom(_) => f.debug_tuple("Custom").field(&"<function>").finish(),
            #[cfg(feature = "jitter")]
            Jitter::Proportional(factor) => f.debug_tuple("Proportional").field(factor).finish(),
            #[cfg(feature = "jitter")]
            Jitter::UpTo(max) => f.debug_tuple("UpTo").field(max).finish(),
        }
    }
}

/// Convert nanoseconds to a `Duration`, clamping negatives and NaN to zero
/// and overflow to `Duration::MAX`.
fn saturating_duration(nanos: f64) -> Duration {
    if nanos.is_nan() || nanos <= 0.0 {
        Duration::ZERO
    } else if nanos < u64::MAX as f64 {
        Duration::from_nanos(nanos.round() as u64)
    } else {
        Duration::try_from_secs_f64(nanos / 1e9).unwrap_or(Duration::MAX)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_default_policy() {
        let policy = RetryPolicy::default();
        assert_eq!(policy.max_retries(), 3);
        assert_eq!(policy.initial_interval(), Duration::from_secs(1));
        assert_eq!(policy.backoff_rate(), 2.0);
        assert!(policy.should_retry(&anyhow!("anything")));
        assert!(matches!(policy.jitter(), Jitter::None));
    }

    #[test]
    fn test_exponential_delay() {
        let policy = RetryPolicy::new()
            .with_initial_interval(Duration::from_millis(100))
            .with_backoff_rate(2.0);

        assert_eq!(policy.delay_for_attempt(0), Duration::from_millis(100));
        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(200));
        assert_eq!(policy.delay_for_attempt(2), Duration::from_millis(400));
        assert_eq!(policy.delay_for_attempt(3), Duration::from_millis(800));
    }

    #[test]
    fn test_fractional_backoff_rate() {
        let policy = RetryPolicy::new()
            .with_initial_interval(Duration::from_millis(100))
            .with_backoff_rate(1.5);

        assert_eq!(policy.delay_for_attempt(1), Duration::from_millis(150));
    }

    #[test]
    fn test_rate_one_is_constant() {
        let policy = RetryPolicy::new()
            .with_initial_interval(Duration::from_millis(250))
            .with_backoff_rate(1.0);

        for attempt in 0..10 {
            assert_eq!(policy.delay_for_attempt(attempt), Duration::from_millis(250));
        }
    }

    #[test]
    fn test_delay_saturates() {
        let policy = RetryPolicy::new()
            .with_initial_interval(Duration::from_secs(1))
            .with_backoff_rate(10.0);

        assert_eq!(policy.delay_for_attempt(u32::MAX), Duration::MAX);
    }

    #[test]
    fn test_custom_jitter_is_added() {
        let policy = RetryPolicy::new()
            .with_initial_interval(Duration::from_millis(10))
            .with_jitter(Jitter::custom(|attempt, _| {
                Duration::from_millis(u64::from(attempt) + 1)
            }));

        assert_eq!(policy.delay_with_jitter(0), Duration::from_millis(11));
        assert_eq!(policy.delay_with_jitter(1), Duration::from_millis(22));
    }

    #[test]
    fn test_no_jitter_returns_base_delay() {
        let policy = RetryPolicy::new().with_initial_interval(Duration::from_millis(10));
        assert_eq!(policy.delay_with_jitter(2), policy.delay_for_attempt(2));
    }

    #[cfg(feature = "jitter")]
    #[test]
    fn test_proportional_jitter_bounds() {
        let jitter = Jitter::Proportional(0.5);
        let base = Duration::from_millis(100);
        for _ in 0..100 {
            let extra = jitter.extra(0, base);
            assert!(extra <= Duration::from_millis(50));
        }
    }

    #[cfg(feature = "jitter")]
    #[test]
    fn test_up_to_jitter_bounds() {
        let jitter = Jitter::UpTo(Duration::from_millis(5));
        for _ in 0..100 {
            assert!(jitter.extra(3, Duration::from_secs(1)) <= Duration::from_millis(5));
        }
        assert_eq!(Jitter::UpTo(Duration::ZERO).extra(0, Duration::from_secs(1)), Duration::ZERO);
    }

    #[test]
    fn test_validate() {
        assert!(RetryPolicy::new().validate().is_ok());
        assert_eq!(
            RetryPolicy::new().with_backoff_rate(0.5).validate(),
            Err(PolicyError::BackoffRateBelowOne(0.5))
        );
        assert!(matches!(
            RetryPolicy::new().with_backoff_rate(f64::INFINITY).validate(),
            Err(PolicyError::NonFiniteBackoffRate(_))
        ));
    }

    #[test]
    fn test_should_retry_predicate() {
        let policy = RetryPolicy::new().with_should_retry(|e| e.to_string() == "transient");
        assert!(policy.should_retry(&anyhow!("transient")));
        assert!(!policy.should_retry(&anyhow!("permanent")));
    }

    #[test]
    fn test_on_retry_callback() {
        use std::sync::atomic::{AtomicU32, Ordering};

        let calls = Arc::new(AtomicU32::new(0));
        let seen = calls.clone();
        let policy = RetryPolicy::new().with_on_retry(move |attempt, _, _| {
            seen.fetch_add(attempt + 1, Ordering::SeqCst);
        });

        policy.notify_retry(0, Duration::ZERO, &anyhow!("x"));
        policy.notify_retry(1, Duration::ZERO, &anyhow!("x"));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_policy_is_clone_and_debug() {
        let policy = RetryPolicy::new().with_max_retries(7);
        let cloned = policy.clone();
        assert_eq!(cloned.max_retries(), 7);

        let debug = format!("{:?}", policy);
        assert!(debug.contains("RetryPolicy"));
        assert!(debug.contains("max_retries: 7"));
    }
}
