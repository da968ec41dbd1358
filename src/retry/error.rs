//! Error types for retry operations.

use std::error::Error as StdError;
use std::fmt;

use crate::fault::Error;

/// Error produced when every allowed attempt has failed.
///
/// The message is always `Retries exhausted after {N} attempts`. The last
/// underlying failure, when there was one, is available as
/// [`cause`](Self::cause) and through `source()`.
///
/// # Examples
///
/// ```rust
/// use std::time::Duration;
/// use taskchain::prelude::*;
/// use taskchain::RetryExhausted;
///
/// # tokio_test::block_on(async {
/// let policy = RetryPolicy::new()
///     .with_max_retries(2)
///     .with_initial_interval(Duration::from_millis(1));
///
/// let error = retry(|| faulted::<()>(anyhow::anyhow!("always fails")), policy)
///     .run()
///     .await
///     .unwrap_err();
///
/// let exhausted = error.downcast_ref::<RetryExhausted>().unwrap();
/// assert_eq!(exhausted.attempts_made, 2);
/// assert_eq!(error.to_string(), "Retries exhausted after 2 attempts");
/// # });
/// ```
pub struct RetryExhausted {
    /// Number of attempts that were made.
    pub attempts_made: u32,
    /// The error from the final attempt, if any attempt was made.
    pub cause: Option<Error>,
}

impl RetryExhausted {
    /// Create a new RetryExhausted error.
    pub fn new(attempts_made: u32, cause: Option<Error>) -> Self {
        Self {
            attempts_made,
            cause,
        }
    }

    /// Get a reference to the final error.
    pub fn cause(&self) -> Option<&Error> {
        self.cause.as_ref()
    }

    /// Extract the final error, discarding the attempt count.
    pub fn into_cause(self) -> Option<Error> {
        self.cause
    }
}

impl fmt::Debug for RetryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RetryExhausted")
            .field("attempts_made", &self.attempts_made)
            .field("cause", &self.cause)
            .finish()
    }
}

impl fmt::Display for RetryExhausted {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Retries exhausted after {} attempts", self.attempts_made)
    }
}

impl StdError for RetryExhausted {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.cause
            .as_ref()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}

/// A retry policy that cannot be used.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum PolicyError {
    /// The backoff rate is NaN or infinite.
    #[error("backoff rate must be finite, got {0}")]
    NonFiniteBackoffRate(f64),
    /// The backoff rate would shrink delays.
    #[error("backoff rate must be at least 1.0, got {0}")]
    BackoffRateBelowOne(f64),
}
