//! Retry engine - re-run a task supplier with exponential backoff.
//!
//! Each attempt calls the supplier for a fresh task and settles it. The
//! loop stops on the first fulfillment, on an error the policy's retry
//! predicate rejects, or once `max_retries` attempts have been made.
//!
//! For a supplier that always fails and a budget of `N`, the supplier runs
//! exactly `N` times and a delay is waited after each failure, so with a
//! 10ms initial interval and a rate of 2.0 three attempts take at least
//! `10 + 20 + 40` ms before [`RetryExhausted`] is produced.
//!
//! The wait between attempts is a tokio timer; dropping the retry task
//! cancels it. There is no separate cancellation token.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::retry::{RetryExhausted, RetryPolicy};
use crate::task::combinators::Ready;
use crate::task::constructors::from_result;
use crate::task::trait_def::Task;

/// A task that retries the tasks produced by a supplier.
///
/// Created by [`retry`], [`retry_fn`] and
/// [`TaskExt::bind_retry`](crate::task::TaskExt::bind_retry).
pub struct Retry<F> {
    pub(crate) supplier: F,
    pub(crate) policy: RetryPolicy,
}

impl<F> std::fmt::Debug for Retry<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Retry")
            .field("supplier", &"<function>")
            .field("policy", &self.policy)
            .finish()
    }
}

/// Build the exhaustion error, passing an inner exhaustion through as-is.
fn exhausted(attempts: u32, last: Option<Error>) -> Error {
    match last {
        Some(error) if error.is::<RetryExhausted>() => error,
        last => Error::new(RetryExhausted::new(attempts, last)),
    }
}

impl<F, Tk> Task for Retry<F>
where
    F: FnMut() -> Tk + Send,
    Tk: Task,
{
    type Output = Tk::Output;

    async fn settle(mut self) -> Outcome<Tk::Output> {
        let mut attempts: u32 = 0;
        let mut last: Option<Error> = None;

        loop {
            if attempts >= self.policy.max_retries() {
                #[cfg(feature = "tracing")]
                tracing::warn!(attempts, "retries exhausted");
                return Outcome::Faulted(exhausted(attempts, last));
            }

            let error = match (self.supplier)().settle().await.into_exposed() {
                Ok(value) => return Outcome::Fulfilled(value),
                Err(error) => error,
            };

            if !self.policy.should_retry(&error) {
                #[cfg(feature = "tracing")]
                tracing::debug!(attempt = attempts, error = %error, "error is not retryable");
                return Outcome::Faulted(error);
            }

            let delay = self.policy.delay_with_jitter(attempts);
            #[cfg(feature = "tracing")]
            tracing::debug!(attempt = attempts, ?delay, error = %error, "scheduling retry");
            self.policy.notify_retry(attempts, delay, &error);

            tokio::time::sleep(delay).await;
            attempts += 1;
            last = Some(error);
        }
    }
}

/// Retry the task produced by `supplier` according to `policy`.
///
/// The supplier is called once per attempt, so every attempt gets a fresh
/// task. Errors are unwrapped of any envelope before the retry predicate
/// and callback see them.
///
/// # Outcomes
///
/// - the first fulfilled value
/// - an error rejected by the retry predicate, unchanged
/// - [`RetryExhausted`] carrying the attempt count and the last error; an
///   inner `RetryExhausted` is returned as-is rather than wrapped again
///
/// # Example
///
/// ```rust
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
/// use std::time::Duration;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let calls = Arc::new(AtomicU32::new(0));
/// let counter = calls.clone();
///
/// let task = retry(
///     move || {
///         let n = counter.fetch_add(1, Ordering::SeqCst);
///         if n < 2 {
///             faulted(anyhow::anyhow!("transient"))
///         } else {
///             fulfilled("connected")
///         }
///     },
///     RetryPolicy::new().with_initial_interval(Duration::from_millis(1)),
/// );
///
/// assert_eq!(task.run().await.unwrap(), "connected");
/// assert_eq!(calls.load(Ordering::SeqCst), 3);
/// # });
/// ```
pub fn retry<F, Tk>(supplier: F, policy: RetryPolicy) -> Retry<F>
where
    F: FnMut() -> Tk + Send,
    Tk: Task,
{
    Retry { supplier, policy }
}

/// Retry a synchronous fallible supplier.
///
/// Each call's `Result` is lifted into a ready task and retried exactly as
/// [`retry`] would.
///
/// ```rust
/// use std::time::Duration;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let policy = RetryPolicy::new()
///     .with_max_retries(3)
///     .with_initial_interval(Duration::from_millis(1));
///
/// let error = retry_fn(|| Err::<(), _>(anyhow::anyhow!("nope")), policy)
///     .run()
///     .await
///     .unwrap_err();
/// assert_eq!(error.to_string(), "Retries exhausted after 3 attempts");
/// # });
/// ```
pub fn retry_fn<F, T, E>(
    mut supplier: F,
    policy: RetryPolicy,
) -> Retry<impl FnMut() -> Ready<T> + Send>
where
    F: FnMut() -> Result<T, E> + Send,
    T: Send,
    E: Into<Error>,
{
    retry(move || from_result(supplier()), policy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::Aggregate;
    use crate::task::constructors::{faulted, fulfilled};
    use crate::task::ext::TaskExt;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::{Arc, Mutex};
    use std::time::Duration;

    fn fast_policy(max_retries: u32) -> RetryPolicy {
        RetryPolicy::new()
            .with_max_retries(max_retries)
            .with_initial_interval(Duration::from_millis(1))
    }

    #[tokio::test]
    async fn test_zero_budget_never_invokes_supplier() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let error = retry(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                fulfilled(1)
            },
            fast_policy(0),
        )
        .run()
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 0);
        let exhausted = error.downcast_ref::<RetryExhausted>().unwrap();
        assert_eq!(exhausted.attempts_made, 0);
        assert!(exhausted.cause().is_none());
    }

    #[tokio::test]
    async fn test_exhaustion_keeps_last_cause() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();

        let error = retry(
            move || {
                let n = counter.fetch_add(1, Ordering::SeqCst);
                faulted::<()>(anyhow!("failure {n}"))
            },
            fast_policy(3),
        )
        .run()
        .await
        .unwrap_err();

        let exhausted = error.downcast_ref::<RetryExhausted>().unwrap();
        assert_eq!(exhausted.attempts_made, 3);
        assert_eq!(exhausted.cause().unwrap().to_string(), "failure 2");
    }

    #[tokio::test]
    async fn test_callback_sees_unwrapped_error_and_attempts() {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let log = seen.clone();
        let policy = fast_policy(3).with_on_retry(move |attempt, delay, error| {
            log.lock().unwrap().push((attempt, delay, error.to_string()));
        });

        let _ = retry(
            || faulted::<()>(Aggregate::single(anyhow!("root"))),
            policy,
        )
        .run()
        .await;

        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                (0, Duration::from_millis(1), "root".to_string()),
                (1, Duration::from_millis(2), "root".to_string()),
                (2, Duration::from_millis(4), "root".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_rejected_error_is_not_wrapped() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let policy = fast_policy(5).with_should_retry(|_| false);

        let error = retry(
            move || {
                counter.fetch_add(1, Ordering::SeqCst);
                faulted::<()>(anyhow!("permanent"))
            },
            policy,
        )
        .run()
        .await
        .unwrap_err();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert!(!error.is::<RetryExhausted>());
        assert_eq!(error.to_string(), "permanent");
    }

    #[tokio::test]
    async fn test_nested_exhaustion_is_not_wrapped_twice() {
        let inner_policy = fast_policy(2);
        let outer = retry(
            move || retry(|| faulted::<()>(anyhow!("deep")), inner_policy.clone()),
            fast_policy(2),
        );

        let error = outer.run().await.unwrap_err();
        let exhausted = error.downcast_ref::<RetryExhausted>().unwrap();
        assert_eq!(exhausted.attempts_made, 2);
        assert!(!exhausted.cause().unwrap().is::<RetryExhausted>());
        assert_eq!(exhausted.cause().unwrap().to_string(), "deep");
    }

    #[tokio::test]
    async fn test_retry_fn_success_after_failures() {
        let mut remaining = 2;
        let value = retry_fn(
            move || {
                if remaining > 0 {
                    remaining -= 1;
                    Err(anyhow!("not yet"))
                } else {
                    Ok("done")
                }
            },
            fast_policy(5),
        )
        .run()
        .await
        .unwrap();

        assert_eq!(value, "done");
    }

    #[cfg(feature = "tracing")]
    #[tokio::test]
    #[tracing_test::traced_test]
    async fn test_retry_logs_scheduling_and_exhaustion() {
        let _ = retry(|| faulted::<()>(anyhow!("flaky upstream")), fast_policy(2))
            .run()
            .await;

        assert!(logs_contain("scheduling retry"));
        assert!(logs_contain("flaky upstream"));
        assert!(logs_contain("retries exhausted"));
    }

    #[test]
    fn test_retry_debug() {
        let task = retry(|| fulfilled(1), RetryPolicy::new());
        let debug = format!("{:?}", task);
        assert!(debug.contains("Retry"));
        assert!(debug.contains("<function>"));
    }
}
