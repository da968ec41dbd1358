//! Conditional helpers for building validation and recovery steps.
//!
//! Each helper returns a function meant to be handed to a combinator:
//!
//! - [`reject_if`], [`reject_if_async`], [`invoke_if`] and
//!   [`invoke_if_async`] take a value and are used with
//!   [`bind`](crate::task::TaskExt::bind)
//! - [`resolve_if`], [`resolve_if_with`] and [`re_reject_if`] take an error
//!   and are used with [`recover_with`](crate::task::TaskExt::recover_with)
//!
//! ```rust
//! use taskchain::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let task = fulfilled(-3)
//!     .bind(reject_if(|n: &i32| *n < 0, |n| anyhow::anyhow!("{n} is negative")))
//!     .recover_with(resolve_if(|_| true, |_| 0));
//!
//! assert_eq!(task.run().await.unwrap(), 0);
//! # });
//! ```

use std::future::Future;

use futures::future::Either;

use crate::fault::Error;
use crate::task::boxed::BoxedTask;
use crate::task::combinators::Ready;
use crate::task::constructors::{faulted, from_future, fulfilled};
use crate::task::ext::TaskExt;
use crate::task::handler::HandlerResult;
use crate::task::trait_def::Task;

/// A step that faults with `rejection(value)` when `predicate` holds and
/// passes the value through otherwise.
pub fn reject_if<T, P, R>(predicate: P, rejection: R) -> impl Fn(T) -> Ready<T> + Send + Sync
where
    T: Send,
    P: Fn(&T) -> bool + Send + Sync,
    R: Fn(T) -> Error + Send + Sync,
{
    move |value| {
        if predicate(&value) {
            faulted(rejection(value))
        } else {
            fulfilled(value)
        }
    }
}

/// Like [`reject_if`], with an asynchronous rejection builder.
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let check = reject_if_async(
///     |name: &String| name.trim().is_empty(),
///     |_| async { anyhow::anyhow!("name is blank") },
/// );
///
/// let error = fulfilled("  ".to_string()).bind(check).run().await.unwrap_err();
/// assert_eq!(error.to_string(), "name is blank");
/// # });
/// ```
pub fn reject_if_async<T, P, R, Fut>(
    predicate: P,
    rejection: R,
) -> impl Fn(T) -> BoxedTask<T> + Send + Sync
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync,
    R: Fn(T) -> Fut + Send + Sync,
    Fut: Future<Output = Error> + Send + 'static,
{
    move |value| {
        if predicate(&value) {
            let rejected = rejection(value);
            from_future(async move { Err::<T, Error>(rejected.await) }).boxed()
        } else {
            fulfilled(value).boxed()
        }
    }
}

/// A recovery step that replaces an error with `replacement(error)` when
/// `predicate` holds and keeps the original error otherwise.
///
/// Either way the step faults; use [`resolve_if`] to turn an error into a
/// value.
pub fn re_reject_if<T, P, R>(predicate: P, replacement: R) -> impl Fn(Error) -> Ready<T> + Send + Sync
where
    T: Send,
    P: Fn(&Error) -> bool + Send + Sync,
    R: Fn(Error) -> Error + Send + Sync,
{
    move |error| {
        if predicate(&error) {
            faulted(replacement(error))
        } else {
            faulted(error)
        }
    }
}

/// A recovery step that fulfills with `resolution(error)` when `predicate`
/// holds and keeps the error otherwise.
pub fn resolve_if<T, P, F>(predicate: P, resolution: F) -> impl Fn(Error) -> Ready<T> + Send + Sync
where
    T: Send,
    P: Fn(&Error) -> bool + Send + Sync,
    F: Fn(Error) -> T + Send + Sync,
{
    move |error| {
        if predicate(&error) {
            fulfilled(resolution(error))
        } else {
            faulted(error)
        }
    }
}

/// Like [`resolve_if`], but the resolution is itself a task, which may
/// still fail.
pub fn resolve_if_with<P, F, Tk>(
    predicate: P,
    resolution: F,
) -> impl Fn(Error) -> Either<Tk, Ready<Tk::Output>> + Send + Sync
where
    P: Fn(&Error) -> bool + Send + Sync,
    F: Fn(Error) -> Tk + Send + Sync,
    Tk: Task,
{
    move |error| {
        if predicate(&error) {
            Either::Left(resolution(error))
        } else {
            Either::Right(faulted(error))
        }
    }
}

/// A step that runs `action` when `predicate` holds and always passes the
/// original value on.
///
/// If the action fails, the step faults with its error.
///
/// ```rust
/// use std::sync::atomic::{AtomicU32, Ordering};
/// use std::sync::Arc;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let warnings = Arc::new(AtomicU32::new(0));
/// let counter = warnings.clone();
///
/// let status = fulfilled(503)
///     .bind(invoke_if(
///         |status: &u16| *status >= 500,
///         move |_| {
///             counter.fetch_add(1, Ordering::SeqCst);
///         },
///     ))
///     .run()
///     .await
///     .unwrap();
///
/// assert_eq!(status, 503);
/// assert_eq!(warnings.load(Ordering::SeqCst), 1);
/// # });
/// ```
pub fn invoke_if<T, P, A, H>(predicate: P, action: A) -> impl Fn(T) -> Ready<T> + Send + Sync
where
    T: Send,
    P: Fn(&T) -> bool + Send + Sync,
    A: Fn(&T) -> H + Send + Sync,
    H: HandlerResult,
{
    move |value| {
        if !predicate(&value) {
            return fulfilled(value);
        }
        match action(&value).into_handler_result() {
            Ok(()) => fulfilled(value),
            Err(error) => faulted(error),
        }
    }
}

/// Like [`invoke_if`], with an asynchronous action that is awaited before
/// the value is passed on.
pub fn invoke_if_async<T, P, A, Fut>(predicate: P, action: A) -> impl Fn(T) -> BoxedTask<T> + Send + Sync
where
    T: Send + 'static,
    P: Fn(&T) -> bool + Send + Sync,
    A: Fn(&T) -> Fut + Send + Sync,
    Fut: Future + Send + 'static,
    Fut::Output: HandlerResult,
{
    move |value| {
        if !predicate(&value) {
            return fulfilled(value).boxed();
        }
        let running = action(&value);
        from_future(async move {
            running.await.into_handler_result()?;
            Ok::<T, Error>(value)
        })
        .boxed()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    #[tokio::test]
    async fn test_reject_if_passes_value() {
        let step = reject_if(|n: &i32| *n < 0, |n| anyhow!("{n} is negative"));
        assert_eq!(step(4).run().await.unwrap(), 4);
        assert_eq!(step(-1).run().await.unwrap_err().to_string(), "-1 is negative");
    }

    #[tokio::test]
    async fn test_reject_if_async() {
        let step = reject_if_async(|n: &i32| *n > 10, |n| async move { anyhow!("{n} too big") });
        assert_eq!(step(3).run().await.unwrap(), 3);
        assert_eq!(step(11).run().await.unwrap_err().to_string(), "11 too big");
    }

    #[tokio::test]
    async fn test_re_reject_if() {
        let step = re_reject_if::<i32, _, _>(
            |e| e.to_string() == "timeout",
            |e| e.context("upstream unavailable"),
        );

        let replaced = step(anyhow!("timeout")).run().await.unwrap_err();
        assert_eq!(replaced.to_string(), "upstream unavailable");

        let kept = step(anyhow!("other")).run().await.unwrap_err();
        assert_eq!(kept.to_string(), "other");
    }

    #[tokio::test]
    async fn test_resolve_if() {
        let step = resolve_if(|e| e.to_string() == "missing", |_| 0);
        assert_eq!(step(anyhow!("missing")).run().await.unwrap(), 0);
        assert!(step(anyhow!("fatal")).run().await.is_err());
    }

    #[tokio::test]
    async fn test_resolve_if_with_task() {
        let step = resolve_if_with(|_| true, |_| faulted::<i32>(anyhow!("fallback failed")));
        let error = step(anyhow!("first")).run().await.unwrap_err();
        assert_eq!(error.to_string(), "fallback failed");
    }

    #[tokio::test]
    async fn test_resolve_if_in_recover_sees_unwrapped_error() {
        use crate::fault::Aggregate;

        let task = faulted::<i32>(Aggregate::single(anyhow!("missing")))
            .recover_with(resolve_if(|e| e.to_string() == "missing", |_| 7));
        assert_eq!(task.run().await.unwrap(), 7);
    }

    #[tokio::test]
    async fn test_invoke_if_skips_action() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let step = invoke_if(
            |n: &i32| *n > 0,
            move |_| {
                counter.fetch_add(1, Ordering::SeqCst);
            },
        );

        assert_eq!(step(-1).run().await.unwrap(), -1);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert_eq!(step(1).run().await.unwrap(), 1);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_invoke_if_action_failure_faults() {
        let step = invoke_if(|_: &i32| true, |_| Err::<(), _>(anyhow!("audit failed")));
        assert_eq!(step(1).run().await.unwrap_err().to_string(), "audit failed");
    }

    #[tokio::test]
    async fn test_invoke_if_async_waits_for_action() {
        let calls = Arc::new(AtomicU32::new(0));
        let counter = calls.clone();
        let step = invoke_if_async(
            |_: &i32| true,
            move |_| {
                let counter = counter.clone();
                async move {
                    tokio::task::yield_now().await;
                    counter.fetch_add(1, Ordering::SeqCst);
                }
            },
        );

        assert_eq!(step(9).run().await.unwrap(), 9);
        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }
}
