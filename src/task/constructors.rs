//! Constructor functions for creating tasks.
//!
//! These functions provide ergonomic ways to create tasks without
//! directly constructing the combinator types.

use std::future::Future;
use std::time::Duration;

use tokio::task::JoinHandle;

use crate::fault::{Cancelled, Error};
use crate::outcome::Outcome;
use crate::task::combinators::{Delayed, FromFn, FromFuture, Ready, Spawned};
use crate::task::trait_def::Task;

/// Create a task that is already fulfilled with `value`.
///
/// Zero-cost: no heap allocation.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// assert_eq!(fulfilled(42).run().await.unwrap(), 42);
/// # });
/// ```
pub fn fulfilled<T: Send>(value: T) -> Ready<T> {
    Ready::new(Outcome::Fulfilled(value))
}

/// Create a task that has already faulted with `error`.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = faulted::<i32>(anyhow::anyhow!("boom"));
/// assert_eq!(task.run().await.unwrap_err().to_string(), "boom");
/// # });
/// ```
pub fn faulted<T: Send>(error: impl Into<Error>) -> Ready<T> {
    Ready::new(Outcome::Faulted(error.into()))
}

/// Create a task that was cancelled before producing a value.
pub fn cancelled<T: Send>() -> Ready<T> {
    Ready::new(Outcome::Cancelled(Cancelled::new()))
}

/// Create a cancelled task that records why it was cancelled.
pub fn cancelled_because<T: Send>(reason: impl Into<String>) -> Ready<T> {
    Ready::new(Outcome::Cancelled(Cancelled::because(reason)))
}

/// Lift a `Result` into an already-settled task.
pub fn from_result<T, E>(result: Result<T, E>) -> Ready<T>
where
    T: Send,
    E: Into<Error>,
{
    Ready::new(result.into())
}

/// Create a task from a future yielding a `Result`.
///
/// The future is not polled until the task is settled.
pub fn from_future<Fut, T, E>(future: Fut) -> FromFuture<Fut>
where
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Into<Error>,
{
    FromFuture { future }
}

/// Create a task from an async supplier.
///
/// The supplier is only called when the task is settled.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = from_fn(|| async { Ok::<_, anyhow::Error>("loaded") });
/// assert_eq!(task.run().await.unwrap(), "loaded");
/// # });
/// ```
pub fn from_fn<F, Fut, T, E>(f: F) -> FromFn<F>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Into<Error>,
{
    FromFn { f }
}

/// Spawn a future onto the tokio runtime and return a task for its result.
///
/// Must be called from within a tokio runtime. Unlike the other
/// constructors, the future starts running immediately.
pub fn spawn<Fut, T, E>(future: Fut) -> Spawned<T>
where
    Fut: Future<Output = Result<T, E>> + Send + 'static,
    T: Send + 'static,
    E: Into<Error>,
{
    Spawned::new(tokio::spawn(async move { future.await.map_err(Into::into) }))
}

/// Adopt an existing tokio join handle.
pub fn from_join_handle<T>(handle: JoinHandle<Result<T, Error>>) -> Spawned<T>
where
    T: Send + 'static,
{
    Spawned::new(handle)
}

/// Wait for `delay`, then build and settle the task produced by `supplier`.
///
/// # Example
///
/// ```rust
/// use std::time::Duration;
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = delayed(Duration::from_millis(5), || fulfilled("later"));
/// assert_eq!(task.run().await.unwrap(), "later");
/// # });
/// ```
pub fn delayed<F, Tk>(delay: Duration, supplier: F) -> Delayed<F>
where
    F: FnOnce() -> Tk + Send,
    Tk: Task,
{
    Delayed { supplier, delay }
}
