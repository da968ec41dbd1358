//! Task trait definition - the core abstraction of the crate.
//!
//! A `Task` is a single-shot asynchronous computation that settles into an
//! [`Outcome`]: a value, a fault, or a cancellation.
//!
//! # Design Philosophy
//!
//! This trait follows the same pattern as `Future` and `Iterator`:
//! - Combinators return concrete types (zero-cost abstractions)
//! - Use `.boxed()` when you need type erasure
//!
//! Settling consumes the task, so a task can never be observed twice and a
//! combinator always produces a new task.

use std::future::Future;

use crate::outcome::Outcome;

/// A single-shot asynchronous computation.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(21).map(|x| x * 2);
/// assert_eq!(task.run().await.unwrap(), 42);
/// # });
/// ```
pub trait Task: Sized + Send {
    /// The value produced when the task is fulfilled.
    type Output: Send;

    /// Drive the task to completion.
    ///
    /// The returned future resolves to the task's single [`Outcome`].
    fn settle(self) -> impl Future<Output = Outcome<Self::Output>> + Send;
}
