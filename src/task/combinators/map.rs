//! Map / TryMap - transform the value of a fulfilled task.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Map combinator - transforms the fulfilled value.
///
/// Zero-cost: no heap allocation. The `Map` struct stores only
/// the inner task and the transformation function.
///
/// Faults pass through untouched and the function is never called.
/// A cancelled inner task surfaces as a fault carrying
/// [`Cancelled`](crate::fault::Cancelled).
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
pub struct Map<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Map<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Map")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, U> Task for Map<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> U + Send,
    U: Send,
{
    type Output = U;

    async fn settle(self) -> Outcome<U> {
        match self.inner.settle().await.into_result() {
            Ok(value) => Outcome::Fulfilled((self.f)(value)),
            Err(error) => Outcome::Faulted(error),
        }
    }
}

/// TryMap combinator - transforms the fulfilled value with a fallible
/// function.
///
/// If the function returns `Err`, the task faults with exactly that error.
pub struct TryMap<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for TryMap<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TryMap")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, U, E> Task for TryMap<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> Result<U, E> + Send,
    U: Send,
    E: Into<Error>,
{
    type Output = U;

    async fn settle(self) -> Outcome<U> {
        match self.inner.settle().await.into_result() {
            Ok(value) => (self.f)(value).into(),
            Err(error) => Outcome::Faulted(error),
        }
    }
}
