//! BiMap combinator - transforms both branches of a task.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Transforms the value of a fulfilled task and the error of a failed one.
///
/// The error branch can only produce another error: `BiMap` never turns a
/// fault into a value. The error handler sees the root cause, with any
/// envelope unwrapped once, and cancellation arrives as a
/// [`Cancelled`](crate::fault::Cancelled) error.
pub struct BiMap<Inner, FE, FV> {
    pub(crate) inner: Inner,
    pub(crate) on_faulted: FE,
    pub(crate) on_fulfilled: FV,
}

impl<Inner, FE, FV> std::fmt::Debug for BiMap<Inner, FE, FV> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiMap")
            .field("inner", &"<task>")
            .field("on_faulted", &"<function>")
            .field("on_fulfilled", &"<function>")
            .finish()
    }
}

impl<Inner, FE, FV, U> Task for BiMap<Inner, FE, FV>
where
    Inner: Task,
    FE: FnOnce(Error) -> Error + Send,
    FV: FnOnce(Inner::Output) -> U + Send,
    U: Send,
{
    type Output = U;

    async fn settle(self) -> Outcome<U> {
        match self.inner.settle().await.into_exposed() {
            Ok(value) => Outcome::Fulfilled((self.on_fulfilled)(value)),
            Err(error) => Outcome::Faulted((self.on_faulted)(error)),
        }
    }
}
