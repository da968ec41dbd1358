//! IfFaulted - run a side effect on the cause of a failed task.

use std::future::Future;

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::handler::{observe_failure, observe_failure_async, HandlerResult};
use crate::task::trait_def::Task;

/// Runs a handler on the root cause of a failure, then re-raises the
/// original failure.
///
/// The handler sees the error with any envelope unwrapped once; a
/// cancellation is presented as a [`Cancelled`](crate::fault::Cancelled)
/// error and the task settles as that fault. Otherwise the outcome is left
/// as it was unless the handler fails, in which case the handler's error
/// replaces it.
pub struct IfFaulted<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for IfFaulted<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfFaulted")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, H> Task for IfFaulted<Inner, F>
where
    Inner: Task,
    F: FnOnce(&Error) -> H + Send,
    H: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        observe_failure(self.inner.settle().await, self.f)
    }
}

/// Async form of [`IfFaulted`].
pub struct IfFaultedAsync<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for IfFaultedAsync<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfFaultedAsync")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, Fut> Task for IfFaultedAsync<Inner, F>
where
    Inner: Task,
    F: FnOnce(&Error) -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        observe_failure_async(self.inner.settle().await, self.f).await
    }
}
