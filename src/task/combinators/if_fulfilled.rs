//! IfFulfilled - run a side effect on the value of a fulfilled task.

use std::future::Future;

use crate::outcome::Outcome;
use crate::task::handler::{observe_value, observe_value_async, HandlerResult};
use crate::task::trait_def::Task;

/// Runs a handler on the fulfilled value, then passes the value on.
///
/// Failed and cancelled tasks pass through unchanged without calling the
/// handler. If the handler fails, the task faults with the handler's error.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(5).if_fulfilled(|x| println!("got {x}"));
/// assert_eq!(task.run().await.unwrap(), 5);
/// # });
/// ```
pub struct IfFulfilled<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for IfFulfilled<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfFulfilled")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, H> Task for IfFulfilled<Inner, F>
where
    Inner: Task,
    F: FnOnce(&Inner::Output) -> H + Send,
    H: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        observe_value(self.inner.settle().await, self.f)
    }
}

/// Async form of [`IfFulfilled`]: the handler returns a future that is
/// awaited before the value is passed on.
pub struct IfFulfilledAsync<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for IfFulfilledAsync<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("IfFulfilledAsync")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, Fut> Task for IfFulfilledAsync<Inner, F>
where
    Inner: Task,
    F: FnOnce(&Inner::Output) -> Fut + Send,
    Fut: Future + Send,
    Fut::Output: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        observe_value_async(self.inner.settle().await, self.f).await
    }
}
