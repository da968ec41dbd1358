//! Tap - observe both branches of a task without changing it.

use std::future::Future;

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::handler::{
    observe_failure, observe_failure_async, observe_value, observe_value_async, HandlerResult,
};
use crate::task::trait_def::Task;

/// Runs `on_fulfilled` on a value or `on_faulted` on a failure.
///
/// Exactly one handler runs. If `on_fulfilled` fails, the task faults with
/// its error and `on_faulted` is not called.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(1).tap(
///     |x| println!("value {x}"),
///     |e| eprintln!("error {e}"),
/// );
/// assert_eq!(task.run().await.unwrap(), 1);
/// # });
/// ```
pub struct Tap<Inner, FV, FE> {
    pub(crate) inner: Inner,
    pub(crate) on_fulfilled: FV,
    pub(crate) on_faulted: FE,
}

impl<Inner, FV, FE> std::fmt::Debug for Tap<Inner, FV, FE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Tap")
            .field("inner", &"<task>")
            .field("on_fulfilled", &"<function>")
            .field("on_faulted", &"<function>")
            .finish()
    }
}

impl<Inner, FV, HV, FE, HE> Task for Tap<Inner, FV, FE>
where
    Inner: Task,
    FV: FnOnce(&Inner::Output) -> HV + Send,
    HV: HandlerResult,
    FE: FnOnce(&Error) -> HE + Send,
    HE: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await {
            fulfilled @ Outcome::Fulfilled(_) => observe_value(fulfilled, self.on_fulfilled),
            failed => observe_failure(failed, self.on_faulted),
        }
    }
}

/// Async form of [`Tap`].
pub struct TapAsync<Inner, FV, FE> {
    pub(crate) inner: Inner,
    pub(crate) on_fulfilled: FV,
    pub(crate) on_faulted: FE,
}

impl<Inner, FV, FE> std::fmt::Debug for TapAsync<Inner, FV, FE> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TapAsync")
            .field("inner", &"<task>")
            .field("on_fulfilled", &"<function>")
            .field("on_faulted", &"<function>")
            .finish()
    }
}

impl<Inner, FV, FutV, FE, FutE> Task for TapAsync<Inner, FV, FE>
where
    Inner: Task,
    FV: FnOnce(&Inner::Output) -> FutV + Send,
    FutV: Future + Send,
    FutV::Output: HandlerResult,
    FE: FnOnce(&Error) -> FutE + Send,
    FutE: Future + Send,
    FutE::Output: HandlerResult,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await {
            fulfilled @ Outcome::Fulfilled(_) => {
                observe_value_async(fulfilled, self.on_fulfilled).await
            }
            failed => observe_failure_async(failed, self.on_faulted).await,
        }
    }
}
