//! BiBind combinator - chains a task on either branch.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Chains a new task from whichever branch the inner task settles on.
///
/// Unlike [`BiMap`](super::BiMap), the error branch may recover: if the task
/// it returns fulfills, so does the chain.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = faulted::<i32>(anyhow::anyhow!("offline"))
///     .bibind(|_| fulfilled(0), |x| fulfilled(x + 1));
/// assert_eq!(task.run().await.unwrap(), 0);
/// # });
/// ```
pub struct BiBind<Inner, FE, FV> {
    pub(crate) inner: Inner,
    pub(crate) on_faulted: FE,
    pub(crate) on_fulfilled: FV,
}

impl<Inner, FE, FV> std::fmt::Debug for BiBind<Inner, FE, FV> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BiBind")
            .field("inner", &"<task>")
            .field("on_faulted", &"<function>")
            .field("on_fulfilled", &"<function>")
            .finish()
    }
}

impl<Inner, FE, FV, TE, TV> Task for BiBind<Inner, FE, FV>
where
    Inner: Task,
    FE: FnOnce(Error) -> TE + Send,
    FV: FnOnce(Inner::Output) -> TV + Send,
    TE: Task<Output = TV::Output>,
    TV: Task,
{
    type Output = TV::Output;

    async fn settle(self) -> Outcome<TV::Output> {
        match self.inner.settle().await.into_exposed() {
            Ok(value) => (self.on_fulfilled)(value).settle().await,
            Err(error) => (self.on_faulted)(error).settle().await,
        }
    }
}
