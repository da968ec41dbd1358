//! Bind combinator - chains a dependent task.

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Bind combinator - chains a dependent task.
///
/// Zero-cost: no heap allocation. The `Bind` struct stores only
/// the inner task and the function that produces the next task.
///
/// On fulfillment the next task is built from the value and its outcome
/// becomes the outcome of the chain. On fault the function is never called.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(21).bind(|x| fulfilled(x * 2));
/// assert_eq!(task.run().await.unwrap(), 42);
/// # });
/// ```
pub struct Bind<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Bind<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Bind")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F, Next> Task for Bind<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> Next + Send,
    Next: Task,
{
    type Output = Next::Output;

    async fn settle(self) -> Outcome<Next::Output> {
        match self.inner.settle().await.into_result() {
            Ok(value) => (self.f)(value).settle().await,
            Err(error) => Outcome::Faulted(error),
        }
    }
}
