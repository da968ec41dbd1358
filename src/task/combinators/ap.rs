//! Ap combinator - applicative apply.

use std::marker::PhantomData;

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Applies the function produced by one task to the value of another.
///
/// The function task is settled first. If it does not fulfill, the chain
/// faults with its cause and the value task is never settled.
pub struct Ap<Inner, G, U> {
    pub(crate) inner: Inner,
    pub(crate) fn_task: G,
    pub(crate) _marker: PhantomData<fn() -> U>,
}

impl<Inner, G, U> std::fmt::Debug for Ap<Inner, G, U> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Ap")
            .field("inner", &"<task>")
            .field("fn_task", &"<task>")
            .finish()
    }
}

impl<Inner, G, U> Task for Ap<Inner, G, U>
where
    Inner: Task,
    G: Task,
    G::Output: FnOnce(Inner::Output) -> U,
    U: Send,
{
    type Output = U;

    async fn settle(self) -> Outcome<U> {
        let f = match self.fn_task.settle().await.into_result() {
            Ok(f) => f,
            Err(error) => return Outcome::Faulted(error),
        };
        match self.inner.settle().await.into_result() {
            Ok(value) => Outcome::Fulfilled(f(value)),
            Err(error) => Outcome::Faulted(error),
        }
    }
}
