//! Recover combinator - turn a fault back into a value.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Replaces a fault (or cancellation) with the value computed from it.
///
/// Fulfilled tasks pass through unchanged.
pub struct Recover<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for Recover<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Recover")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F> Task for Recover<Inner, F>
where
    Inner: Task,
    F: FnOnce(Error) -> Inner::Output + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await.into_exposed() {
            Ok(value) => Outcome::Fulfilled(value),
            Err(error) => Outcome::Fulfilled((self.f)(error)),
        }
    }
}
