//! Fault / FaultWith - force a fulfilled task to fail.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Replaces a fulfilled value with a fixed error.
///
/// A task that already failed keeps its own error.
pub struct Fault<Inner> {
    pub(crate) inner: Inner,
    pub(crate) error: Error,
}

impl<Inner> std::fmt::Debug for Fault<Inner> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Fault")
            .field("inner", &"<task>")
            .field("error", &self.error)
            .finish()
    }
}

impl<Inner: Task> Task for Fault<Inner> {
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await.into_result() {
            Ok(_) => Outcome::Faulted(self.error),
            Err(error) => Outcome::Faulted(error),
        }
    }
}

/// Replaces a fulfilled value with an error built from it.
pub struct FaultWith<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) f: F,
}

impl<Inner, F> std::fmt::Debug for FaultWith<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FaultWith")
            .field("inner", &"<task>")
            .field("f", &"<function>")
            .finish()
    }
}

impl<Inner, F> Task for FaultWith<Inner, F>
where
    Inner: Task,
    F: FnOnce(Inner::Output) -> Error + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await.into_result() {
            Ok(value) => Outcome::Faulted((self.f)(value)),
            Err(error) => Outcome::Faulted(error),
        }
    }
}
