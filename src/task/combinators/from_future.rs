//! FromFuture / FromFn - tasks backed by ordinary futures.

use std::future::Future;

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A task driven by a future that yields a `Result`.
///
/// `Ok` settles as fulfilled, `Err` as faulted.
pub struct FromFuture<Fut> {
    pub(crate) future: Fut,
}

impl<Fut> std::fmt::Debug for FromFuture<Fut> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFuture")
            .field("future", &"<future>")
            .finish()
    }
}

impl<Fut, T, E> Task for FromFuture<Fut>
where
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Into<Error>,
{
    type Output = T;

    async fn settle(self) -> Outcome<T> {
        self.future.await.into()
    }
}

/// A task that calls an async supplier when it is settled.
///
/// Nothing runs until the task is settled, so a `FromFn` can be built
/// ahead of time and handed to a combinator that may never need it.
pub struct FromFn<F> {
    pub(crate) f: F,
}

impl<F> std::fmt::Debug for FromFn<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FromFn").field("f", &"<function>").finish()
    }
}

impl<F, Fut, T, E> Task for FromFn<F>
where
    F: FnOnce() -> Fut + Send,
    Fut: Future<Output = Result<T, E>> + Send,
    T: Send,
    E: Into<Error>,
{
    type Output = T;

    async fn settle(self) -> Outcome<T> {
        (self.f)().await.into()
    }
}
