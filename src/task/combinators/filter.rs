//! Filter combinators - fault a fulfilled task whose value fails a check.
//!
//! One type per way of producing the rejection error:
//! - [`Filter`]: a ready-made error
//! - [`FilterElse`]: an error built by a zero-argument supplier
//! - [`FilterWith`]: an error built from the rejected value
//! - [`FilterAsync`]: an async predicate and an async, value-aware supplier
//!
//! Faulted and cancelled tasks pass through without calling the predicate.

use std::future::Future;

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Faults with a fixed error when the predicate returns false.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(17).filter(|age| *age >= 18, anyhow::anyhow!("too young"));
/// assert_eq!(task.run().await.unwrap_err().to_string(), "too young");
/// # });
/// ```
pub struct Filter<Inner, P> {
    pub(crate) inner: Inner,
    pub(crate) predicate: P,
    pub(crate) error: Error,
}

impl<Inner, P> std::fmt::Debug for Filter<Inner, P> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Filter")
            .field("inner", &"<task>")
            .field("predicate", &"<function>")
            .field("error", &self.error)
            .finish()
    }
}

impl<Inner, P> Task for Filter<Inner, P>
where
    Inner: Task,
    P: FnOnce(&Inner::Output) -> bool + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        let value = match self.inner.settle().await.into_result() {
            Ok(value) => value,
            Err(error) => return Outcome::Faulted(error),
        };
        if (self.predicate)(&value) {
            Outcome::Fulfilled(value)
        } else {
            Outcome::Faulted(self.error)
        }
    }
}

/// Faults with an error from a supplier when the predicate returns false.
///
/// The supplier only runs on rejection.
pub struct FilterElse<Inner, P, S> {
    pub(crate) inner: Inner,
    pub(crate) predicate: P,
    pub(crate) supplier: S,
}

impl<Inner, P, S> std::fmt::Debug for FilterElse<Inner, P, S> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterElse")
            .field("inner", &"<task>")
            .field("predicate", &"<function>")
            .field("supplier", &"<function>")
            .finish()
    }
}

impl<Inner, P, S> Task for FilterElse<Inner, P, S>
where
    Inner: Task,
    P: FnOnce(&Inner::Output) -> bool + Send,
    S: FnOnce() -> Error + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        let value = match self.inner.settle().await.into_result() {
            Ok(value) => value,
            Err(error) => return Outcome::Faulted(error),
        };
        if (self.predicate)(&value) {
            Outcome::Fulfilled(value)
        } else {
            Outcome::Faulted((self.supplier)())
        }
    }
}

/// Faults with an error built from the rejected value.
pub struct FilterWith<Inner, P, R> {
    pub(crate) inner: Inner,
    pub(crate) predicate: P,
    pub(crate) rejection: R,
}

impl<Inner, P, R> std::fmt::Debug for FilterWith<Inner, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterWith")
            .field("inner", &"<task>")
            .field("predicate", &"<function>")
            .field("rejection", &"<function>")
            .finish()
    }
}

impl<Inner, P, R> Task for FilterWith<Inner, P, R>
where
    Inner: Task,
    P: FnOnce(&Inner::Output) -> bool + Send,
    R: FnOnce(Inner::Output) -> Error + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        let value = match self.inner.settle().await.into_result() {
            Ok(value) => value,
            Err(error) => return Outcome::Faulted(error),
        };
        if (self.predicate)(&value) {
            Outcome::Fulfilled(value)
        } else {
            Outcome::Faulted((self.rejection)(value))
        }
    }
}

/// Async form of [`FilterWith`].
///
/// The predicate's future is awaited before the task settles; the
/// rejection future is only created and awaited when the predicate
/// resolves to false.
pub struct FilterAsync<Inner, P, R> {
    pub(crate) inner: Inner,
    pub(crate) predicate: P,
    pub(crate) rejection: R,
}

impl<Inner, P, R> std::fmt::Debug for FilterAsync<Inner, P, R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FilterAsync")
            .field("inner", &"<task>")
            .field("predicate", &"<function>")
            .field("rejection", &"<function>")
            .finish()
    }
}

impl<Inner, P, PF, R, RF> Task for FilterAsync<Inner, P, R>
where
    Inner: Task,
    P: FnOnce(&Inner::Output) -> PF + Send,
    PF: Future<Output = bool> + Send,
    R: FnOnce(Inner::Output) -> RF + Send,
    RF: Future<Output = Error> + Send,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        let value = match self.inner.settle().await.into_result() {
            Ok(value) => value,
            Err(error) => return Outcome::Faulted(error),
        };
        if (self.predicate)(&value).await {
            Outcome::Fulfilled(value)
        } else {
            Outcome::Faulted((self.rejection)(value).await)
        }
    }
}
