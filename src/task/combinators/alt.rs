//! Alt / AltWith - substitute another task when the first one fails.

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// Settles `other` if the inner task does not fulfill.
///
/// Cancellation is not treated specially: a cancelled inner task is
/// replaced just like a faulted one. `other` is only settled when it is
/// needed.
pub struct Alt<Inner, Other> {
    pub(crate) inner: Inner,
    pub(crate) other: Other,
}

impl<Inner, Other> std::fmt::Debug for Alt<Inner, Other> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Alt")
            .field("inner", &"<task>")
            .field("other", &"<task>")
            .finish()
    }
}

impl<Inner, Other> Task for Alt<Inner, Other>
where
    Inner: Task,
    Other: Task<Output = Inner::Output>,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await {
            Outcome::Fulfilled(value) => Outcome::Fulfilled(value),
            Outcome::Faulted(_) | Outcome::Cancelled(_) => self.other.settle().await,
        }
    }
}

/// Like [`Alt`], but the substitute is built by a supplier on demand.
pub struct AltWith<Inner, F> {
    pub(crate) inner: Inner,
    pub(crate) supplier: F,
}

impl<Inner, F> std::fmt::Debug for AltWith<Inner, F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AltWith")
            .field("inner", &"<task>")
            .field("supplier", &"<function>")
            .finish()
    }
}

impl<Inner, F, Other> Task for AltWith<Inner, F>
where
    Inner: Task,
    F: FnOnce() -> Other + Send,
    Other: Task<Output = Inner::Output>,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        match self.inner.settle().await {
            Outcome::Fulfilled(value) => Outcome::Fulfilled(value),
            Outcome::Faulted(_) | Outcome::Cancelled(_) => (self.supplier)().settle().await,
        }
    }
}
