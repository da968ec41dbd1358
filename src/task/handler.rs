//! Side-effect handler plumbing shared by `if_fulfilled`, `if_faulted` and
//! `tap`.
//!
//! A handler reports failure through its return value. Handlers that cannot
//! fail return `()`; handlers that can return `Result<_, E>`. When a handler
//! fails, its error replaces the task's outcome. Otherwise the outcome is
//! left as it was, except that a cancellation seen by a failure handler
//! settles as a fault carrying [`Cancelled`](crate::fault::Cancelled).

use std::future::Future;

use crate::fault::{unwrap_envelope_ref, Error};
use crate::outcome::Outcome;

/// The return type of a side-effect handler.
pub trait HandlerResult {
    /// `Ok(())` if the handler succeeded, otherwise the error that should
    /// replace the task's outcome.
    fn into_handler_result(self) -> Result<(), Error>;
}

impl HandlerResult for () {
    fn into_handler_result(self) -> Result<(), Error> {
        Ok(())
    }
}

impl<R, E> HandlerResult for Result<R, E>
where
    E: Into<Error>,
{
    fn into_handler_result(self) -> Result<(), Error> {
        self.map(|_| ()).map_err(Into::into)
    }
}

fn settle_after<T>(outcome: Outcome<T>, handled: Result<(), Error>) -> Outcome<T> {
    match handled {
        Ok(()) => outcome,
        Err(error) => Outcome::Faulted(error),
    }
}

/// Run `f` on a fulfilled value; failures pass through untouched.
pub(crate) fn observe_value<T, F, H>(outcome: Outcome<T>, f: F) -> Outcome<T>
where
    F: FnOnce(&T) -> H,
    H: HandlerResult,
{
    match outcome {
        Outcome::Fulfilled(value) => {
            let handled = f(&value).into_handler_result();
            settle_after(Outcome::Fulfilled(value), handled)
        }
        other => other,
    }
}

/// Async form of [`observe_value`]. The handler's future is awaited before
/// the outcome is returned.
pub(crate) async fn observe_value_async<T, F, Fut>(outcome: Outcome<T>, f: F) -> Outcome<T>
where
    F: FnOnce(&T) -> Fut,
    Fut: Future,
    Fut::Output: HandlerResult,
{
    match outcome {
        Outcome::Fulfilled(value) => {
            let handled = f(&value).await.into_handler_result();
            settle_after(Outcome::Fulfilled(value), handled)
        }
        other => other,
    }
}

/// Run `f` on the root cause of a failure; values pass through untouched.
///
/// A cancellation is shown to the handler as a
/// [`Cancelled`](crate::fault::Cancelled) error and settles as that fault.
pub(crate) fn observe_failure<T, F, H>(outcome: Outcome<T>, f: F) -> Outcome<T>
where
    F: FnOnce(&Error) -> H,
    H: HandlerResult,
{
    match outcome {
        Outcome::Fulfilled(value) => Outcome::Fulfilled(value),
        Outcome::Faulted(error) => {
            let handled = f(unwrap_envelope_ref(&error)).into_handler_result();
            settle_after(Outcome::Faulted(error), handled)
        }
        Outcome::Cancelled(cancelled) => {
            let surfaced = Error::new(cancelled);
            let handled = f(&surfaced).into_handler_result();
            settle_after(Outcome::Faulted(surfaced), handled)
        }
    }
}

/// Async form of [`observe_failure`].
pub(crate) async fn observe_failure_async<T, F, Fut>(outcome: Outcome<T>, f: F) -> Outcome<T>
where
    F: FnOnce(&Error) -> Fut,
    Fut: Future,
    Fut::Output: HandlerResult,
{
    match outcome {
        Outcome::Fulfilled(value) => Outcome::Fulfilled(value),
        Outcome::Faulted(error) => {
            let handled = f(unwrap_envelope_ref(&error)).await.into_handler_result();
            settle_after(Outcome::Faulted(error), handled)
        }
        Outcome::Cancelled(cancelled) => {
            let surfaced = Error::new(cancelled);
            let handled = f(&surfaced).await.into_handler_result();
            settle_after(Outcome::Faulted(surfaced), handled)
        }
    }
}
