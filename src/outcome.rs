//! The settled state of a task.

use std::fmt;

use crate::fault::{self, Cancelled, Error};

/// The terminal result of settling a [`Task`](crate::Task).
///
/// A task settles exactly once, into exactly one of these variants.
///
/// # Example
///
/// ```rust
/// use taskchain::Outcome;
///
/// let outcome: Outcome<i32> = Ok::<_, anyhow::Error>(7).into();
/// assert!(outcome.is_fulfilled());
/// assert_eq!(outcome.ok(), Some(7));
/// ```
pub enum Outcome<T> {
    /// The task produced a value.
    Fulfilled(T),
    /// The task failed.
    Faulted(Error),
    /// The task was cancelled before producing a value.
    Cancelled(Cancelled),
}

impl<T> Outcome<T> {
    /// Returns true if the task produced a value.
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, Outcome::Fulfilled(_))
    }

    /// Returns true if the task failed.
    ///
    /// A cancellation that has passed through a combinator is reported here,
    /// since combinators surface cancellation as a fault.
    pub fn is_faulted(&self) -> bool {
        matches!(self, Outcome::Faulted(_))
    }

    /// Returns true if the task itself was cancelled.
    pub fn is_cancelled(&self) -> bool {
        matches!(self, Outcome::Cancelled(_))
    }

    /// Returns true if the task was cancelled, either directly or as a
    /// cancellation surfaced as a fault by a combinator.
    pub fn is_cancellation(&self) -> bool {
        match self {
            Outcome::Fulfilled(_) => false,
            Outcome::Faulted(error) => fault::is_cancellation(error),
            Outcome::Cancelled(_) => true,
        }
    }

    /// Borrow the value, if fulfilled.
    pub fn value(&self) -> Option<&T> {
        match self {
            Outcome::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    /// Borrow the error, if faulted.
    pub fn error(&self) -> Option<&Error> {
        match self {
            Outcome::Faulted(error) => Some(error),
            _ => None,
        }
    }

    /// Discard the failure side.
    pub fn ok(self) -> Option<T> {
        match self {
            Outcome::Fulfilled(value) => Some(value),
            _ => None,
        }
    }

    /// Transform the value of a fulfilled outcome.
    pub fn map<U, F>(self, f: F) -> Outcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Outcome::Fulfilled(value) => Outcome::Fulfilled(f(value)),
            Outcome::Faulted(error) => Outcome::Faulted(error),
            Outcome::Cancelled(cancelled) => Outcome::Cancelled(cancelled),
        }
    }

    /// Convert into a `Result`, surfacing cancellation as an error.
    ///
    /// Faults are returned exactly as they were recorded; no envelope is
    /// unwrapped.
    pub fn into_result(self) -> Result<T, Error> {
        match self {
            Outcome::Fulfilled(value) => Ok(value),
            Outcome::Faulted(error) => Err(error),
            Outcome::Cancelled(cancelled) => Err(Error::new(cancelled)),
        }
    }

    /// The view a user handler gets: faults unwrapped once, cancellation as
    /// an error.
    pub(crate) fn into_exposed(self) -> Result<T, Error> {
        match self {
            Outcome::Fulfilled(value) => Ok(value),
            Outcome::Faulted(error) => Err(fault::unwrap_envelope(error)),
            Outcome::Cancelled(cancelled) => Err(Error::new(cancelled)),
        }
    }
}

impl<T, E> From<Result<T, E>> for Outcome<T>
where
    E: Into<Error>,
{
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Outcome::Fulfilled(value),
            Err(error) => Outcome::Faulted(error.into()),
        }
    }
}

impl<T: fmt::Debug> fmt::Debug for Outcome<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Fulfilled(value) => f.debug_tuple("Fulfilled").field(value).finish(),
            Outcome::Faulted(error) => f.debug_tuple("Faulted").field(error).finish(),
            Outcome::Cancelled(cancelled) => f.debug_tuple("Cancelled").field(cancelled).finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fault::Aggregate;
    use anyhow::anyhow;

    #[test]
    fn test_predicates() {
        let fulfilled: Outcome<i32> = Outcome::Fulfilled(1);
        let faulted: Outcome<i32> = Outcome::Faulted(anyhow!("boom"));
        let cancelled: Outcome<i32> = Outcome::Cancelled(Cancelled::new());

        assert!(fulfilled.is_fulfilled());
        assert!(faulted.is_faulted());
        assert!(cancelled.is_cancelled());
        assert!(cancelled.is_cancellation());
        assert!(!faulted.is_cancellation());
    }

    #[test]
    fn test_surfaced_cancellation_is_detected() {
        let outcome: Outcome<i32> = Outcome::Faulted(Error::new(Cancelled::new()));
        assert!(outcome.is_faulted());
        assert!(!outcome.is_cancelled());
        assert!(outcome.is_cancellation());
    }

    #[test]
    fn test_into_result_keeps_envelope() {
        let outcome: Outcome<i32> =
            Outcome::Faulted(Error::new(Aggregate::single(anyhow!("inner"))));
        let error = outcome.into_result().unwrap_err();
        assert!(error.is::<Aggregate>());
    }

    #[test]
    fn test_into_exposed_unwraps_once() {
        let outcome: Outcome<i32> =
            Outcome::Faulted(Error::new(Aggregate::single(anyhow!("inner"))));
        let error = outcome.into_exposed().unwrap_err();
        assert_eq!(error.to_string(), "inner");
    }

    #[test]
    fn test_cancelled_into_result() {
        let outcome: Outcome<i32> = Outcome::Cancelled(Cancelled::because("stop"));
        let error = outcome.into_result().unwrap_err();
        assert_eq!(error.downcast_ref::<Cancelled>().and_then(|c| c.reason()), Some("stop"));
    }

    #[test]
    fn test_map_and_ok() {
        let outcome: Outcome<i32> = Outcome::Fulfilled(20);
        assert_eq!(outcome.map(|x| x + 1).ok(), Some(21));

        let faulted: Outcome<i32> = Outcome::Faulted(anyhow!("boom"));
        assert!(faulted.map(|x| x + 1).is_faulted());
    }

    #[test]
    fn test_from_result() {
        let outcome: Outcome<i32> = Err::<i32, _>(std::fmt::Error).into();
        assert!(outcome.is_faulted());
        assert_eq!(outcome.value(), None);
    }
}
