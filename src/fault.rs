//! Error model shared by every combinator.
//!
//! Tasks fail with an opaque [`Error`] (an `anyhow::Error`). Two error types
//! get special treatment at combinator boundaries:
//!
//! - [`Cancelled`] is the cause carried by a task that was cancelled before
//!   it produced a value. Combinators surface it as a fault so error
//!   handlers see it like any other failure.
//! - [`Aggregate`] is an envelope around other errors. Before an error is
//!   handed to user code it is unwrapped exactly once with
//!   [`unwrap_envelope`], so handlers observe the root cause rather than
//!   the wrapper.
//!
//! # Example
//!
//! ```rust
//! use anyhow::anyhow;
//! use taskchain::fault::{unwrap_envelope, Aggregate};
//!
//! let wrapped = anyhow::Error::new(Aggregate::new(vec![anyhow!("disk full")]));
//! assert_eq!(unwrap_envelope(wrapped).to_string(), "disk full");
//! ```

use std::error::Error as StdError;
use std::fmt;

pub use anyhow::Error;

/// The cause carried by a cancelled task.
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("task was cancelled{}", reason_suffix(.reason))]
pub struct Cancelled {
    reason: Option<String>,
}

fn reason_suffix(reason: &Option<String>) -> String {
    match reason {
        Some(reason) => format!(": {reason}"),
        None => String::new(),
    }
}

impl Cancelled {
    /// A cancellation with no recorded reason.
    pub fn new() -> Self {
        Self { reason: None }
    }

    /// A cancellation that records why it happened.
    pub fn because(reason: impl Into<String>) -> Self {
        Self {
            reason: Some(reason.into()),
        }
    }

    /// The recorded reason, if any.
    pub fn reason(&self) -> Option<&str> {
        self.reason.as_deref()
    }
}

/// An envelope holding one or more inner errors.
///
/// Only the first inner error is exposed by [`unwrap_envelope`]. An empty
/// envelope is passed through as-is.
pub struct Aggregate {
    errors: Vec<Error>,
}

impl Aggregate {
    /// Wrap the given errors.
    pub fn new(errors: Vec<Error>) -> Self {
        Self { errors }
    }

    /// Wrap a single error.
    pub fn single(error: Error) -> Self {
        Self {
            errors: vec![error],
        }
    }

    /// All inner errors, in the order they were recorded.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    /// Consume the envelope, returning its inner errors.
    pub fn into_errors(self) -> Vec<Error> {
        self.errors
    }
}

impl fmt::Debug for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Aggregate")
            .field("errors", &self.errors)
            .finish()
    }
}

impl fmt::Display for Aggregate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "one or more errors occurred ({})", self.errors.len())
    }
}

impl StdError for Aggregate {
    fn source(&self) -> Option<&(dyn StdError + 'static)> {
        self.errors
            .first()
            .map(|e| &**e as &(dyn StdError + 'static))
    }
}

/// Unwrap one level of [`Aggregate`] envelope.
///
/// Returns the first inner error when `error` is a non-empty envelope,
/// otherwise returns `error` unchanged. Nested envelopes are only peeled
/// once.
pub fn unwrap_envelope(error: Error) -> Error {
    let has_inner = error
        .downcast_ref::<Aggregate>()
        .is_some_and(|aggregate| !aggregate.errors.is_empty());
    if !has_inner {
        return error;
    }

    match error.downcast::<Aggregate>() {
        Ok(aggregate) => match aggregate.errors.into_iter().next() {
            Some(inner) => inner,
            None => Error::new(Aggregate::new(Vec::new())),
        },
        Err(error) => error,
    }
}

/// Borrowing form of [`unwrap_envelope`].
///
/// Used where a handler observes the error by reference while the task
/// keeps the original error for propagation.
pub fn unwrap_envelope_ref(error: &Error) -> &Error {
    match error.downcast_ref::<Aggregate>() {
        Some(aggregate) => aggregate.errors.first().unwrap_or(error),
        None => error,
    }
}

/// Whether `error` is a surfaced cancellation.
pub fn is_cancellation(error: &Error) -> bool {
    error.is::<Cancelled>()
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    #[test]
    fn test_cancelled_display() {
        assert_eq!(Cancelled::new().to_string(), "task was cancelled");
        assert_eq!(
            Cancelled::because("shutdown").to_string(),
            "task was cancelled: shutdown"
        );
        assert_eq!(Cancelled::because("shutdown").reason(), Some("shutdown"));
    }

    #[test]
    fn test_unwrap_envelope_exposes_first_inner() {
        let wrapped = Error::new(Aggregate::new(vec![anyhow!("first"), anyhow!("second")]));
        assert_eq!(unwrap_envelope(wrapped).to_string(), "first");
    }

    #[test]
    fn test_unwrap_envelope_only_peels_one_level() {
        let inner = Error::new(Aggregate::single(anyhow!("root")));
        let outer = Error::new(Aggregate::single(inner));

        let once = unwrap_envelope(outer);
        assert!(once.is::<Aggregate>());
        assert_eq!(unwrap_envelope(once).to_string(), "root");
    }

    #[test]
    fn test_empty_envelope_passes_through() {
        let empty = Error::new(Aggregate::new(Vec::new()));
        let result = unwrap_envelope(empty);
        assert!(result.is::<Aggregate>());
    }

    #[test]
    fn test_plain_error_is_unchanged() {
        let error = anyhow!("plain");
        assert_eq!(unwrap_envelope(error).to_string(), "plain");
    }

    #[test]
    fn test_unwrap_envelope_ref() {
        let wrapped = Error::new(Aggregate::single(anyhow!("inner")));
        assert_eq!(unwrap_envelope_ref(&wrapped).to_string(), "inner");

        let plain = anyhow!("plain");
        assert!(std::ptr::eq(unwrap_envelope_ref(&plain), &plain));
    }

    #[test]
    fn test_aggregate_source_is_first_error() {
        let aggregate = Aggregate::new(vec![anyhow!("cause")]);
        let source = aggregate.source().map(|e| e.to_string());
        assert_eq!(source.as_deref(), Some("cause"));
    }

    #[test]
    fn test_is_cancellation() {
        assert!(is_cancellation(&Error::new(Cancelled::new())));
        assert!(!is_cancellation(&anyhow!("other")));
    }
}
