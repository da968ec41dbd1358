//! Testing utilities for task pipelines.
//!
//! This module provides assertion macros for [`Outcome`](crate::Outcome)s,
//! a call-counting probe for checking whether handlers ran, and, behind
//! the `proptest` feature, a strategy for generating outcomes.
//!
//! # Examples
//!
//! ## Assertion Macros
//!
//! ```rust
//! use taskchain::prelude::*;
//! use taskchain::{assert_faulted, assert_fulfilled};
//!
//! # tokio_test::block_on(async {
//! let value = assert_fulfilled!(fulfilled(42).settle().await);
//! assert_eq!(value, 42);
//!
//! assert_faulted!(faulted::<i32>(anyhow::anyhow!("boom")).settle().await, "boom");
//! # });
//! ```
//!
//! ## Call Counting
//!
//! ```rust
//! use taskchain::prelude::*;
//! use taskchain::testing::CallCounter;
//!
//! # tokio_test::block_on(async {
//! let counter = CallCounter::new();
//! let probe = counter.clone();
//!
//! let _ = faulted::<i32>(anyhow::anyhow!("boom"))
//!     .map(move |x| {
//!         probe.hit();
//!         x
//!     })
//!     .run()
//!     .await;
//!
//! assert_eq!(counter.count(), 0);
//! # });
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// A shareable counter for recording how often a handler ran.
///
/// Clones share the same count.
#[derive(Debug, Clone, Default)]
pub struct CallCounter {
    calls: Arc<AtomicUsize>,
}

impl CallCounter {
    /// Create a counter at zero.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one call.
    pub fn hit(&self) {
        self.calls.fetch_add(1, Ordering::SeqCst);
    }

    /// Number of calls recorded so far.
    pub fn count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Wrap `f` so each call is recorded before `f` runs.
    pub fn track<A, R, F>(&self, f: F) -> impl Fn(A) -> R + Clone + Send + Sync
    where
        F: Fn(A) -> R + Clone + Send + Sync,
    {
        let calls = self.calls.clone();
        move |arg| {
            calls.fetch_add(1, Ordering::SeqCst);
            f(arg)
        }
    }
}

/// Assert that an outcome is fulfilled and evaluate to its value.
///
/// With a second argument, also assert the value equals it.
///
/// # Example
///
/// ```rust
/// use taskchain::{assert_fulfilled, Outcome};
///
/// let outcome: Outcome<i32> = Outcome::Fulfilled(7);
/// assert_fulfilled!(outcome, 7);
/// ```
#[macro_export]
macro_rules! assert_fulfilled {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Fulfilled(value) => value,
            $crate::Outcome::Faulted(error) => {
                panic!("Expected Fulfilled, got Faulted: {:?}", error);
            }
            $crate::Outcome::Cancelled(cancelled) => {
                panic!("Expected Fulfilled, got Cancelled: {:?}", cancelled);
            }
        }
    };
    ($outcome:expr, $expected:expr) => {
        assert_eq!($crate::assert_fulfilled!($outcome), $expected)
    };
}

/// Assert that an outcome is faulted and evaluate to its error.
///
/// With a second argument, also assert the error's message equals it.
///
/// # Example
///
/// ```rust
/// use taskchain::{assert_faulted, Outcome};
///
/// let outcome: Outcome<i32> = Outcome::Faulted(anyhow::anyhow!("boom"));
/// let error = assert_faulted!(outcome);
/// assert_eq!(error.to_string(), "boom");
/// ```
#[macro_export]
macro_rules! assert_faulted {
    ($outcome:expr) => {
        match $outcome {
            $crate::Outcome::Faulted(error) => error,
            $crate::Outcome::Fulfilled(value) => {
                panic!("Expected Faulted, got Fulfilled: {:?}", value);
            }
            $crate::Outcome::Cancelled(cancelled) => {
                panic!("Expected Faulted, got Cancelled: {:?}", cancelled);
            }
        }
    };
    ($outcome:expr, $message:expr) => {
        assert_eq!($crate::assert_faulted!($outcome).to_string(), $message)
    };
}

/// Assert that an outcome is a cancellation, either directly or surfaced
/// as a fault by a combinator.
///
/// # Example
///
/// ```rust
/// use taskchain::fault::Cancelled;
/// use taskchain::{assert_cancelled, Outcome};
///
/// assert_cancelled!(Outcome::<i32>::Cancelled(Cancelled::new()));
/// assert_cancelled!(Outcome::<i32>::Faulted(anyhow::Error::new(Cancelled::new())));
/// ```
#[macro_export]
macro_rules! assert_cancelled {
    ($outcome:expr) => {
        match $outcome {
            outcome if outcome.is_cancellation() => {}
            other => {
                panic!("Expected a cancellation, got {:?}", other);
            }
        }
    };
}

#[cfg(feature = "proptest")]
use proptest::prelude::*;

/// A strategy producing every kind of outcome.
///
/// Faults carry an error built from an arbitrary message.
#[cfg(feature = "proptest")]
pub fn outcome<T>() -> BoxedStrategy<crate::Outcome<T>>
where
    T: Arbitrary + 'static,
{
    use crate::fault::{Cancelled, Error};
    use crate::Outcome;

    prop_oneof![
        any::<T>().prop_map(Outcome::Fulfilled),
        any::<String>().prop_map(|message| Outcome::Faulted(Error::msg(message))),
        Just(()).prop_map(|_| Outcome::Cancelled(Cancelled::new())),
    ]
    .boxed()
}
