//! Retry configuration and errors.
//!
//! The retry engine itself lives with the other task constructors
//! ([`retry`](crate::task::retry), [`retry_fn`](crate::task::retry_fn) and
//! [`TaskExt::bind_retry`](crate::task::TaskExt::bind_retry)). This module
//! holds the data it reads:
//!
//! - [`RetryPolicy`]: attempt budget, exponential backoff, retry predicate,
//!   retry callback and [`Jitter`]
//! - [`RetryExhausted`]: the error produced when the budget runs out
//! - [`PolicyError`]: returned by [`RetryPolicy::validate`]
//! - `RetryConfig` (feature `serde`): the serializable numeric settings
//!
//! # Quick Start
//!
//! ```rust
//! use std::time::Duration;
//! use taskchain::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let policy = RetryPolicy::new()
//!     .with_max_retries(3)
//!     .with_initial_interval(Duration::from_millis(10));
//!
//! let task = retry(|| fulfilled(42), policy);
//! assert_eq!(task.run().await.unwrap(), 42);
//! # });
//! ```
//!
//! # Jitter Support
//!
//! Enable the `jitter` feature for randomized jitter:
//!
//! ```toml
//! taskchain = { version = "...", features = ["jitter"] }
//! ```
//!
//! ```rust,ignore
//! use taskchain::retry::{Jitter, RetryPolicy};
//! use std::time::Duration;
//!
//! // Add up to 25% extra delay
//! let policy = RetryPolicy::new().with_jitter(Jitter::Proportional(0.25));
//! ```

mod error;
mod policy;

#[cfg(feature = "serde")]
mod config;

#[cfg(feature = "serde")]
pub use config::RetryConfig;
pub use error::{PolicyError, RetryExhausted};
pub use policy::{Jitter, JitterFn, RetryCallback, RetryPolicy, RetryPredicate};

#[cfg(test)]
mod tests;
