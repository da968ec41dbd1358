//! # Taskchain
//!
//! Composable combinators and exponential-backoff retry for single-shot
//! async tasks.
//!
//! A [`Task`] settles exactly once into an [`Outcome`]: fulfilled with a
//! value, faulted with an error, or cancelled. Pipelines are built by
//! chaining combinators from [`TaskExt`]; nothing runs until the pipeline
//! is settled or run.
//!
//! ## Quick Example
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
//! let greeting = retry(|| fulfilled("world"), policy)
//!     .filter(|name| !name.is_empty(), anyhow::anyhow!("empty name"))
//!     .map(|name| format!("hello, {name}"))
//!     .if_faulted(|error| eprintln!("lookup failed: {error}"))
//!     .run()
//!     .await;
//!
//! assert_eq!(greeting.unwrap(), "hello, world");
//! # });
//! ```
//!
//! ## Modules
//!
//! - [`task`]: the [`Task`] trait, combinators, constructors, the retry
//!   engine, `partition` and the conditional helpers
//! - [`retry`]: [`RetryPolicy`] and [`RetryExhausted`]
//! - [`fault`]: the error model shared by every combinator
//! - [`functions`]: small function-level building blocks
//! - [`testing`]: assertion macros and probes for tests

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

pub mod fault;
pub mod functions;
pub mod outcome;
pub mod retry;
pub mod task;
pub mod testing;

// Re-exports
pub use fault::{Cancelled, Error};
pub use outcome::Outcome;
pub use retry::{RetryExhausted, RetryPolicy};
pub use task::{BoxedTask, Task, TaskExt};

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::task::prelude::*;
}
