//! Prelude module for convenient imports.
//!
//! Re-exports the traits, constructors and helpers needed to build and run
//! task pipelines with a single `use` statement.
//!
//! # Example
//!
//! ```rust
//! use taskchain::prelude::*;
//!
//! # tokio_test::block_on(async {
//! let result = fulfilled(42)
//!     .map(|x| x * 2)
//!     .bind(|x| fulfilled(x + 1))
//!     .run()
//!     .await;
//!
//! assert_eq!(result.unwrap(), 85);
//! # });
//! ```

// Traits
pub use crate::task::ext::TaskExt;
pub use crate::task::handler::HandlerResult;
pub use crate::task::trait_def::Task;

// Outcome and errors
pub use crate::fault::Error;
pub use crate::outcome::Outcome;

// Boxed Task
pub use crate::task::boxed::BoxedTask;

// Constructors
pub use crate::task::constructors::{
    cancelled, cancelled_because, delayed, faulted, from_fn, from_future, from_join_handle,
    from_result, fulfilled, spawn,
};

// Retry
pub use crate::retry::{Jitter, RetryExhausted, RetryPolicy};
pub use crate::task::retry::{retry, retry_fn};

// Partition
pub use crate::task::partition::{partition, Partitioned};

// Conditional helpers
pub use crate::task::conditional::{
    invoke_if, invoke_if_async, re_reject_if, reject_if, reject_if_async, resolve_if,
    resolve_if_with,
};

// Tracing
#[cfg(feature = "tracing")]
pub use crate::task::tracing::TaskTracingExt;
