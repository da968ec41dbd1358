//! Single-shot asynchronous tasks and their combinators.
//!
//! A [`Task`] settles exactly once into an [`Outcome`](crate::Outcome):
//! fulfilled with a value, faulted with an error, or cancelled. Combinators
//! consume a task and return a new one, so a pipeline is a chain of owned
//! values that does nothing until it is settled or run.
//!
//! # Zero-Cost by Default
//!
//! ```rust
//! use taskchain::prelude::*;
//!
//! # tokio_test::block_on(async {
//! // No heap allocation: the type is Map<Bind<Map<Ready<i32>, ..>, ..>, ..>
//! let task = fulfilled(42)
//!     .map(|x| x + 1)
//!     .bind(|x| fulfilled(x * 2))
//!     .map(|x| x.to_string());
//!
//! assert_eq!(task.run().await.unwrap(), "86");
//! # });
//! ```
//!
//! Use [`TaskExt::boxed`] when tasks of different types must share one
//! type: in a `Vec`, in match arms, or in recursive functions.
//!
//! # Failure Model
//!
//! - Combinators that only pass a failure along never change it.
//! - Handlers that are shown a failure see its root cause: an
//!   [`Aggregate`](crate::fault::Aggregate) envelope is unwrapped once.
//! - A cancelled task reaches handlers as a
//!   [`Cancelled`](crate::fault::Cancelled) error and leaves any combinator
//!   that observes failures as a fault carrying that error. Only
//!   `if_fulfilled`, which never looks at failures, leaves it in place.
//! - Panics are not caught.

pub mod boxed;
pub mod combinators;
pub mod conditional;
pub mod constructors;
pub mod ext;
mod handler;
pub mod partition;
pub mod prelude;
pub mod retry;
#[cfg(feature = "tracing")]
pub mod tracing;
mod trait_def;

// Re-export core trait
pub use trait_def::Task;

// Re-export extension trait
pub use ext::TaskExt;

// Re-export handler trait
pub use handler::HandlerResult;

// Re-export boxed types
pub use boxed::{BoxFuture, BoxedTask};

// Re-export all combinator types
pub use combinators::{
    Alt, AltWith, Ap, BiBind, BiMap, Bind, Delayed, Fault, FaultWith, Filter, FilterAsync,
    FilterElse, FilterWith, FromFn, FromFuture, IfFaulted, IfFaultedAsync, IfFulfilled,
    IfFulfilledAsync, Map, Ready, Recover, Spawned, Tap, TapAsync, TryMap,
};

// Re-export constructors
pub use constructors::{
    cancelled, cancelled_because, delayed, faulted, from_fn, from_future, from_join_handle,
    from_result, fulfilled, spawn,
};

// Re-export the retry engine
pub use retry::{retry, retry_fn, Retry};

// Re-export partition
pub use partition::{partition, Partition, Partitioned};

// Re-export conditional helpers
pub use conditional::{
    invoke_if, invoke_if_async, re_reject_if, reject_if, reject_if_async, resolve_if,
    resolve_if_with,
};

// Re-export tracing (when tracing feature is enabled)
#[cfg(feature = "tracing")]
pub use self::tracing::{Instrument, TaskTracingExt};
