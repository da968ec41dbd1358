//! BoxedTask - type-erased task for opt-in boxing.
//!
//! Use `BoxedTask` when you need to:
//! - Store different task types in a collection
//! - Return different tasks from match arms
//! - Create recursive task functions

use std::future::Future;
use std::pin::Pin;

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A boxed future that is Send.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// A type-erased task.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// fn countdown(n: i32) -> BoxedTask<i32> {
///     if n <= 0 {
///         fulfilled(0).boxed()
///     } else {
///         fulfilled(n)
///             .bind(move |x| countdown(x - 1).map(move |sum| x + sum))
///             .boxed()
///     }
/// }
///
/// # tokio_test::block_on(async {
/// assert_eq!(countdown(4).run().await.unwrap(), 10);
/// # });
/// ```
pub struct BoxedTask<T> {
    future: BoxFuture<'static, Outcome<T>>,
}

impl<T> std::fmt::Debug for BoxedTask<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedTask")
            .field("future", &"<future>")
            .finish()
    }
}

impl<T: Send + 'static> BoxedTask<T> {
    /// Box any task.
    ///
    /// Nothing runs until the boxed task is settled.
    pub fn new<Tk>(task: Tk) -> Self
    where
        Tk: Task<Output = T> + 'static,
    {
        BoxedTask {
            future: Box::pin(async move { task.settle().await }),
        }
    }
}

impl<T: Send> Task for BoxedTask<T> {
    type Output = T;

    fn settle(self) -> impl Future<Output = Outcome<T>> + Send {
        self.future
    }
}
