//! Ready - a task that is already settled.

use std::future::Future;

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A task whose outcome is known up front.
///
/// Created by [`fulfilled`](crate::task::fulfilled),
/// [`faulted`](crate::task::faulted), [`cancelled`](crate::task::cancelled)
/// and [`from_result`](crate::task::from_result).
#[derive(Debug)]
pub struct Ready<T> {
    pub(crate) outcome: Outcome<T>,
}

impl<T> Ready<T> {
    /// Create a ready task from an outcome.
    pub fn new(outcome: Outcome<T>) -> Self {
        Ready { outcome }
    }
}

impl<T: Send> Task for Ready<T> {
    type Output = T;

    fn settle(self) -> impl Future<Output = Outcome<T>> + Send {
        std::future::ready(self.outcome)
    }
}
