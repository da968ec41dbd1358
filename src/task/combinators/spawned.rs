//! Spawned - a task running on the tokio runtime.

use tokio::task::{AbortHandle, JoinError, JoinHandle};

use crate::fault::{Cancelled, Error};
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A task backed by a tokio [`JoinHandle`].
///
/// Aborting the underlying tokio task settles this task as
/// [`Outcome::Cancelled`]; a panic settles it as a fault carrying the
/// [`JoinError`].
#[derive(Debug)]
pub struct Spawned<T> {
    pub(crate) handle: JoinHandle<Result<T, Error>>,
}

impl<T> Spawned<T> {
    /// Wrap an existing join handle.
    pub fn new(handle: JoinHandle<Result<T, Error>>) -> Self {
        Spawned { handle }
    }

    /// Cancel the underlying tokio task.
    pub fn abort(&self) {
        self.handle.abort();
    }

    /// A handle that can cancel the task after it has been moved into a
    /// pipeline.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }
}

fn settle_join<T>(joined: Result<Result<T, Error>, JoinError>) -> Outcome<T> {
    match joined {
        Ok(result) => result.into(),
        Err(error) if error.is_cancelled() => Outcome::Cancelled(Cancelled::because("task aborted")),
        Err(error) => Outcome::Faulted(Error::new(error)),
    }
}

impl<T: Send + 'static> Task for Spawned<T> {
    type Output = T;

    async fn settle(self) -> Outcome<T> {
        settle_join(self.handle.await)
    }
}
