//! Delayed - defer a task until a delay has elapsed.

use std::time::Duration;

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A task that waits, then builds and settles the task produced by a
/// supplier.
///
/// The wait uses the tokio timer, so no thread is blocked.
pub struct Delayed<F> {
    pub(crate) supplier: F,
    pub(crate) delay: Duration,
}

impl<F> std::fmt::Debug for Delayed<F> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Delayed")
            .field("supplier", &"<function>")
            .field("delay", &self.delay)
            .finish()
    }
}

impl<F, Tk> Task for Delayed<F>
where
    F: FnOnce() -> Tk + Send,
    Tk: Task,
{
    type Output = Tk::Output;

    async fn settle(self) -> Outcome<Tk::Output> {
        tokio::time::sleep(self.delay).await;
        (self.supplier)().settle().await
    }
}
