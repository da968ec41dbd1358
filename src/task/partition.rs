//! Partition - settle many tasks and split their outcomes.

use crate::fault::Error;
use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// The outcomes of a [`Partition`], split by branch.
///
/// Each list keeps the relative order of the input tasks. Errors are
/// unwrapped of any envelope; cancelled tasks appear in `faulted` as
/// [`Cancelled`](crate::fault::Cancelled) errors.
#[derive(Debug)]
pub struct Partitioned<T> {
    /// Errors from tasks that did not fulfill.
    pub faulted: Vec<Error>,
    /// Values from tasks that fulfilled.
    pub fulfilled: Vec<T>,
}

impl<T> Partitioned<T> {
    /// Split into `(faulted, fulfilled)`.
    pub fn into_parts(self) -> (Vec<Error>, Vec<T>) {
        (self.faulted, self.fulfilled)
    }
}

/// A task that settles every input task concurrently and partitions the
/// results.
///
/// It never short-circuits: every task is settled regardless of how the
/// others end, and the partition task itself always fulfills.
pub struct Partition<Tk> {
    pub(crate) tasks: Vec<Tk>,
}

impl<Tk> std::fmt::Debug for Partition<Tk> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Partition")
            .field("tasks", &self.tasks.len())
            .finish()
    }
}

impl<Tk: Task> Task for Partition<Tk> {
    type Output = Partitioned<Tk::Output>;

    async fn settle(self) -> Outcome<Partitioned<Tk::Output>> {
        let settling: Vec<_> = self.tasks.into_iter().map(Task::settle).collect();
        let outcomes = futures::future::join_all(settling).await;

        let mut faulted = Vec::new();
        let mut fulfilled = Vec::new();

        for outcome in outcomes {
            match outcome.into_exposed() {
                Ok(value) => fulfilled.push(value),
                Err(error) => faulted.push(error),
            }
        }

        Outcome::Fulfilled(Partitioned { faulted, fulfilled })
    }
}

/// Settle all `tasks` and split them into errors and values.
///
/// Use [`BoxedTask`](crate::task::BoxedTask) to partition tasks of
/// different types.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let tasks = vec![
///     fulfilled("a").boxed(),
///     faulted(anyhow::anyhow!("E1")).boxed(),
///     fulfilled("b").boxed(),
///     faulted(anyhow::anyhow!("E2")).boxed(),
/// ];
///
/// let (faulted, fulfilled) = partition(tasks).run().await.unwrap().into_parts();
/// assert_eq!(fulfilled, vec!["a", "b"]);
/// let messages: Vec<_> = faulted.iter().map(|e| e.to_string()).collect();
/// assert_eq!(messages, vec!["E1", "E2"]);
/// # });
/// ```
pub fn partition<I, Tk>(tasks: I) -> Partition<Tk>
where
    I: IntoIterator<Item = Tk>,
    Tk: Task,
{
    Partition {
        tasks: tasks.into_iter().collect(),
    }
}
