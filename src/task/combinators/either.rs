//! Task support for `futures::future::Either`.
//!
//! Lets a function return one of two task types without boxing.

use futures::future::Either;

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

impl<A, B> Task for Either<A, B>
where
    A: Task,
    B: Task<Output = A::Output>,
{
    type Output = A::Output;

    async fn settle(self) -> Outcome<A::Output> {
        match self {
            Either::Left(task) => task.settle().await,
            Either::Right(task) => task.settle().await,
        }
    }
}
