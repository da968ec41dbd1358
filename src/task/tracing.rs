//! Tracing support for tasks.
//!
//! This module provides the `Instrument` combinator and `instrument` method
//! for wrapping tasks in tracing spans. Feature-gated behind
//! `#[cfg(feature = "tracing")]`.

use crate::outcome::Outcome;
use crate::task::trait_def::Task;

/// A task wrapped in a tracing span.
///
/// Created by [`TaskTracingExt::instrument`].
#[derive(Debug)]
pub struct Instrument<Inner> {
    pub(crate) inner: Inner,
    pub(crate) span: tracing::Span,
}

impl<Inner> Task for Instrument<Inner>
where
    Inner: Task,
{
    type Output = Inner::Output;

    async fn settle(self) -> Outcome<Inner::Output> {
        use tracing::Instrument as _;
        self.inner.settle().instrument(self.span).await
    }
}

/// Extension trait for adding tracing instrumentation to tasks.
///
/// This trait is only available when the `tracing` feature is enabled.
pub trait TaskTracingExt: Task {
    /// Wrap this task in a tracing span.
    ///
    /// The span is entered whenever the task is polled, so log events from
    /// the retry engine and from handlers inside the task carry its fields.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskchain::prelude::*;
    /// use tracing::info_span;
    ///
    /// # tokio_test::block_on(async {
    /// let order_id = 17;
    /// let task = fulfilled(order_id)
    ///     .map(|id| id * 10)
    ///     .instrument(info_span!("load_order", order_id));
    ///
    /// assert_eq!(task.run().await.unwrap(), 170);
    /// # });
    /// ```
    fn instrument(self, span: tracing::Span) -> Instrument<Self> {
        Instrument { inner: self, span }
    }
}

impl<T: Task> TaskTracingExt for T {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::task::constructors::{faulted, fulfilled};
    use crate::task::ext::TaskExt;
    use anyhow::anyhow;

    #[tokio::test]
    async fn test_instrument_returns_value() {
        let task = fulfilled(42).instrument(tracing::info_span!("test_span"));
        assert_eq!(task.run().await.unwrap(), 42);
    }

    #[tokio::test]
    async fn test_error_in_span_propagates() {
        let task = faulted::<i32>(anyhow!("oops")).instrument(tracing::info_span!("failing"));
        assert_eq!(task.run().await.unwrap_err().to_string(), "oops");
    }

    #[tokio::test]
    async fn test_composition_with_instrument() {
        let task = fulfilled(5)
            .instrument(tracing::debug_span!("step1"))
            .map(|x| x * 2)
            .instrument(tracing::debug_span!("step2"))
            .bind(|x| fulfilled(x + 10).instrument(tracing::debug_span!("step3")));

        assert_eq!(task.run().await.unwrap(), 20);
    }
}
