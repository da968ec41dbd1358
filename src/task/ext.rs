//! Extension trait providing combinator methods for all Tasks.
//!
//! The `TaskExt` trait is automatically implemented for all types that
//! implement `Task`. It provides the combinator algebra (`map`, `bind`,
//! `bimap`, `bibind`, `alt`, `ap`, `filter`, `fault`), the side-effect
//! combinators (`if_fulfilled`, `if_faulted`, `tap`) and the ways to run a
//! task (`run`, `boxed`).

use std::future::Future;
use std::marker::PhantomData;

use crate::fault::Error;
use crate::functions::identity;
use crate::retry::RetryPolicy;
use crate::task::boxed::BoxedTask;
use crate::task::combinators::{
    Alt, AltWith, Ap, BiBind, BiMap, Bind, Fault, FaultWith, Filter, FilterAsync, FilterElse,
    FilterWith, IfFaulted, IfFaultedAsync, IfFulfilled, IfFulfilledAsync, Map, Ready, Recover,
    Tap, TapAsync, TryMap,
};
use crate::task::constructors::fulfilled;
use crate::task::handler::HandlerResult;
use crate::task::retry::retry;
use crate::task::trait_def::Task;

/// Extension trait providing combinator methods for all Tasks.
///
/// This trait is automatically implemented for all types that implement
/// `Task`. You don't need to implement this trait yourself.
///
/// Every combinator consumes `self` and returns a new task; nothing runs
/// until the resulting task is settled.
///
/// # Example
///
/// ```rust
/// use taskchain::prelude::*;
///
/// # tokio_test::block_on(async {
/// let task = fulfilled(21)
///     .map(|x| x * 2)
///     .bind(|x| fulfilled(x + 1))
///     .map_err(|e| e.context("while computing"));
///
/// assert_eq!(task.run().await.unwrap(), 43);
/// # });
/// ```
pub trait TaskExt: Task {
    /// Transform the fulfilled value.
    ///
    /// # Example
    ///
    /// ```rust
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// assert_eq!(fulfilled(21).map(|x| x * 2).run().await.unwrap(), 42);
    /// # });
    /// ```
    fn map<U, F>(self, f: F) -> Map<Self, F>
    where
        F: FnOnce(Self::Output) -> U + Send,
        U: Send,
    {
        Map { inner: self, f }
    }

    /// Transform the fulfilled value with a function that may fail.
    ///
    /// An `Err` from `f` faults the task with exactly that error.
    ///
    /// ```rust
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let task = fulfilled("42").try_map(|s| s.parse::<i32>());
    /// assert_eq!(task.run().await.unwrap(), 42);
    /// # });
    /// ```
    fn try_map<U, E, F>(self, f: F) -> TryMap<Self, F>
    where
        F: FnOnce(Self::Output) -> Result<U, E> + Send,
        U: Send,
        E: Into<Error>,
    {
        TryMap { inner: self, f }
    }

    /// Chain a dependent task.
    ///
    /// If this task fulfills, `f` builds the next task and its outcome
    /// becomes the outcome of the chain. If this task fails, `f` is never
    /// called and the error passes through.
    fn bind<Next, F>(self, f: F) -> Bind<Self, F>
    where
        Next: Task,
        F: FnOnce(Self::Output) -> Next + Send,
    {
        Bind { inner: self, f }
    }

    /// Transform both branches. The error branch stays an error.
    fn bimap<U, FE, FV>(self, on_faulted: FE, on_fulfilled: FV) -> BiMap<Self, FE, FV>
    where
        FE: FnOnce(Error) -> Error + Send,
        FV: FnOnce(Self::Output) -> U + Send,
        U: Send,
    {
        BiMap {
            inner: self,
            on_faulted,
            on_fulfilled,
        }
    }

    /// Chain a task from either branch. The error branch may recover.
    fn bibind<TE, TV, FE, FV>(self, on_faulted: FE, on_fulfilled: FV) -> BiBind<Self, FE, FV>
    where
        TE: Task<Output = TV::Output>,
        TV: Task,
        FE: FnOnce(Error) -> TE + Send,
        FV: FnOnce(Self::Output) -> TV + Send,
    {
        BiBind {
            inner: self,
            on_faulted,
            on_fulfilled,
        }
    }

    /// Transform the error, leaving values alone.
    ///
    /// `f` sees the root cause of the failure, with any envelope unwrapped.
    ///
    /// ```rust
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let task = faulted::<i32>(anyhow::anyhow!("refused"))
    ///     .map_err(|e| e.context("connecting to db"));
    /// assert_eq!(task.run().await.unwrap_err().to_string(), "connecting to db");
    /// # });
    /// ```
    #[allow(clippy::type_complexity)]
    fn map_err<F>(self, f: F) -> BiMap<Self, F, fn(Self::Output) -> Self::Output>
    where
        F: FnOnce(Error) -> Error + Send,
    {
        BiMap {
            inner: self,
            on_faulted: f,
            on_fulfilled: identity::<Self::Output>,
        }
    }

    /// Replace a failure with a value computed from its root cause.
    fn recover<F>(self, f: F) -> Recover<Self, F>
    where
        F: FnOnce(Error) -> Self::Output + Send,
    {
        Recover { inner: self, f }
    }

    /// Replace a failure with the outcome of a task built from its root
    /// cause.
    ///
    /// Pairs with [`resolve_if`](crate::task::resolve_if) and
    /// [`re_reject_if`](crate::task::re_reject_if).
    #[allow(clippy::type_complexity)]
    fn recover_with<Other, F>(self, f: F) -> BiBind<Self, F, fn(Self::Output) -> Ready<Self::Output>>
    where
        Other: Task<Output = Self::Output>,
        F: FnOnce(Error) -> Other + Send,
    {
        BiBind {
            inner: self,
            on_faulted: f,
            on_fulfilled: fulfilled::<Self::Output>,
        }
    }

    /// Use `other` if this task does not fulfill.
    ///
    /// Cancellation is treated like any other failure.
    fn alt<Other>(self, other: Other) -> Alt<Self, Other>
    where
        Other: Task<Output = Self::Output>,
    {
        Alt { inner: self, other }
    }

    /// Use the task built by `supplier` if this task does not fulfill.
    fn alt_with<Other, F>(self, supplier: F) -> AltWith<Self, F>
    where
        Other: Task<Output = Self::Output>,
        F: FnOnce() -> Other + Send,
    {
        AltWith {
            inner: self,
            supplier,
        }
    }

    /// Apply the function produced by `fn_task` to this task's value.
    ///
    /// `fn_task` is settled first; if it fails, this task is never settled.
    ///
    /// ```rust
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let add_one = fulfilled(|x: i32| x + 1);
    /// assert_eq!(fulfilled(1).ap(add_one).run().await.unwrap(), 2);
    /// # });
    /// ```
    fn ap<U, G>(self, fn_task: G) -> Ap<Self, G, U>
    where
        G: Task,
        G::Output: FnOnce(Self::Output) -> U,
        U: Send,
    {
        Ap {
            inner: self,
            fn_task,
            _marker: PhantomData,
        }
    }

    /// Fault with `error` if the fulfilled value fails `predicate`.
    fn filter<P>(self, predicate: P, error: impl Into<Error>) -> Filter<Self, P>
    where
        P: FnOnce(&Self::Output) -> bool + Send,
    {
        Filter {
            inner: self,
            predicate,
            error: error.into(),
        }
    }

    /// Fault with the error from `supplier` if the fulfilled value fails
    /// `predicate`.
    fn filter_else<P, S>(self, predicate: P, supplier: S) -> FilterElse<Self, P, S>
    where
        P: FnOnce(&Self::Output) -> bool + Send,
        S: FnOnce() -> Error + Send,
    {
        FilterElse {
            inner: self,
            predicate,
            supplier,
        }
    }

    /// Fault with an error built from the value if it fails `predicate`.
    fn filter_with<P, R>(self, predicate: P, rejection: R) -> FilterWith<Self, P, R>
    where
        P: FnOnce(&Self::Output) -> bool + Send,
        R: FnOnce(Self::Output) -> Error + Send,
    {
        FilterWith {
            inner: self,
            predicate,
            rejection,
        }
    }

    /// Filter with an async predicate and an async rejection builder.
    ///
    /// The predicate's future must not borrow the value.
    fn filter_async<P, PF, R, RF>(self, predicate: P, rejection: R) -> FilterAsync<Self, P, R>
    where
        P: FnOnce(&Self::Output) -> PF + Send,
        PF: Future<Output = bool> + Send,
        R: FnOnce(Self::Output) -> RF + Send,
        RF: Future<Output = Error> + Send,
    {
        FilterAsync {
            inner: self,
            predicate,
            rejection,
        }
    }

    /// Fault with `error`, discarding a fulfilled value.
    fn fault(self, error: impl Into<Error>) -> Fault<Self> {
        Fault {
            inner: self,
            error: error.into(),
        }
    }

    /// Fault with an error built from the fulfilled value.
    fn fault_with<F>(self, f: F) -> FaultWith<Self, F>
    where
        F: FnOnce(Self::Output) -> Error + Send,
    {
        FaultWith { inner: self, f }
    }

    /// Run a side effect on the fulfilled value.
    ///
    /// The handler returns `()` or a `Result`; an `Err` faults the task.
    fn if_fulfilled<F, H>(self, f: F) -> IfFulfilled<Self, F>
    where
        F: FnOnce(&Self::Output) -> H + Send,
        H: HandlerResult,
    {
        IfFulfilled { inner: self, f }
    }

    /// Run an async side effect on the fulfilled value.
    ///
    /// The task does not settle until the handler's future has completed.
    ///
    /// ```rust
    /// use std::sync::atomic::{AtomicBool, Ordering};
    /// use std::sync::Arc;
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let saved = Arc::new(AtomicBool::new(false));
    /// let flag = saved.clone();
    ///
    /// let task = fulfilled(3).if_fulfilled_async(move |_| async move {
    ///     tokio::task::yield_now().await;
    ///     flag.store(true, Ordering::SeqCst);
    /// });
    ///
    /// assert_eq!(task.run().await.unwrap(), 3);
    /// assert!(saved.load(Ordering::SeqCst));
    /// # });
    /// ```
    fn if_fulfilled_async<F, Fut>(self, f: F) -> IfFulfilledAsync<Self, F>
    where
        F: FnOnce(&Self::Output) -> Fut + Send,
        Fut: Future + Send,
        Fut::Output: HandlerResult,
    {
        IfFulfilledAsync { inner: self, f }
    }

    /// Run a side effect on the root cause of a failure.
    ///
    /// The original failure is kept unless the handler itself fails.
    fn if_faulted<F, H>(self, f: F) -> IfFaulted<Self, F>
    where
        F: FnOnce(&Error) -> H + Send,
        H: HandlerResult,
    {
        IfFaulted { inner: self, f }
    }

    /// Run an async side effect on the root cause of a failure.
    fn if_faulted_async<F, Fut>(self, f: F) -> IfFaultedAsync<Self, F>
    where
        F: FnOnce(&Error) -> Fut + Send,
        Fut: Future + Send,
        Fut::Output: HandlerResult,
    {
        IfFaultedAsync { inner: self, f }
    }

    /// Run `on_fulfilled` or `on_faulted`, whichever matches the outcome.
    ///
    /// `on_faulted` is not called when `on_fulfilled` fails.
    fn tap<FV, HV, FE, HE>(self, on_fulfilled: FV, on_faulted: FE) -> Tap<Self, FV, FE>
    where
        FV: FnOnce(&Self::Output) -> HV + Send,
        HV: HandlerResult,
        FE: FnOnce(&Error) -> HE + Send,
        HE: HandlerResult,
    {
        Tap {
            inner: self,
            on_fulfilled,
            on_faulted,
        }
    }

    /// Async form of [`tap`](TaskExt::tap).
    fn tap_async<FV, FutV, FE, FutE>(self, on_fulfilled: FV, on_faulted: FE) -> TapAsync<Self, FV, FE>
    where
        FV: FnOnce(&Self::Output) -> FutV + Send,
        FutV: Future + Send,
        FutV::Output: HandlerResult,
        FE: FnOnce(&Error) -> FutE + Send,
        FutE: Future + Send,
        FutE::Output: HandlerResult,
    {
        TapAsync {
            inner: self,
            on_fulfilled,
            on_faulted,
        }
    }

    /// Once this task fulfills, retry the task built from its value.
    ///
    /// Each attempt gets a clone of the value. A failure of this task
    /// itself is not retried.
    ///
    /// ```rust
    /// use std::time::Duration;
    /// use taskchain::prelude::*;
    ///
    /// # tokio_test::block_on(async {
    /// let policy = RetryPolicy::new().with_initial_interval(Duration::from_millis(1));
    /// let task = fulfilled("https://example.invalid".to_string())
    ///     .bind_retry(|url| fulfilled(url.len()), policy);
    /// assert_eq!(task.run().await.unwrap(), 23);
    /// # });
    /// ```
    fn bind_retry<F, Tk>(self, mut f: F, policy: RetryPolicy) -> impl Task<Output = Tk::Output>
    where
        Self::Output: Clone,
        F: FnMut(Self::Output) -> Tk + Send,
        Tk: Task,
    {
        self.bind(move |value| retry(move || f(value.clone()), policy))
    }

    /// Convert to a boxed task for type erasure.
    ///
    /// Use this when you need to:
    /// - Store tasks in collections
    /// - Return different task types from match arms
    /// - Create recursive tasks
    fn boxed(self) -> BoxedTask<Self::Output>
    where
        Self: 'static,
        Self::Output: 'static,
    {
        BoxedTask::new(self)
    }

    /// Settle the task and convert its outcome to a `Result`.
    ///
    /// A cancellation is returned as an `Err` carrying
    /// [`Cancelled`](crate::fault::Cancelled).
    fn run(self) -> impl Future<Output = Result<Self::Output, Error>> + Send {
        async move { self.settle().await.into_result() }
    }
}

// Blanket implementation for all Task types
impl<T: Task> TaskExt for T {}
