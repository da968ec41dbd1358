//! Integration tests for retry functionality.

use super::*;
use crate::fault::{Aggregate, Error};
use crate::task::combinators::Ready;
use crate::task::prelude::*;
use anyhow::anyhow;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

fn fast_policy(max_retries: u32) -> RetryPolicy {
    RetryPolicy::new()
        .with_max_retries(max_retries)
        .with_initial_interval(Duration::from_millis(1))
}

fn flaky(attempts: Arc<AtomicU32>, failures: u32) -> impl FnMut() -> Ready<&'static str> + Send {
    move || {
        let n = attempts.fetch_add(1, Ordering::SeqCst);
        if n < failures {
            faulted(anyhow!("transient failure"))
        } else {
            fulfilled("success")
        }
    }
}

#[tokio::test]
async fn test_retry_succeeds_on_third_attempt() {
    let attempts = Arc::new(AtomicU32::new(0));

    let result = retry(flaky(attempts.clone(), 2), fast_policy(5)).run().await;

    assert_eq!(result.unwrap(), "success");
    assert_eq!(attempts.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_retry_exhausted_invokes_supplier_max_retries_times() {
    for max_retries in [1, 2, 3, 5] {
        let attempts = Arc::new(AtomicU32::new(0));

        let error = retry(flaky(attempts.clone(), u32::MAX), fast_policy(max_retries))
            .run()
            .await
            .unwrap_err();

        let exhausted = error.downcast_ref::<RetryExhausted>().unwrap();
        assert_eq!(exhausted.attempts_made, max_retries);
        assert_eq!(attempts.load(Ordering::SeqCst), max_retries);
    }
}

#[tokio::test]
async fn test_retry_exhausted_message() {
    let error = retry(|| faulted::<()>(anyhow!("always fails")), fast_policy(3))
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "Retries exhausted after 3 attempts");
    let cause = error.downcast_ref::<RetryExhausted>().unwrap().cause().unwrap();
    assert_eq!(cause.to_string(), "always fails");
}

#[tokio::test(start_paused = true)]
async fn test_retry_waits_backoff_between_attempts() {
    let start = tokio::time::Instant::now();
    let policy = RetryPolicy::new()
        .with_max_retries(3)
        .with_initial_interval(Duration::from_millis(10))
        .with_backoff_rate(2.0);

    let result = retry(|| faulted::<()>(anyhow!("down")), policy).run().await;

    assert!(result.is_err());
    assert!(start.elapsed() >= Duration::from_millis(70));
}

#[tokio::test(start_paused = true)]
async fn test_retry_success_skips_remaining_delays() {
    let start = tokio::time::Instant::now();
    let attempts = Arc::new(AtomicU32::new(0));
    let policy = RetryPolicy::new()
        .with_max_retries(5)
        .with_initial_interval(Duration::from_millis(10));

    retry(flaky(attempts, 1), policy).run().await.unwrap();

    let elapsed = start.elapsed();
    assert!(elapsed >= Duration::from_millis(10));
    assert!(elapsed < Duration::from_millis(30));
}

#[tokio::test]
async fn test_should_retry_short_circuits() {
    let attempts = Arc::new(AtomicU32::new(0));
    let policy = fast_policy(5).with_should_retry(|e| e.to_string() != "fatal");

    let counter = attempts.clone();
    let error = retry(
        move || {
            counter.fetch_add(1, Ordering::SeqCst);
            faulted::<()>(anyhow!("fatal"))
        },
        policy,
    )
    .run()
    .await
    .unwrap_err();

    assert_eq!(error.to_string(), "fatal");
    assert!(!error.is::<RetryExhausted>());
    assert_eq!(attempts.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_should_retry_sees_unwrapped_error() {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let record = seen.clone();
    let policy = fast_policy(2).with_should_retry(move |e| {
        record.lock().unwrap().push(e.is::<Aggregate>());
        true
    });

    let _ = retry(
        || faulted::<()>(Aggregate::single(anyhow!("inner"))),
        policy,
    )
    .run()
    .await;

    assert_eq!(*seen.lock().unwrap(), vec![false, false]);
}

#[tokio::test]
async fn test_retry_fn_with_sync_supplier() {
    let mut calls = 0;
    let result = retry_fn(
        move || {
            calls += 1;
            if calls < 3 {
                Err(anyhow!("not yet"))
            } else {
                Ok(calls)
            }
        },
        fast_policy(3),
    )
    .run()
    .await;

    assert_eq!(result.unwrap(), 3);
}

#[tokio::test]
async fn test_bind_retry_retries_only_the_bound_task() {
    let outer = Arc::new(AtomicU32::new(0));
    let inner = Arc::new(AtomicU32::new(0));

    let outer_counter = outer.clone();
    let inner_counter = inner.clone();
    let task = from_fn(move || async move {
        outer_counter.fetch_add(1, Ordering::SeqCst);
        Ok::<_, Error>(10)
    })
    .bind_retry(
        move |base| {
            let n = inner_counter.fetch_add(1, Ordering::SeqCst);
            if n < 2 {
                faulted(anyhow!("flaky"))
            } else {
                fulfilled(base + n)
            }
        },
        fast_policy(4),
    );

    assert_eq!(task.run().await.unwrap(), 12);
    assert_eq!(outer.load(Ordering::SeqCst), 1);
    assert_eq!(inner.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_bind_retry_skips_on_outer_failure() {
    let inner = Arc::new(AtomicU32::new(0));
    let counter = inner.clone();

    let error = faulted::<i32>(anyhow!("no input"))
        .bind_retry(
            move |x| {
                counter.fetch_add(1, Ordering::SeqCst);
                fulfilled(x)
            },
            fast_policy(3),
        )
        .run()
        .await
        .unwrap_err();

    assert_eq!(error.to_string(), "no input");
    assert_eq!(inner.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_retry_cancelled_attempts_are_retried() {
    let attempts = Arc::new(AtomicU32::new(0));
    let counter = attempts.clone();

    let value = retry(
        move || {
            if counter.fetch_add(1, Ordering::SeqCst) == 0 {
                cancelled::<i32>()
            } else {
                fulfilled(1)
            }
        },
        fast_policy(3),
    )
    .run()
    .await
    .unwrap();

    assert_eq!(value, 1);
    assert_eq!(attempts.load(Ordering::SeqCst), 2);
}

#[test]
fn test_policy_rejects_bad_backoff_rate() {
    let policy = RetryPolicy::new().with_backoff_rate(0.5);
    assert_eq!(policy.validate(), Err(PolicyError::BackoffRateBelowOne(0.5)));
}
