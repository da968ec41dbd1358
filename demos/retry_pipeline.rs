//! Demonstrates a retried, instrumented task pipeline
//!
//! Run with: cargo run --example retry_pipeline --features tracing

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use std::time::Duration;

use anyhow::anyhow;
use taskchain::prelude::*;
use taskchain::task::Ready;
use tracing::info_span;

#[tokio::main]
async fn main() {
    // Set up tracing subscriber
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::DEBUG)
        .init();

    tracing::info!("Starting retry pipeline demo");

    let policy = RetryPolicy::new()
        .with_max_retries(4)
        .with_initial_interval(Duration::from_millis(50))
        .with_on_retry(|attempt, delay, error| {
            tracing::info!(attempt, ?delay, %error, "retrying inventory lookup");
        });

    let calls = Arc::new(AtomicU32::new(0));
    let stock = retry(flaky_inventory(calls.clone()), policy)
        .bind(reject_if(|count: &u32| *count == 0, |_| anyhow!("out of stock")))
        .map(|count| count * 2)
        .if_faulted(|error| tracing::error!(%error, "inventory lookup failed"))
        .instrument(info_span!("inventory", sku = "A-113"))
        .run()
        .await;

    match stock {
        Ok(units) => tracing::info!(units, calls = calls.load(Ordering::SeqCst), "lookup complete"),
        Err(e) => tracing::error!("Pipeline failed: {}", e),
    }

    tracing::info!("Loading a batch of orders");
    let tasks: Vec<BoxedTask<u32>> = (0..5)
        .map(|id| {
            if id % 3 == 0 {
                faulted(anyhow!("order {id} missing")).boxed()
            } else {
                delayed(Duration::from_millis(10 * u64::from(id)), move || fulfilled(id)).boxed()
            }
        })
        .collect();

    if let Ok(batch) = partition(tasks).run().await {
        tracing::info!(loaded = ?batch.fulfilled, failed = batch.faulted.len(), "batch settled");
    }
}

fn flaky_inventory(calls: Arc<AtomicU32>) -> impl FnMut() -> Ready<u32> + Send {
    move || {
        if calls.fetch_add(1, Ordering::SeqCst) < 2 {
            faulted(anyhow!("inventory service timed out"))
        } else {
            fulfilled(12)
        }
    }
}
