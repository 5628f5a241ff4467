//! Async logging example
//!
//! Demonstrates the background worker with several producer threads.
//!
//! Run with: cargo run --example async_logging

use sinkroute::prelude::*;
use sinkroute::{error, info, warn};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

fn main() -> Result<()> {
    println!("=== Sinkroute - Async Logging Example ===\n");

    let engine = Arc::new(
        LoggingEngine::builder()
            .level(LogLevel::Debug)
            .sink(ConsoleSink::new(), LogLevel::Info)
            .sink(FileSink::new("async_test.log")?, LogLevel::Debug)
            .async_mode(true)
            .build()?,
    );

    println!("1. Queued logging:");
    for i in 0..100 {
        engine.debug(format!("Message #{}", i));
    }
    info!(engine, "Queued {} debug messages for the file sink", 100);

    println!("\n2. Multi-threaded logging:");
    let handles: Vec<_> = (0..5)
        .map(|thread_id| {
            let engine = Arc::clone(&engine);
            thread::Builder::new()
                .name(format!("producer-{}", thread_id))
                .spawn(move || {
                    for i in 0..20 {
                        engine.info(format!("Thread {} - Message {}", thread_id, i));
                        thread::sleep(Duration::from_millis(10));
                    }
                })
        })
        .collect::<std::io::Result<_>>()?;

    for handle in handles {
        if handle.join().is_err() {
            error!(engine, "a producer thread panicked");
        }
    }

    warn!(engine, "Stopping the worker; queued events are drained first");
    engine.shutdown();

    let metrics = engine.metrics();
    println!(
        "\nenqueued: {}, delivered: {}, filtered: {}",
        metrics.enqueued(),
        metrics.delivered(),
        metrics.filtered()
    );
    println!("\n=== Example completed successfully! ===");
    println!("Check 'async_test.log' for file output");

    Ok(())
}
