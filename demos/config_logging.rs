//! Configuration example
//!
//! Loads a JSON document, applies it to the process-wide engine and logs
//! through the resulting sinks.
//!
//! Run with: cargo run --example config_logging [config.json]

use sinkroute::prelude::*;
use sinkroute::{critical, debug, error, info, warn};

const DEFAULT_CONFIG: &str = r#"{
    "logLevel": "DEBUG",
    "sinks": [
        { "type": "console", "level": "INFO", "colors": true },
        { "type": "file", "level": "WARNING", "filename": "config_test.log" },
        { "type": "network", "level": "CRITICAL", "url": "tcp://127.0.0.1:5140" }
    ]
}"#;

fn main() -> Result<()> {
    println!("=== Sinkroute - Configuration Example ===\n");

    let manager = match std::env::args().nth(1) {
        Some(path) => {
            println!("Loading configuration from {}", path);
            ConfigurationManager::from_file(path)?
        }
        None => {
            println!("Using the built-in configuration");
            ConfigurationManager::from_json(DEFAULT_CONFIG)?
        }
    };

    let engine = LoggingEngine::instance();
    manager.apply(engine)?;
    println!(
        "Global level {}, {} sink(s) registered\n",
        engine.level(),
        engine.sink_count()
    );

    debug!(engine, "Only visible when a sink accepts DEBUG");
    info!(engine, "Service started on port {}", 8080);
    warn!(engine, "Cache hit rate at {}%", 42);
    error!(engine, "Request failed: {}", "timeout");
    // The network placeholder reports its failure on stderr
    critical!(engine, "Shutting down");

    engine.shutdown();
    println!("\nfailure rate: {:.2}", engine.metrics().failure_rate());

    Ok(())
}
