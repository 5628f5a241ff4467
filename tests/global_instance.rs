//! The process-wide engine. Kept in its own test binary, and in a single
//! test, so no other test shares the instance.

use sinkroute::prelude::*;
use sinkroute::{error, info};
use std::sync::Arc;
use tempfile::TempDir;

#[test]
fn test_global_instance_lifecycle() {
    let engine = LoggingEngine::instance();
    assert!(std::ptr::eq(engine, LoggingEngine::instance()));
    assert!(engine.is_async(), "the global engine starts in async mode");
    assert_eq!(engine.level(), LogLevel::Info);

    let sink = Arc::new(MemorySink::new());
    engine.add_sink(sink.clone(), LogLevel::Info);
    info!(engine, "hello from {}", "main");
    engine.debug("below the default gate");
    engine.stop_async();
    assert_eq!(sink.messages(), vec!["hello from main"]);

    // Configuration applied straight to the instance
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("global.log");
    let config_file = temp_dir.path().join("logging.json");
    let document = serde_json::json!({
        "logLevel": "ERROR",
        "sinks": [ { "type": "file", "level": "ERROR", "filename": log_file } ]
    });
    std::fs::write(&config_file, document.to_string()).expect("Failed to write config");

    LoggingEngine::reset_instance().expect("Failed to reset instance");
    assert_eq!(engine.sink_count(), 0);
    assert!(engine.is_async());

    ConfigurationManager::apply_file_to_instance(&config_file).expect("Failed to apply config");
    assert_eq!(engine.level(), LogLevel::Error);

    info!(engine, "filtered");
    error!(engine, "kept");
    engine.shutdown();

    let content = std::fs::read_to_string(&log_file).expect("Failed to read log file");
    assert_eq!(content.lines().count(), 1);
    assert!(content.contains("[ERROR   ] kept"));
    assert_eq!(sink.len(), 1, "reset detached the memory sink");
}
