//! # Sinkroute
//!
//! An embeddable logging engine: leveled events are filtered by a global gate,
//! optionally queued for a background worker, and routed to every interested
//! sink.
//!
//! ## Features
//!
//! - **Non-blocking producers**: in async mode callers only enqueue
//! - **Threshold routing**: a sink registered at a level sees that level and above
//! - **Multiple sinks**: console, file, syslog, plus network and database placeholders
//! - **Failure isolation**: a failing sink never takes the worker down
//! - **JSON configuration** through [`ConfigurationManager`]
//!
//! ```
//! use sinkroute::prelude::*;
//! use std::sync::Arc;
//!
//! let engine = LoggingEngine::new();
//! let sink = Arc::new(MemorySink::new());
//! engine.add_sink(sink.clone(), LogLevel::Warning);
//! engine.start_async().unwrap();
//!
//! engine.info("dropped by the sink threshold");
//! engine.error("delivered");
//! engine.stop_async();
//!
//! assert_eq!(sink.messages(), vec!["delivered"]);
//! ```

pub mod config;
pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::config::{ConfigurationManager, LoggerConfig, SinkConfig};
    pub use crate::core::{
        EngineMetrics, EventRouter, LogEvent, LogLevel, LoggerError, LoggingEngine,
        LoggingEngineBuilder, Result, Sink, SinkHandle, SourceLocation,
    };
    pub use crate::sinks::{ConsoleSink, DatabaseSink, FileSink, MemorySink, NetworkSink};
}

pub use crate::config::{ConfigurationManager, LoggerConfig, ResolvedConfig, SinkConfig};
pub use crate::core::{
    AtomicLevel, EngineMetrics, EventRouter, LogEvent, LogLevel, LoggerError, LoggingEngine,
    LoggingEngineBuilder, Result, Sink, SinkHandle, SourceLocation, TIMESTAMP_FORMAT,
};
pub use crate::sinks::{ConsoleSink, DatabaseSink, FileSink, MemorySink, NetworkSink};

#[cfg(unix)]
pub use crate::sinks::{Facility, SyslogSink};
