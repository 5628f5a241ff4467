//! Core engine types and traits

pub mod engine;
pub mod error;
pub mod log_event;
pub mod log_level;
pub mod metrics;
pub mod router;
pub mod sink;

pub use engine::{LoggingEngine, LoggingEngineBuilder};
pub use error::{LoggerError, Result};
pub use log_event::{LogEvent, SourceLocation, TIMESTAMP_FORMAT};
pub use log_level::{AtomicLevel, LogLevel};
pub use metrics::EngineMetrics;
pub use router::EventRouter;
pub use sink::{Sink, SinkHandle};
