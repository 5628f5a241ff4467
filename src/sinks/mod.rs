//! Sink implementations

pub mod console;
pub mod database;
pub mod file;
pub mod memory;
pub mod network;

#[cfg(unix)]
pub mod syslog;

pub use console::ConsoleSink;
pub use database::DatabaseSink;
pub use file::FileSink;
pub use memory::MemorySink;
pub use network::NetworkSink;

#[cfg(unix)]
pub use syslog::{Facility, SyslogSink};

pub use crate::core::{Sink, SinkHandle};
