//! Network sink placeholder
//!
//! Holds the remote endpoint it would ship events to. No wire format is
//! defined yet, so every write fails with [`LoggerError::NotImplemented`];
//! the engine reports that on stderr and keeps delivering to other sinks.

use crate::core::{LogEvent, LoggerError, Result, Sink};

pub struct NetworkSink {
    url: String,
}

impl NetworkSink {
    pub fn new(url: impl Into<String>) -> Self {
        Self { url: url.into() }
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

impl Sink for NetworkSink {
    fn write(&self, _event: &LogEvent) -> Result<()> {
        Err(LoggerError::not_implemented("Network"))
    }

    fn name(&self) -> &str {
        "network"
    }
}
