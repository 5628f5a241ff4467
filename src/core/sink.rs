//! Sink trait for log output destinations

use super::{error::Result, log_event::LogEvent};
use std::sync::Arc;

/// A destination for log events.
///
/// Sinks are shared between the flat registry and the router, and may be
/// registered several times, so `write` takes `&self`; implementations that
/// own mutable I/O state guard it internally.
pub trait Sink: Send + Sync {
    fn write(&self, event: &LogEvent) -> Result<()>;

    fn flush(&self) -> Result<()> {
        Ok(())
    }

    fn name(&self) -> &str;
}

/// Shared handle to a registered sink.
pub type SinkHandle = Arc<dyn Sink>;
