//! In-memory sink
//!
//! Keeps every event it receives. Useful for tests and for embedding
//! applications that want to inspect recent output.

use crate::core::{LogEvent, Result, Sink};
use parking_lot::Mutex;
use std::time::Duration;

#[derive(Default)]
pub struct MemorySink {
    events: Mutex<Vec<LogEvent>>,
    delay: Option<Duration>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    /// A sink that sleeps for `delay` inside every write, simulating slow I/O.
    pub fn with_delay(delay: Duration) -> Self {
        Self {
            events: Mutex::new(Vec::new()),
            delay: Some(delay),
        }
    }

    /// Snapshot of the captured events, in arrival order
    pub fn events(&self) -> Vec<LogEvent> {
        self.events.lock().clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.events
            .lock()
            .iter()
            .map(|event| event.message().to_string())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.events.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.lock().is_empty()
    }

    pub fn clear(&self) {
        self.events.lock().clear();
    }
}

impl Sink for MemorySink {
    fn write(&self, event: &LogEvent) -> Result<()> {
        if let Some(delay) = self.delay {
            std::thread::sleep(delay);
        }
        self.events.lock().push(event.clone());
        Ok(())
    }

    fn name(&self) -> &str {
        "memory"
    }
}
