//! Level-keyed event routing
//!
//! The router owns a table from level to the sinks attached at exactly that
//! level and fans each event out to its row in registration order. Threshold
//! semantics ("everything at or above WARNING") are built on top of this by the
//! engine, which attaches a sink to every row it should react to.

use super::{
    error::Result,
    log_event::LogEvent,
    log_level::{AtomicLevel, LogLevel},
    sink::SinkHandle,
};
use std::sync::Arc;

const LEVEL_COUNT: usize = LogLevel::None as usize + 1;

pub struct EventRouter {
    routes: [Vec<SinkHandle>; LEVEL_COUNT],
    gate: Arc<AtomicLevel>,
}

impl EventRouter {
    pub fn new() -> Self {
        Self::with_gate(Arc::new(AtomicLevel::default()))
    }

    /// Create a router whose minimum level is read from `gate`.
    ///
    /// The engine passes its own gate so there is a single copy of the level.
    pub fn with_gate(gate: Arc<AtomicLevel>) -> Self {
        Self {
            routes: std::array::from_fn(|_| Vec::new()),
            gate,
        }
    }

    pub fn set_level(&self, level: LogLevel) {
        self.gate.set(level);
    }

    pub fn level(&self) -> LogLevel {
        self.gate.get()
    }

    /// Append `sink` to the row for exactly `level`.
    ///
    /// Earlier registrations are never replaced; the same sink may appear in
    /// a row more than once and is then invoked once per registration.
    pub fn add_route(&mut self, level: LogLevel, sink: SinkHandle) {
        self.routes[level as usize].push(sink);
    }

    /// Sinks registered for exactly `level`, in registration order.
    pub fn routes_for(&self, level: LogLevel) -> &[SinkHandle] {
        &self.routes[level as usize]
    }

    /// Total number of registrations across all levels
    pub fn route_count(&self) -> usize {
        self.routes.iter().map(Vec::len).sum()
    }

    pub fn clear(&mut self) {
        self.routes.iter_mut().for_each(Vec::clear);
    }

    /// Write `event` to every sink registered at its exact level.
    ///
    /// Returns the number of sinks written. The first failing sink aborts the
    /// fan-out and its error is returned unchanged; callers that need
    /// per-sink isolation use [`route_with`](Self::route_with).
    pub fn route(&self, event: &LogEvent) -> Result<usize> {
        let mut written = 0;
        for sink in self.matching(event) {
            sink.write(event)?;
            written += 1;
        }
        Ok(written)
    }

    /// Hand every sink the event should reach to `deliver`, in order.
    ///
    /// Returns how many sinks were handed over.
    pub fn route_with<F>(&self, event: &LogEvent, mut deliver: F) -> usize
    where
        F: FnMut(&SinkHandle),
    {
        let sinks = self.matching(event);
        sinks.iter().for_each(&mut deliver);
        sinks.len()
    }

    fn matching(&self, event: &LogEvent) -> &[SinkHandle] {
        if !event.level().passes(self.level()) {
            return &[];
        }
        self.routes_for(event.level())
    }
}

impl Default for EventRouter {
    fn default() -> Self {
        Self::new()
    }
}
