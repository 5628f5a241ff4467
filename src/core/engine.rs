//! Central logging engine
//!
//! The engine owns the global level gate, the sink registry and the optional
//! background worker. Producers only ever touch the gate (lock-free) and the
//! short queue lock; sink I/O happens either on the caller's thread in
//! synchronous mode or on the single worker thread in async mode.

use super::{
    error::{LoggerError, Result},
    log_event::{LogEvent, SourceLocation},
    log_level::{AtomicLevel, LogLevel},
    metrics::EngineMetrics,
    router::EventRouter,
    sink::{Sink, SinkHandle},
};
use crossbeam_channel::{unbounded, Receiver, SendError, Sender};
use parking_lot::Mutex;
use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::sync::{Arc, OnceLock};
use std::thread::{self, ThreadId};

static INSTANCE: OnceLock<LoggingEngine> = OnceLock::new();

const WORKER_THREAD_NAME: &str = "sinkroute-worker";

/// Registered sinks: the flat list used by synchronous delivery and the
/// level table used by the worker. Both live behind one lock.
struct SinkRegistry {
    sinks: Vec<(SinkHandle, LogLevel)>,
    router: EventRouter,
}

impl SinkRegistry {
    fn new(gate: Arc<AtomicLevel>) -> Self {
        Self {
            sinks: Vec::new(),
            router: EventRouter::with_gate(gate),
        }
    }

    /// Record `sink` in the flat list and attach it to every router row at
    /// or above `level`, which gives the router threshold semantics.
    fn add(&mut self, sink: SinkHandle, level: LogLevel) {
        for routed in LogLevel::DELIVERABLE.into_iter().filter(|l| l.passes(level)) {
            self.router.add_route(routed, Arc::clone(&sink));
        }
        self.sinks.push((sink, level));
    }

    fn clear(&mut self) {
        self.sinks.clear();
        self.router.clear();
    }

    /// Synchronous path: every sink whose minimum level admits the event
    fn dispatch(&self, event: &LogEvent, metrics: &EngineMetrics) {
        for (sink, sink_level) in &self.sinks {
            if should_log(event.level(), *sink_level) {
                deliver(sink, event, metrics);
            }
        }
    }

    /// Worker path: through the router
    fn route(&self, event: &LogEvent, metrics: &EngineMetrics) {
        self.router
            .route_with(event, |sink| deliver(sink, event, metrics));
    }

    /// Flush every sink even when some fail or panic. Failures are reported
    /// on stderr; the first one is returned.
    fn flush_all(&self) -> Result<()> {
        let mut first_error = None;

        for (idx, (sink, _)) in self.sinks.iter().enumerate() {
            let flush_result = panic::catch_unwind(AssertUnwindSafe(|| sink.flush()));
            let error = match flush_result {
                Ok(Ok(())) => continue,
                Ok(Err(e)) => {
                    eprintln!("[LOGGER ERROR] Sink #{} ({}) flush failed: {}", idx, sink.name(), e);
                    e
                }
                Err(panic_info) => {
                    let message = panic_message(panic_info.as_ref());
                    eprintln!(
                        "[LOGGER CRITICAL] Sink #{} ({}) panicked during flush: {}. \
                         Other sinks continue to function.",
                        idx,
                        sink.name(),
                        message
                    );
                    LoggerError::other(format!(
                        "sink '{}' panicked during flush: {}",
                        sink.name(),
                        message
                    ))
                }
            };
            first_error.get_or_insert(error);
        }

        first_error.map_or(Ok(()), Err)
    }
}

/// A sink registered at `sink_level` receives an event at `event_level`
/// iff `event_level >= sink_level`.
#[inline]
fn should_log(event_level: LogLevel, sink_level: LogLevel) -> bool {
    event_level.passes(sink_level)
}

/// Write one event to one sink, isolating errors and panics.
///
/// A failing sink is reported on stderr and counted; it never prevents the
/// remaining sinks from receiving the event.
fn deliver(sink: &SinkHandle, event: &LogEvent, metrics: &EngineMetrics) {
    let write_result = panic::catch_unwind(AssertUnwindSafe(|| sink.write(event)));

    match write_result {
        Ok(Ok(())) => {
            metrics.record_delivered();
        }
        Ok(Err(e)) => {
            eprintln!("[LOGGER ERROR] Sink '{}' failed: {}", sink.name(), e);
            metrics.record_sink_failure();
        }
        Err(panic_info) => {
            eprintln!(
                "[LOGGER CRITICAL] Sink '{}' panicked: {}. Other sinks continue to function.",
                sink.name(),
                panic_message(panic_info.as_ref())
            );
            metrics.record_sink_failure();
        }
    }
}

fn panic_message(panic_info: &(dyn Any + Send)) -> String {
    if let Some(s) = panic_info.downcast_ref::<&str>() {
        s.to_string()
    } else if let Some(s) = panic_info.downcast_ref::<String>() {
        s.clone()
    } else {
        "Unknown panic".to_string()
    }
}

/// Worker body: block for the first event, drain whatever else is already
/// queued, deliver the lot, flush, repeat. Exits once the channel is closed
/// and empty, so every event queued before shutdown is delivered.
fn process_event_queue(
    receiver: Receiver<LogEvent>,
    registry: Arc<Mutex<SinkRegistry>>,
    metrics: Arc<EngineMetrics>,
) {
    let mut batch = Vec::new();

    while let Ok(first) = receiver.recv() {
        batch.push(first);
        batch.extend(receiver.try_iter());

        for event in batch.drain(..) {
            registry.lock().route(&event, &metrics);
        }

        // Already reported on stderr
        let _ = registry.lock().flush_all();
    }
}

enum AsyncState {
    Stopped,
    Running {
        sender: Sender<LogEvent>,
        worker: thread::JoinHandle<()>,
    },
}

pub struct LoggingEngine {
    /// The one authoritative global level, shared with the router
    level: Arc<AtomicLevel>,
    registry: Arc<Mutex<SinkRegistry>>,
    /// Queue lock: producers hold it only long enough to enqueue
    queue: Mutex<AsyncState>,
    /// Serializes start/stop so a restart never overlaps a draining worker
    lifecycle: Mutex<()>,
    /// Thread id of the most recently started worker
    worker_id: Mutex<Option<ThreadId>>,
    metrics: Arc<EngineMetrics>,
}

impl LoggingEngine {
    /// Create a synchronous engine with no sinks and the default level (INFO).
    #[must_use]
    pub fn new() -> Self {
        let level = Arc::new(AtomicLevel::default());
        Self {
            registry: Arc::new(Mutex::new(SinkRegistry::new(Arc::clone(&level)))),
            level,
            queue: Mutex::new(AsyncState::Stopped),
            lifecycle: Mutex::new(()),
            worker_id: Mutex::new(None),
            metrics: Arc::new(EngineMetrics::new()),
        }
    }

    /// The process-wide engine, built on first use.
    ///
    /// The first call constructs it and starts async mode; if the worker
    /// cannot be spawned the engine stays synchronous. Statics are never
    /// dropped, so call [`shutdown`](Self::shutdown) before exiting to
    /// deliver anything still queued.
    pub fn instance() -> &'static LoggingEngine {
        INSTANCE.get_or_init(|| {
            let engine = LoggingEngine::new();
            if let Err(e) = engine.start_async() {
                eprintln!("[LOGGER WARNING] {}. Delivering synchronously.", e);
            }
            engine
        })
    }

    /// Return the process-wide engine to its initial state.
    pub fn reset_instance() -> Result<()> {
        let engine = Self::instance();
        engine.reset();
        engine.start_async()
    }

    pub fn level(&self) -> LogLevel {
        self.level.get()
    }

    pub fn set_level(&self, level: LogLevel) {
        let registry = self.registry.lock();
        registry.router.set_level(level);
    }

    /// Whether an event at `level` would pass the global gate.
    #[inline]
    pub fn is_enabled(&self, level: LogLevel) -> bool {
        level.passes(self.level.get())
    }

    /// Register `sink` to receive every event at or above `level`.
    ///
    /// Registering the same sink again adds an independent registration;
    /// with overlapping levels the sink sees matching events once per
    /// registration.
    pub fn add_sink(&self, sink: SinkHandle, level: LogLevel) {
        let mut registry = self.registry.lock();
        registry.add(sink, level);
    }

    pub fn sink_count(&self) -> usize {
        self.registry.lock().sinks.len()
    }

    pub fn is_async(&self) -> bool {
        matches!(*self.queue.lock(), AsyncState::Running { .. })
    }

    /// Build an event at the call site's location and submit it.
    ///
    /// The gate is checked before the event is built, so a filtered call
    /// costs nothing beyond the caller's own formatting.
    pub fn log(&self, level: LogLevel, location: SourceLocation, message: impl Into<String>) {
        if !self.is_enabled(level) {
            self.metrics.record_filtered();
            return;
        }
        self.process_event(LogEvent::new(level, message, location));
    }

    /// Submit an already built event.
    ///
    /// In async mode this only enqueues and returns; otherwise the event is
    /// written to every matching sink on the calling thread.
    pub fn process_event(&self, event: LogEvent) {
        if !self.is_enabled(event.level()) {
            self.metrics.record_filtered();
            return;
        }

        let event = {
            let queue = self.queue.lock();
            match &*queue {
                AsyncState::Running { sender, .. } => match sender.send(event) {
                    Ok(()) => {
                        self.metrics.record_enqueued();
                        return;
                    }
                    Err(SendError(event)) => {
                        eprintln!(
                            "[LOGGER WARNING] Logging worker is gone, delivering synchronously"
                        );
                        event
                    }
                },
                AsyncState::Stopped => event,
            }
        };

        self.registry.lock().dispatch(&event, &self.metrics);
    }

    /// Start background delivery. No-op if already running.
    pub fn start_async(&self) -> Result<()> {
        let _lifecycle = self.lifecycle.lock();
        let mut queue = self.queue.lock();
        if matches!(*queue, AsyncState::Running { .. }) {
            return Ok(());
        }

        let (sender, receiver) = unbounded();
        let registry = Arc::clone(&self.registry);
        let metrics = Arc::clone(&self.metrics);

        let worker = thread::Builder::new()
            .name(WORKER_THREAD_NAME.to_string())
            .spawn(move || process_event_queue(receiver, registry, metrics))
            .map_err(LoggerError::WorkerSpawn)?;

        *self.worker_id.lock() = Some(worker.thread().id());
        *queue = AsyncState::Running { sender, worker };
        Ok(())
    }

    /// Stop background delivery, waiting until every queued event has been
    /// delivered. No-op if not running.
    ///
    /// Called from a sink on the worker thread, this only closes the queue:
    /// the worker cannot wait for itself, nor for another thread that is
    /// already waiting for the worker.
    pub fn stop_async(&self) {
        if self.on_worker_thread() {
            let state = std::mem::replace(&mut *self.queue.lock(), AsyncState::Stopped);
            // Dropping the sender closes the queue; the handle detaches
            drop(state);
            return;
        }

        let _lifecycle = self.lifecycle.lock();
        let state = std::mem::replace(&mut *self.queue.lock(), AsyncState::Stopped);

        if let AsyncState::Running { sender, worker } = state {
            // Closing the only sender lets the worker drain and exit
            drop(sender);

            if let Err(panic_info) = worker.join() {
                eprintln!(
                    "[LOGGER ERROR] Logging worker panicked during shutdown: {}",
                    panic_message(panic_info.as_ref())
                );
            }
        }
    }

    fn on_worker_thread(&self) -> bool {
        *self.worker_id.lock() == Some(thread::current().id())
    }

    /// Flush every registered sink. A failing or panicking sink does not
    /// stop the others from being flushed; the first failure is returned.
    pub fn flush(&self) -> Result<()> {
        self.registry.lock().flush_all()
    }

    /// Drain the queue and flush every sink. The engine keeps working
    /// synchronously afterwards.
    pub fn shutdown(&self) {
        self.stop_async();
        // Failures are reported per sink by flush_all
        let _ = self.flush();
    }

    /// Stop the worker, drop every sink, restore the default level and zero
    /// the metrics.
    pub fn reset(&self) {
        self.stop_async();

        let mut registry = self.registry.lock();
        registry.clear();
        registry.router.set_level(LogLevel::default());
        drop(registry);

        self.metrics.reset();
    }

    pub fn metrics(&self) -> &EngineMetrics {
        &self.metrics
    }

    #[inline]
    #[track_caller]
    pub fn trace(&self, message: impl Into<String>) {
        self.log(LogLevel::Trace, SourceLocation::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn debug(&self, message: impl Into<String>) {
        self.log(LogLevel::Debug, SourceLocation::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn info(&self, message: impl Into<String>) {
        self.log(LogLevel::Info, SourceLocation::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn warning(&self, message: impl Into<String>) {
        self.log(LogLevel::Warning, SourceLocation::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn error(&self, message: impl Into<String>) {
        self.log(LogLevel::Error, SourceLocation::caller(), message);
    }

    #[inline]
    #[track_caller]
    pub fn critical(&self, message: impl Into<String>) {
        self.log(LogLevel::Critical, SourceLocation::caller(), message);
    }
}

impl Default for LoggingEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for LoggingEngine {
    fn drop(&mut self) {
        self.shutdown();

        let failures = self.metrics.sink_failures();
        if failures > 0 {
            eprintln!(
                "[LOGGER WARNING] Engine shutting down with {} failed sink writes (failure rate: {:.2}%)",
                failures,
                self.metrics.failure_rate()
            );
        }
    }
}

/// Builder for constructing a [`LoggingEngine`] with a fluent API
///
/// # Example
/// ```
/// use sinkroute::prelude::*;
///
/// let engine = LoggingEngine::builder()
///     .level(LogLevel::Debug)
///     .sink(ConsoleSink::new(), LogLevel::Warning)
///     .async_mode(true)
///     .build()
///     .unwrap();
/// assert!(engine.is_async());
/// ```
pub struct LoggingEngineBuilder {
    level: LogLevel,
    sinks: Vec<(SinkHandle, LogLevel)>,
    async_mode: bool,
}

impl LoggingEngineBuilder {
    pub fn new() -> Self {
        Self {
            level: LogLevel::default(),
            sinks: Vec::new(),
            async_mode: false,
        }
    }

    /// Set the global minimum level
    #[must_use = "builder methods return a new value"]
    pub fn level(mut self, level: LogLevel) -> Self {
        self.level = level;
        self
    }

    /// Add a sink receiving events at or above `level`
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S, level: LogLevel) -> Self {
        self.sinks.push((Arc::new(sink), level));
        self
    }

    /// Add an already shared sink
    #[must_use = "builder methods return a new value"]
    pub fn shared_sink(mut self, sink: SinkHandle, level: LogLevel) -> Self {
        self.sinks.push((sink, level));
        self
    }

    /// Deliver on a background worker instead of the caller's thread
    #[must_use = "builder methods return a new value"]
    pub fn async_mode(mut self, enabled: bool) -> Self {
        self.async_mode = enabled;
        self
    }

    pub fn build(self) -> Result<LoggingEngine> {
        let engine = LoggingEngine::new();
        engine.set_level(self.level);
        for (sink, level) in self.sinks {
            engine.add_sink(sink, level);
        }
        if self.async_mode {
            engine.start_async()?;
        }
        Ok(engine)
    }
}

impl Default for LoggingEngineBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl LoggingEngine {
    #[must_use]
    pub fn builder() -> LoggingEngineBuilder {
        LoggingEngineBuilder::new()
    }
}
