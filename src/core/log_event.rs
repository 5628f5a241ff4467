//! Log event structure

use super::log_level::LogLevel;
use chrono::Local;
use serde::Serialize;
use std::cell::RefCell;
use std::fmt;

/// Rendering used for [`LogEvent::timestamp`].
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

// Thread-local cache so the hot path does not query the thread name every time
thread_local! {
    static THREAD_NAME_CACHE: RefCell<Option<Option<String>>> = const { RefCell::new(None) };
}

/// Get cached thread name, computing and caching it on first access
fn get_thread_name() -> Option<String> {
    THREAD_NAME_CACHE.with(|cache| {
        cache
            .borrow_mut()
            .get_or_insert_with(|| std::thread::current().name().map(String::from))
            .clone()
    })
}

/// Call-site descriptor captured at compile time by [`location!`](crate::location).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub function: &'static str,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, function: &'static str) -> Self {
        Self {
            file,
            line,
            function,
        }
    }

    /// Location of the caller of the enclosing `#[track_caller]` function.
    ///
    /// The function name is not available this way and is left empty.
    #[track_caller]
    pub fn caller() -> Self {
        let location = std::panic::Location::caller();
        Self::new(location.file(), location.line(), "")
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.function.is_empty() {
            write!(f, "{}:{}", self.file, self.line)
        } else {
            write!(f, "{}:{} {}", self.file, self.line, self.function)
        }
    }
}

/// One log occurrence.
///
/// Fields are private and there are no setters: an event is fixed once built
/// and is cloned freely into the delivery queue.
#[derive(Debug, Clone, Serialize)]
pub struct LogEvent {
    level: LogLevel,
    message: String,
    timestamp: String,
    location: SourceLocation,
    thread_name: Option<String>,
}

impl LogEvent {
    /// Sanitize log message to prevent log injection attacks
    ///
    /// Replaces newlines, carriage returns, and tabs with escape sequences
    /// so one event always renders as one line.
    fn sanitize_message(message: String) -> String {
        if !message.contains(['\n', '\r', '\t']) {
            return message;
        }
        message
            .replace('\n', "\\n")
            .replace('\r', "\\r")
            .replace('\t', "\\t")
    }

    /// Build an event, stamping it with the current local wall-clock time.
    pub fn new(level: LogLevel, message: impl Into<String>, location: SourceLocation) -> Self {
        Self {
            level,
            message: Self::sanitize_message(message.into()),
            timestamp: Local::now().format(TIMESTAMP_FORMAT).to_string(),
            location,
            thread_name: get_thread_name(),
        }
    }

    #[inline]
    pub fn level(&self) -> LogLevel {
        self.level
    }

    #[inline]
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Capture time as `YYYY-MM-DD HH:MM:SS`
    #[inline]
    pub fn timestamp(&self) -> &str {
        &self.timestamp
    }

    #[inline]
    pub fn location(&self) -> &SourceLocation {
        &self.location
    }

    pub fn thread_name(&self) -> Option<&str> {
        self.thread_name.as_deref()
    }
}
