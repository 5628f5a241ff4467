//! Logging macros for ergonomic log message formatting.
//!
//! Every macro takes the engine as its first argument, captures the call
//! site (file, line, enclosing function) and only formats the message when
//! the level passes the engine's global gate.
//!
//! # Examples
//!
//! ```
//! use sinkroute::prelude::*;
//! use sinkroute::info;
//!
//! let engine = LoggingEngine::new();
//!
//! // Basic logging
//! info!(engine, "Server started");
//!
//! // With format arguments
//! let port = 8080;
//! info!(engine, "Server listening on port {}", port);
//! ```

/// Path of the enclosing function, e.g. `my_crate::server::run`.
#[macro_export]
macro_rules! function {
    () => {{
        fn f() {}
        fn type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = type_name_of(f);
        name.strip_suffix("::f").unwrap_or(name)
    }};
}

/// [`SourceLocation`](crate::SourceLocation) of the macro call site.
#[macro_export]
macro_rules! location {
    () => {
        $crate::SourceLocation::new(file!(), line!(), $crate::function!())
    };
}

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use sinkroute::prelude::*;
/// # let engine = LoggingEngine::new();
/// use sinkroute::log;
/// log!(engine, LogLevel::Info, "Simple message");
/// log!(engine, LogLevel::Error, "Error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($engine:expr, $level:expr, $($arg:tt)+) => {{
        let engine = &$engine;
        let level = $level;
        if engine.is_enabled(level) {
            engine.log(level, $crate::location!(), format!($($arg)+));
        }
    }};
}

/// Log a trace-level message.
///
/// ```
/// # use sinkroute::prelude::*;
/// # let engine = LoggingEngine::new();
/// # engine.set_level(LogLevel::Trace);
/// use sinkroute::trace;
/// trace!(engine, "Entering function: calculate()");
/// ```
#[macro_export]
macro_rules! trace {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Debug, $($arg)+)
    };
}

/// Log an info-level message.
///
/// ```
/// # use sinkroute::prelude::*;
/// # let engine = LoggingEngine::new();
/// use sinkroute::info;
/// info!(engine, "Processing {} items", 100);
/// ```
#[macro_export]
macro_rules! info {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Warning, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Error, $($arg)+)
    };
}

/// Log a critical-level message.
///
/// ```
/// # use sinkroute::prelude::*;
/// # let engine = LoggingEngine::new();
/// use sinkroute::critical;
/// critical!(engine, "Unable to recover from error: {}", "disk full");
/// ```
#[macro_export]
macro_rules! critical {
    ($engine:expr, $($arg:tt)+) => {
        $crate::log!($engine, $crate::LogLevel::Critical, $($arg)+)
    };
}
