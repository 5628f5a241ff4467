//! Syslog sink. Unix-like platforms only.
//!
//! Uses the POSIX `openlog`/`syslog`/`closelog` API. POSIX allows a single
//! connection to syslogd per process, so the most recently created sink's
//! ident and facility apply to all of them, and dropping any sink calls
//! `closelog`. Applications should keep at most one `SyslogSink` alive.

use crate::core::{LogEvent, LogLevel, LoggerError, Result, Sink};
use std::ffi::CString;
use std::str::FromStr;

const FORMAT: &[u8] = b"%s\0";

/// Syslog facility the sink submits under
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facility {
    #[default]
    User,
    Daemon,
    Local0,
    Local1,
    Local2,
    Local3,
    Local4,
    Local5,
    Local6,
    Local7,
}

impl Facility {
    fn as_raw(self) -> libc::c_int {
        match self {
            Facility::User => libc::LOG_USER,
            Facility::Daemon => libc::LOG_DAEMON,
            Facility::Local0 => libc::LOG_LOCAL0,
            Facility::Local1 => libc::LOG_LOCAL1,
            Facility::Local2 => libc::LOG_LOCAL2,
            Facility::Local3 => libc::LOG_LOCAL3,
            Facility::Local4 => libc::LOG_LOCAL4,
            Facility::Local5 => libc::LOG_LOCAL5,
            Facility::Local6 => libc::LOG_LOCAL6,
            Facility::Local7 => libc::LOG_LOCAL7,
        }
    }
}

impl FromStr for Facility {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "user" => Ok(Facility::User),
            "daemon" => Ok(Facility::Daemon),
            "local0" => Ok(Facility::Local0),
            "local1" => Ok(Facility::Local1),
            "local2" => Ok(Facility::Local2),
            "local3" => Ok(Facility::Local3),
            "local4" => Ok(Facility::Local4),
            "local5" => Ok(Facility::Local5),
            "local6" => Ok(Facility::Local6),
            "local7" => Ok(Facility::Local7),
            _ => Err(format!("Invalid syslog facility: '{}'", s)),
        }
    }
}

pub struct SyslogSink {
    // openlog keeps this pointer, so it must live as long as the sink
    ident: CString,
    facility: Facility,
}

impl SyslogSink {
    pub fn new(ident: &str, facility: Facility) -> Result<Self> {
        let ident = CString::new(ident)
            .map_err(|_| LoggerError::syslog("ident contains an interior NUL byte"))?;

        // SAFETY: `ident` is NUL-terminated and owned by the returned sink,
        // which calls closelog before releasing it.
        unsafe {
            libc::openlog(
                ident.as_ptr(),
                libc::LOG_PID | libc::LOG_NDELAY,
                facility.as_raw(),
            );
        }

        Ok(Self { ident, facility })
    }

    pub fn ident(&self) -> &str {
        self.ident.to_str().unwrap_or_default()
    }

    pub fn facility(&self) -> Facility {
        self.facility
    }

    fn priority(level: LogLevel) -> libc::c_int {
        match level {
            LogLevel::Debug => libc::LOG_DEBUG,
            LogLevel::Info => libc::LOG_INFO,
            LogLevel::Warning => libc::LOG_WARNING,
            LogLevel::Error => libc::LOG_ERR,
            LogLevel::Critical => libc::LOG_CRIT,
            LogLevel::Trace | LogLevel::None => libc::LOG_NOTICE,
        }
    }
}

impl Sink for SyslogSink {
    fn write(&self, event: &LogEvent) -> Result<()> {
        let location = event.location();
        let text = format!(
            "{} (function: {} line: {})",
            event.message(),
            location.function,
            location.line
        );
        let text = CString::new(text)
            .map_err(|_| LoggerError::syslog("message contains an interior NUL byte"))?;

        // SAFETY: both pointers are NUL-terminated C strings, and the "%s"
        // format consumes exactly the one argument passed.
        unsafe {
            libc::syslog(
                Self::priority(event.level()) | self.facility.as_raw(),
                FORMAT.as_ptr().cast(),
                text.as_ptr(),
            );
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "syslog"
    }
}

impl Drop for SyslogSink {
    fn drop(&mut self) {
        // SAFETY: closelog has no preconditions
        unsafe { libc::closelog() };
    }
}
