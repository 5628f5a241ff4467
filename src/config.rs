//! JSON configuration for the engine
//!
//! ```json
//! {
//!   "logLevel": "INFO",
//!   "sinks": [
//!     { "type": "console", "level": "DEBUG" },
//!     { "type": "file", "level": "WARNING", "filename": "app.log" }
//!   ]
//! }
//! ```
//!
//! Every sink is built before anything touches the engine, so a configuration
//! that fails part way leaves the engine exactly as it was.

use crate::core::{LogLevel, LoggerError, LoggingEngine, Result, SinkHandle};
use crate::sinks::{ConsoleSink, DatabaseSink, FileSink, NetworkSink};
use serde::Deserialize;
use serde_json::error::Category;
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DEFAULT_SYSLOG_IDENT: &str = "sinkroute";

fn default_colors() -> bool {
    true
}

fn default_syslog_ident() -> String {
    DEFAULT_SYSLOG_IDENT.to_string()
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoggerConfig {
    /// Global minimum level
    #[serde(rename = "logLevel", default)]
    pub log_level: Option<String>,

    #[serde(default)]
    pub sinks: Vec<SinkConfig>,
}

/// One entry of the `sinks` list, selected by its `type` field
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum SinkConfig {
    Console {
        level: String,
        #[serde(default = "default_colors")]
        colors: bool,
    },
    File {
        level: String,
        filename: PathBuf,
    },
    Network {
        level: String,
        url: String,
    },
    Database {
        level: String,
        database: String,
    },
    Syslog {
        level: String,
        #[serde(default = "default_syslog_ident")]
        ident: String,
        #[serde(default)]
        facility: Option<String>,
    },
}

impl SinkConfig {
    pub fn level(&self) -> &str {
        match self {
            SinkConfig::Console { level, .. }
            | SinkConfig::File { level, .. }
            | SinkConfig::Network { level, .. }
            | SinkConfig::Database { level, .. }
            | SinkConfig::Syslog { level, .. } => level,
        }
    }

    /// Construct the sink this entry describes
    pub fn build(&self) -> Result<SinkHandle> {
        let sink: SinkHandle = match self {
            SinkConfig::Console { colors, .. } => Arc::new(ConsoleSink::with_colors(*colors)),
            SinkConfig::File { filename, .. } => Arc::new(FileSink::new(filename)?),
            SinkConfig::Network { url, .. } => Arc::new(NetworkSink::new(url.as_str())),
            SinkConfig::Database { database, .. } => {
                Arc::new(DatabaseSink::new(database.as_str()))
            }
            SinkConfig::Syslog {
                ident, facility, ..
            } => build_syslog(ident, facility.as_deref())?,
        };
        Ok(sink)
    }
}

#[cfg(unix)]
fn build_syslog(ident: &str, facility: Option<&str>) -> Result<SinkHandle> {
    use crate::sinks::{Facility, SyslogSink};

    let facility = match facility {
        Some(name) => name
            .parse::<Facility>()
            .map_err(|e| LoggerError::config("syslog", e))?,
        None => Facility::default(),
    };
    Ok(Arc::new(SyslogSink::new(ident, facility)?))
}

#[cfg(not(unix))]
fn build_syslog(_ident: &str, _facility: Option<&str>) -> Result<SinkHandle> {
    Err(LoggerError::config(
        "syslog",
        "syslog sinks are only available on unix platforms",
    ))
}

fn parse_level(component: impl Into<String>, name: &str) -> Result<LogLevel> {
    name.parse().map_err(|e| LoggerError::config(component, e))
}

/// Schema violations (unknown sink type, missing field) are configuration
/// errors; anything else is reported as malformed JSON.
fn map_json_error(e: serde_json::Error) -> LoggerError {
    match e.classify() {
        Category::Data => LoggerError::config("configuration", e.to_string()),
        _ => LoggerError::JsonError(e),
    }
}

/// Everything a configuration resolves to, ready to register
pub struct ResolvedConfig {
    pub level: Option<LogLevel>,
    pub sinks: Vec<(SinkHandle, LogLevel)>,
}

pub struct ConfigurationManager {
    config: LoggerConfig,
}

impl ConfigurationManager {
    pub fn new(config: LoggerConfig) -> Self {
        Self { config }
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self> {
        let config = serde_json::from_str(json).map_err(map_json_error)?;
        Ok(Self::new(config))
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| {
            LoggerError::io_operation(
                "reading configuration",
                format!("cannot read '{}'", path.display()),
                e,
            )
        })?;
        Self::from_json(&content)
    }

    pub fn config(&self) -> &LoggerConfig {
        &self.config
    }

    /// Parse every level and construct every sink without touching an engine
    pub fn resolve(&self) -> Result<ResolvedConfig> {
        let level = self
            .config
            .log_level
            .as_deref()
            .map(|name| parse_level("logLevel", name))
            .transpose()?;

        let mut sinks = Vec::with_capacity(self.config.sinks.len());
        for (idx, entry) in self.config.sinks.iter().enumerate() {
            let level = parse_level(format!("sinks[{}].level", idx), entry.level())?;
            sinks.push((entry.build()?, level));
        }

        Ok(ResolvedConfig { level, sinks })
    }

    /// Resolve the configuration and register the result with `engine`.
    pub fn apply(&self, engine: &LoggingEngine) -> Result<()> {
        let resolved = self.resolve()?;

        if let Some(level) = resolved.level {
            engine.set_level(level);
        }
        for (sink, level) in resolved.sinks {
            engine.add_sink(sink, level);
        }
        Ok(())
    }

    /// Load `path` and apply it to the process-wide engine.
    pub fn apply_file_to_instance(path: impl AsRef<Path>) -> Result<()> {
        Self::from_file(path)?.apply(LoggingEngine::instance())
    }

    pub fn apply_console_sink(engine: &LoggingEngine, level: LogLevel) {
        engine.add_sink(Arc::new(ConsoleSink::new()), level);
    }

    pub fn apply_file_sink(
        engine: &LoggingEngine,
        level: LogLevel,
        filename: impl Into<PathBuf>,
    ) -> Result<()> {
        engine.add_sink(Arc::new(FileSink::new(filename)?), level);
        Ok(())
    }

    pub fn apply_network_sink(engine: &LoggingEngine, level: LogLevel, url: &str) {
        engine.add_sink(Arc::new(NetworkSink::new(url)), level);
    }

    pub fn apply_database_sink(engine: &LoggingEngine, level: LogLevel, database: &str) {
        engine.add_sink(Arc::new(DatabaseSink::new(database)), level);
    }

    #[cfg(unix)]
    pub fn apply_syslog_sink(
        engine: &LoggingEngine,
        level: LogLevel,
        ident: &str,
        facility: crate::sinks::Facility,
    ) -> Result<()> {
        engine.add_sink(Arc::new(crate::sinks::SyslogSink::new(ident, facility)?), level);
        Ok(())
    }
}

impl std::str::FromStr for ConfigurationManager {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_json(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_parse_full_document() {
        let manager = ConfigurationManager::from_json(
            r#"{
                "logLevel": "DEBUG",
                "sinks": [
                    { "type": "console", "level": "INFO", "colors": false },
                    { "type": "network", "level": "ERROR", "url": "tcp://collector:5140" },
                    { "type": "database", "level": "CRITICAL", "database": "logs.db" }
                ]
            }"#,
        )
        .unwrap();

        let config = manager.config();
        assert_eq!(config.log_level.as_deref(), Some("DEBUG"));
        assert_eq!(config.sinks.len(), 3);
        assert_eq!(
            config.sinks[0],
            SinkConfig::Console {
                level: "INFO".to_string(),
                colors: false
            }
        );

        let resolved = manager.resolve().unwrap();
        assert_eq!(resolved.level, Some(LogLevel::Debug));
        let levels: Vec<LogLevel> = resolved.sinks.iter().map(|(_, l)| *l).collect();
        assert_eq!(levels, vec![LogLevel::Info, LogLevel::Error, LogLevel::Critical]);
        assert_eq!(resolved.sinks[1].0.name(), "network");
    }

    #[test]
    fn test_empty_document() {
        let resolved = ConfigurationManager::from_json("{}").unwrap().resolve().unwrap();
        assert!(resolved.level.is_none());
        assert!(resolved.sinks.is_empty());
    }

    #[test]
    fn test_unknown_sink_type() {
        let err = ConfigurationManager::from_json(
            r#"{ "sinks": [ { "type": "carrier-pigeon", "level": "INFO" } ] }"#,
        )
        .err()
        .expect("unknown type must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_missing_required_field() {
        let err = ConfigurationManager::from_json(r#"{ "sinks": [ { "type": "file", "level": "INFO" } ] }"#)
            .err()
            .expect("file sink without filename must fail");
        assert!(matches!(err, LoggerError::InvalidConfiguration { .. }));
    }

    #[test]
    fn test_malformed_json() {
        let err = ConfigurationManager::from_json("{ \"logLevel\": ")
            .err()
            .expect("truncated document must fail");
        assert!(matches!(err, LoggerError::JsonError(_)));
    }

    #[test]
    fn test_bad_levels_are_errors() {
        let manager = ConfigurationManager::from_json(r#"{ "logLevel": "info" }"#).unwrap();
        let err = manager.resolve().err().expect("lowercase level must fail");
        assert!(err.to_string().contains("logLevel"));

        let manager = ConfigurationManager::from_json(
            r#"{ "sinks": [ { "type": "console", "level": "LOUD" } ] }"#,
        )
        .unwrap();
        let err = manager.resolve().err().expect("unknown level must fail");
        assert!(err.to_string().contains("sinks[0].level"));
    }

    #[test]
    fn test_failed_config_leaves_engine_untouched() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let bad_path = dir.path().join("no-such-dir").join("app.log");
        let json = format!(
            r#"{{
                "logLevel": "ERROR",
                "sinks": [
                    {{ "type": "console", "level": "INFO" }},
                    {{ "type": "file", "level": "INFO", "filename": {} }}
                ]
            }}"#,
            serde_json::to_string(&bad_path).unwrap()
        );

        let engine = LoggingEngine::new();
        let result = ConfigurationManager::from_json(&json).unwrap().apply(&engine);

        assert!(matches!(result, Err(LoggerError::FileSinkError { .. })));
        assert_eq!(engine.sink_count(), 0);
        assert_eq!(engine.level(), LogLevel::Info);
    }

    #[test]
    fn test_apply_registers_sinks() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let log_path = dir.path().join("app.log");
        let json = format!(
            r#"{{
                "logLevel": "WARNING",
                "sinks": [ {{ "type": "file", "level": "ERROR", "filename": {} }} ]
            }}"#,
            serde_json::to_string(&log_path).unwrap()
        );

        let engine = LoggingEngine::new();
        ConfigurationManager::from_json(&json).unwrap().apply(&engine).unwrap();
        assert_eq!(engine.level(), LogLevel::Warning);
        assert_eq!(engine.sink_count(), 1);

        engine.warning("not for the file");
        engine.error("for the file");

        let content = std::fs::read_to_string(&log_path).unwrap();
        assert_eq!(content.lines().count(), 1);
        assert!(content.contains("for the file"));
    }

    #[test]
    fn test_from_file_missing() {
        let err = ConfigurationManager::from_file("/definitely/not/here/config.json")
            .err()
            .expect("missing file must fail");
        assert!(matches!(err, LoggerError::IoOperation { .. }));
    }

    #[test]
    fn test_programmatic_helpers() {
        let engine = LoggingEngine::new();
        ConfigurationManager::apply_console_sink(&engine, LogLevel::Info);
        ConfigurationManager::apply_network_sink(&engine, LogLevel::Error, "udp://collector:514");
        ConfigurationManager::apply_database_sink(&engine, LogLevel::Critical, "logs.db");
        assert_eq!(engine.sink_count(), 3);
    }

    #[cfg(unix)]
    #[test]
    fn test_syslog_entry() {
        let manager = ConfigurationManager::from_json(
            r#"{ "sinks": [ { "type": "syslog", "level": "WARNING", "facility": "local1" } ] }"#,
        )
        .unwrap();
        let resolved = manager.resolve().unwrap();
        assert_eq!(resolved.sinks[0].0.name(), "syslog");

        let manager = ConfigurationManager::from_json(
            r#"{ "sinks": [ { "type": "syslog", "level": "WARNING", "facility": "mail" } ] }"#,
        )
        .unwrap();
        assert!(manager.resolve().is_err());
    }
}
