//! Database sink placeholder

use crate::core::{LogEvent, LoggerError, Result, Sink};

/// Names the database events would be stored in. Writes always fail with
/// [`LoggerError::NotImplemented`] until a storage backend is wired in.
pub struct DatabaseSink {
    database: String,
}

impl DatabaseSink {
    pub fn new(database: impl Into<String>) -> Self {
        Self {
            database: database.into(),
        }
    }

    pub fn database(&self) -> &str {
        &self.database
    }
}

impl Sink for DatabaseSink {
    fn write(&self, _event: &LogEvent) -> Result<()> {
        Err(LoggerError::not_implemented("Database"))
    }

    fn name(&self) -> &str {
        "database"
    }
}
