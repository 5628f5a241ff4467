//! File sink implementation

use crate::core::{LogEvent, LoggerError, Result, Sink};
use parking_lot::Mutex;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Appends one line per event to a file, flushing after every write.
pub struct FileSink {
    path: PathBuf,
    writer: Mutex<BufWriter<File>>,
}

impl FileSink {
    /// Open (or create) `path` for appending.
    ///
    /// Fails here rather than on first write, so a sink that cannot write is
    /// never registered.
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .map_err(|e| LoggerError::file_sink(path.display().to_string(), e.to_string()))?;

        Ok(Self {
            path,
            writer: Mutex::new(BufWriter::new(file)),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Sink for FileSink {
    fn write(&self, event: &LogEvent) -> Result<()> {
        let line = format!(
            "[{}] [{:8}] {} ({})\n",
            event.timestamp(),
            event.level().to_str(),
            event.message(),
            event.location()
        );

        let mut writer = self.writer.lock();
        writer.write_all(line.as_bytes())?;
        writer.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        self.writer.lock().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "file"
    }
}

impl Drop for FileSink {
    fn drop(&mut self) {
        // Ensure all buffered data is flushed to disk
        let _ = self.writer.get_mut().flush();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LogLevel, SourceLocation};
    use tempfile::TempDir;

    #[test]
    fn test_writes_one_line_per_event() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");
        let sink = FileSink::new(&path).unwrap();

        let location = SourceLocation::new("src/lib.rs", 3, "app::run");
        sink.write(&LogEvent::new(LogLevel::Info, "started", location)).unwrap();
        sink.write(&LogEvent::new(LogLevel::Error, "failed\nfake line", location))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("[INFO    ] started (src/lib.rs:3 app::run)"));
        assert!(lines[1].contains("[ERROR   ] failed\\nfake line"));
    }

    #[test]
    fn test_appends_to_existing_file() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("app.log");
        std::fs::write(&path, "existing\n").unwrap();

        let sink = FileSink::new(&path).unwrap();
        sink.write(&LogEvent::new(LogLevel::Info, "new", SourceLocation::caller()))
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert!(content.starts_with("existing\n"));
        assert_eq!(content.lines().count(), 2);
    }

    #[test]
    fn test_open_failure_is_reported() {
        let dir = TempDir::new().expect("Failed to create temp dir");
        let path = dir.path().join("missing").join("app.log");

        let err = FileSink::new(&path).err().expect("open should fail");
        assert!(matches!(err, LoggerError::FileSinkError { .. }));
    }
}
