//! Console sink implementation

use crate::core::{LogEvent, LogLevel, Result, Sink};
use colored::Colorize;

pub struct ConsoleSink {
    use_colors: bool,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self { use_colors: true }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self { use_colors }
    }

    /// Render one event as a single console line
    fn format_line(&self, event: &LogEvent) -> String {
        let level_str = format!("{:8}", event.level().to_str());
        let level_str = if self.use_colors {
            level_str.color(event.level().color_code()).to_string()
        } else {
            level_str
        };

        match event.thread_name() {
            Some(thread) => format!(
                "[{}] [{}] [{}] {} ({})",
                event.timestamp(),
                level_str,
                thread,
                event.message(),
                event.location()
            ),
            None => format!(
                "[{}] [{}] {} ({})",
                event.timestamp(),
                level_str,
                event.message(),
                event.location()
            ),
        }
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn write(&self, event: &LogEvent) -> Result<()> {
        let output = self.format_line(event);

        // Route Error and Critical levels to stderr, others to stdout
        match event.level() {
            LogLevel::Error | LogLevel::Critical => eprintln!("{}", output),
            _ => println!("{}", output),
        }
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        use std::io::Write;
        // Flush both stdout and stderr since we write to both
        std::io::stdout().flush()?;
        std::io::stderr().flush()?;
        Ok(())
    }

    fn name(&self) -> &str {
        "console"
    }
}
