//! Ordered audit trail of the commands issued in a session.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::{DateTime, Local};
use serde::Serialize;

use crate::core::Result;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LogEntry {
    timestamp: DateTime<Local>,
    command: String,
    result: String,
}

impl LogEntry {
    pub fn timestamp(&self) -> DateTime<Local> {
        self.timestamp
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    pub fn result(&self) -> &str {
        &self.result
    }
}

#[derive(Serialize)]
struct LogDocument<'a> {
    actions: &'a [LogEntry],
}

/// Append-only list of [`LogEntry`] values.
///
/// Timestamps never decrease: if the wall clock steps backwards the previous timestamp is
/// reused. The log is written exactly once, by [`ActionLog::flush`], which consumes it.
#[derive(Debug, Default)]
pub struct ActionLog {
    entries: Vec<LogEntry>,
}

impl ActionLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record(&mut self, command: impl Into<String>, result: impl Into<String>) -> &LogEntry {
        let now = Local::now();
        let timestamp = match self.entries.last() {
            Some(last) if last.timestamp > now => last.timestamp,
            _ => now,
        };
        self.entries.push(LogEntry {
            timestamp,
            command: command.into(),
            result: result.into(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Writes the log as `{"actions": [{"timestamp", "command", "result"}, ...]}`,
    /// replacing whatever `destination` held before. Returns the number of entries written.
    pub fn flush<P: AsRef<Path>>(self, destination: P) -> Result<usize> {
        let destination = destination.as_ref();
        let mut writer = BufWriter::new(File::create(destination)?);
        let document = LogDocument {
            actions: &self.entries,
        };
        serde_json::to_writer_pretty(&mut writer, &document).map_err(std::io::Error::from)?;
        writer.write_all(b"\n")?;
        writer.flush()?;
        tracing::info!(path = %destination.display(), entries = self.entries.len(), "action log written");
        Ok(self.entries.len())
    }
}
