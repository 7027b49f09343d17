//! File sink implementation
//!
//! The log file holds a single JSON array. Every emit reads the whole array,
//! appends one entry and rewrites the file pretty-printed with 4-space
//! indentation. If the rewrite fails the previous array is written back.
//! Cost per call grows with the size of the file.

use super::console::report;
use crate::core::{
    coalesce, should_emit, Level, LogEntry, LogLevel, LoggerError, Message, Priority, Result,
    Sink, SinkKind, TimestampFormat, DEFAULT_PRIORITY,
};
use fs2::FileExt;
use serde::Serialize;
use serde_json::Value;
use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

/// Storage behind a [`FileSink`]
pub trait LogStore: Send + Sync {
    /// Human-readable location used in diagnostics
    fn location(&self) -> String;

    /// Hold exclusive access for one read-modify-write cycle
    fn lock(&self) -> io::Result<StoreLock> {
        Ok(StoreLock::none())
    }

    fn read(&self) -> io::Result<String>;

    /// Replace the whole content
    fn write(&self, contents: &str) -> io::Result<()>;
}

/// Guard returned by [`LogStore::lock`]; releases the lock on drop
pub struct StoreLock {
    file: Option<File>,
}

impl StoreLock {
    pub fn none() -> Self {
        Self { file: None }
    }

    /// Take an advisory exclusive lock on `file`, blocking until available
    pub fn exclusive(file: File) -> io::Result<Self> {
        file.lock_exclusive()?;
        Ok(Self { file: Some(file) })
    }

    pub fn is_held(&self) -> bool {
        self.file.is_some()
    }
}

impl Drop for StoreLock {
    fn drop(&mut self) {
        if let Some(ref file) = self.file {
            let _ = file.unlock();
        }
    }
}

/// A JSON array file on disk
#[derive(Debug, Clone)]
pub struct JsonFile {
    path: PathBuf,
}

impl JsonFile {
    /// Open `path`, creating it (and its parent directory) as `[]` if absent
    pub fn create(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();

        if !path.exists() {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| {
                    LoggerError::io_operation(
                        "creating log directory",
                        parent.display().to_string(),
                        e,
                    )
                })?;
            }
            fs::write(&path, "[]").map_err(|e| {
                LoggerError::io_operation("creating log file", path.display().to_string(), e)
            })?;
        }

        Ok(Self { path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogStore for JsonFile {
    fn location(&self) -> String {
        self.path.display().to_string()
    }

    fn lock(&self) -> io::Result<StoreLock> {
        let file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        StoreLock::exclusive(file)
    }

    fn read(&self) -> io::Result<String> {
        fs::read_to_string(&self.path)
    }

    fn write(&self, contents: &str) -> io::Result<()> {
        fs::write(&self.path, contents)
    }
}

/// Appends entries to a JSON array log file
///
/// # Example
///
/// ```no_run
/// use mloggers::{FileSink, Message, Sink};
///
/// let sink = FileSink::new("logs/run.json").expect("Failed to create log file");
/// sink.info(&[Message::from("epoch finished")]).unwrap();
/// ```
pub struct FileSink<S: LogStore = JsonFile> {
    store: S,
    timestamp_format: TimestampFormat,
    min_priority: Priority,
}

impl FileSink<JsonFile> {
    pub fn new(path: impl Into<PathBuf>) -> Result<Self> {
        let store = JsonFile::create(path)?;
        report(
            &LogLevel::INFO,
            SinkKind::File,
            format!("Logging to file {}", store.location()),
        );
        Ok(Self::with_store(store))
    }

    pub fn path(&self) -> &Path {
        self.store.path()
    }
}

impl<S: LogStore> FileSink<S> {
    pub fn with_store(store: S) -> Self {
        Self {
            store,
            timestamp_format: TimestampFormat::Entry,
            min_priority: DEFAULT_PRIORITY,
        }
    }

    #[must_use]
    pub fn with_min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = priority;
        self
    }

    /// Set the timestamp format of persisted entries
    ///
    /// A pattern chrono cannot render is reported and the current format kept.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        match format.validate() {
            Ok(()) => self.timestamp_format = format,
            Err(e) => report(
                &LogLevel::WARN,
                SinkKind::File,
                format!("{}, keeping '{}'", e, self.timestamp_format.pattern()),
            ),
        }
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Read back every persisted entry
    pub fn entries(&self) -> Result<Vec<LogEntry>> {
        let logs = self.load()?;
        logs.into_iter()
            .map(|log| serde_json::from_value(log).map_err(LoggerError::from))
            .collect()
    }

    fn load(&self) -> Result<Vec<Value>> {
        let content = self.store.read().map_err(|e| {
            LoggerError::io_operation("reading the logging file", self.store.location(), e)
        })?;

        let trimmed = content.trim();
        if trimmed.is_empty() || trimmed == "[]" {
            return Ok(Vec::new());
        }

        serde_json::from_str(trimmed).map_err(|_| {
            LoggerError::file_sink(
                self.store.location(),
                "Could not decode existing logs, new logs will not be appended to the file.",
            )
        })
    }

    fn save(&self, logs: &[Value]) -> Result<()> {
        let contents = to_pretty_json(logs)?;
        self.store.write(&contents).map_err(|e| {
            LoggerError::io_operation("writing the logging file", self.store.location(), e)
        })
    }

    fn append(&self, message: &Message, level: Option<&Level>) {
        let _lock = match self.store.lock() {
            Ok(lock) => lock,
            Err(e) => {
                report(
                    &LogLevel::ERROR,
                    SinkKind::File,
                    format!("Could not lock {}: {}", self.store.location(), e),
                );
                return;
            }
        };

        let prev_logs = match self.load() {
            Ok(logs) => logs,
            Err(e @ LoggerError::FileSinkError { .. }) => {
                report(&LogLevel::WARN, SinkKind::File, e);
                return;
            }
            Err(e) => {
                report(
                    &LogLevel::ERROR,
                    SinkKind::File,
                    format!("Exception thrown while reading from the logging file: {}", e),
                );
                return;
            }
        };

        let entry = LogEntry::new(self.timestamp_format.now(), level, message);
        let result = serde_json::to_value(&entry)
            .map_err(LoggerError::from)
            .and_then(|log| {
                let mut new_logs = prev_logs.clone();
                new_logs.push(log);
                self.save(&new_logs)
            });

        if let Err(e) = result {
            report(
                &LogLevel::ERROR,
                SinkKind::File,
                format!("Exception thrown while logging to a file: {}", e),
            );

            if let Err(e) = self.save(&prev_logs) {
                report(
                    &LogLevel::ERROR,
                    SinkKind::File,
                    format!("Exception thrown while rolling back the changes: {}", e),
                );
            }
        }
    }
}

/// Serialize with the 4-space indentation used for log files
fn to_pretty_json(logs: &[Value]) -> Result<String> {
    let mut buf = Vec::new();
    let formatter = serde_json::ser::PrettyFormatter::with_indent(b"    ");
    let mut serializer = serde_json::Serializer::with_formatter(&mut buf, formatter);
    logs.serialize(&mut serializer)?;
    String::from_utf8(buf).map_err(|e| LoggerError::file_sink("<buffer>", e.to_string()))
}

impl<S: LogStore> Sink for FileSink<S> {
    fn kind(&self) -> SinkKind {
        SinkKind::File
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        let batch = coalesce(messages)?;
        if !should_emit(level, self.min_priority) {
            return Ok(());
        }

        for message in batch.iter() {
            self.append(message, level);
        }
        Ok(())
    }

    fn min_priority(&self) -> Priority {
        self.min_priority
    }

    fn set_min_priority(&mut self, priority: Priority) {
        self.min_priority = priority;
    }
}
