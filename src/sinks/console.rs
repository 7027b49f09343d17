//! Console sink implementation

use crate::core::{
    coalesce, is_container, should_emit, Level, LogLevel, Message, Priority, Result, Sink,
    SinkKind, TimestampFormat, DEFAULT_PRIORITY,
};
use colored::{Color, Colorize};
use serde_json::Value;
use std::fmt::Display;

/// Report a failure of the library itself on stderr
///
/// Sinks never propagate I/O or serialization failures; they land here as
/// `[ERROR] [FileLogger] ...` style lines. Diagnostics use stderr so they stay
/// out of the stdout stream the console sink writes log lines to.
pub(crate) fn report(level: &LogLevel, component: impl Display, message: impl Display) {
    let tag = match level.name() {
        "WARN" => "[WARNING]".to_string(),
        name => format!("[{}]", name),
    };
    eprintln!(
        "{} [{}] {}",
        tag.color(Color::from(level.color().as_str())),
        component,
        message
    );
}

/// Writes messages to standard output
///
/// Each line is prefixed with an optional colored `[LEVEL]` tag and a
/// `[HH:MM:SS]` timestamp. Records are printed one key per line; continuation
/// lines blank out the prefix so the keys line up.
pub struct ConsoleSink {
    use_colors: bool,
    timestamp_format: TimestampFormat,
    min_priority: Priority,
}

impl ConsoleSink {
    pub fn new() -> Self {
        Self {
            use_colors: true,
            timestamp_format: TimestampFormat::default(),
            min_priority: DEFAULT_PRIORITY,
        }
    }

    pub fn with_colors(use_colors: bool) -> Self {
        Self {
            use_colors,
            ..Self::new()
        }
    }

    /// Set the minimum priority of messages this sink prints
    ///
    /// # Example
    ///
    /// ```
    /// use mloggers::{ConsoleSink, LogLevel, Sink};
    ///
    /// let sink = ConsoleSink::new().with_min_priority(LogLevel::WARN.priority());
    /// assert!(!sink.is_enabled(Some(&LogLevel::INFO.into())));
    /// ```
    #[must_use]
    pub fn with_min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = priority;
        self
    }

    /// Set the timestamp format for this sink
    ///
    /// A pattern chrono cannot render is reported and the current format kept.
    #[must_use]
    pub fn with_timestamp_format(mut self, format: TimestampFormat) -> Self {
        match format.validate() {
            Ok(()) => self.timestamp_format = format,
            Err(e) => report(
                &LogLevel::WARN,
                SinkKind::Console,
                format!("{}, keeping '{}'", e, self.timestamp_format.pattern()),
            ),
        }
        self
    }

    /// Render the lines `emit` would print, using `time` as the timestamp
    ///
    /// Validation and filtering are not applied here.
    pub fn render(&self, message: &Message, level: Option<&Level>, time: &str) -> Vec<String> {
        let time = format!("[{}]", time);
        let level_str = level
            .map(|level| format!("[{}] ", level.name()))
            .unwrap_or_default();
        let level_clr = match level {
            Some(level) if self.use_colors => level_str
                .color(Color::from(level.color().as_str()))
                .to_string(),
            _ => level_str.clone(),
        };

        match message {
            Message::Record(fields) => {
                let mut lines = Vec::with_capacity(fields.len());
                for (key, value) in fields {
                    let (tag, stamp) = if lines.is_empty() {
                        (level_clr.clone(), time.clone())
                    } else {
                        (" ".repeat(level_str.len()), " ".repeat(time.len()))
                    };
                    match render_value(value) {
                        Some(value) => lines.push(format!("{}{} {}: {}", tag, stamp, key, value)),
                        None => lines.push(format!("{}{} {}", tag, stamp, key)),
                    }
                }
                lines
            }
            other => vec![format!("{}{} {}", level_clr, time, other)],
        }
    }
}

/// Render a record value; `None` marks a header key
fn render_value(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Number(number) if number.is_f64() => {
            Some(format!("{:.5}", number.as_f64().unwrap_or_default()))
        }
        nested if is_container(nested) => Some(format!("{:#}", nested)),
        scalar => Some(scalar.to_string()),
    }
}

impl Default for ConsoleSink {
    fn default() -> Self {
        Self::new()
    }
}

impl Sink for ConsoleSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Console
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        let batch = coalesce(messages)?;
        if !should_emit(level, self.min_priority) {
            return Ok(());
        }

        for message in batch.iter() {
            let time = self.timestamp_format.now();
            for line in self.render(message, level, &time) {
                println!("{}", line);
            }
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
