//! Timestamp formatting utilities
//!
//! Sinks stamp entries with local wall-clock time. The console shows the time
//! of day only; persisted entries carry the full date.

use super::error::{LoggerError, Result};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};
use std::fmt::Write;

/// Timestamp format options
///
/// # Examples
///
/// ```
/// use mloggers::TimestampFormat;
/// use chrono::{Local, TimeZone};
///
/// let at = Local.with_ymd_and_hms(2025, 1, 8, 10, 30, 45).unwrap();
/// assert_eq!(TimestampFormat::Clock.format(&at), "10:30:45");
/// assert_eq!(TimestampFormat::Entry.format(&at), "08/01/2025 10:30:45");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum TimestampFormat {
    /// Time of day: `10:30:45`
    #[default]
    Clock,

    /// Day, month, year and time: `08/01/2025 10:30:45`
    ///
    /// Used for entries persisted by the file sink.
    Entry,

    /// Custom strftime format
    Custom(String),
}

impl TimestampFormat {
    /// strftime pattern for this format
    pub fn pattern(&self) -> &str {
        match self {
            TimestampFormat::Clock => "%H:%M:%S",
            TimestampFormat::Entry => "%d/%m/%Y %H:%M:%S",
            TimestampFormat::Custom(format_str) => format_str,
        }
    }

    /// Build a custom format, rejecting patterns chrono cannot render
    pub fn custom(pattern: impl Into<String>) -> Result<Self> {
        let format = TimestampFormat::Custom(pattern.into());
        format.validate()?;
        Ok(format)
    }

    /// Check that every specifier of the pattern is known to chrono
    pub fn validate(&self) -> Result<()> {
        if StrftimeItems::new(self.pattern()).any(|item| matches!(item, Item::Error)) {
            return Err(LoggerError::config(
                "TimestampFormat",
                format!("invalid strftime pattern '{}'", self.pattern()),
            ));
        }
        Ok(())
    }

    /// Format `datetime`; an unrenderable pattern falls back to [`TimestampFormat::Clock`]
    #[must_use]
    pub fn format(&self, datetime: &DateTime<Local>) -> String {
        let mut out = String::new();
        if write!(out, "{}", datetime.format(self.pattern())).is_err() {
            out.clear();
            let _ = write!(out, "{}", datetime.format(TimestampFormat::Clock.pattern()));
        }
        out
    }

    /// Format the current local time
    #[must_use]
    pub fn now(&self) -> String {
        self.format(&Local::now())
    }
}
