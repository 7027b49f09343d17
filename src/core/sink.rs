//! Sink trait for log output destinations

use super::{
    error::Result,
    filter::should_emit,
    log_level::{Level, LogLevel, Priority},
    message::Message,
};
use std::fmt;

/// Kind tag of a sink, used to exclude sinks from a fan-out
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SinkKind {
    Console,
    File,
    Tracking,
    Multi,
    Optional,
    /// User-defined destination, identified by name
    Custom(&'static str),
}

impl fmt::Display for SinkKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SinkKind::Console => f.write_str("ConsoleLogger"),
            SinkKind::File => f.write_str("FileLogger"),
            SinkKind::Tracking => f.write_str("TrackingLogger"),
            SinkKind::Multi => f.write_str("MultiLogger"),
            SinkKind::Optional => f.write_str("OptionalLogger"),
            SinkKind::Custom(name) => f.write_str(name),
        }
    }
}

/// A destination for log messages
///
/// `emit` validates the batch itself (see [`coalesce`](super::message::coalesce))
/// and returns an error only for invalid batches. Failures while rendering,
/// writing or forwarding are reported on stderr and swallowed.
pub trait Sink: Send + Sync {
    fn kind(&self) -> SinkKind;

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()>;

    fn min_priority(&self) -> Priority;

    fn set_min_priority(&mut self, priority: Priority);

    /// Whether a message at `level` would pass this sink's threshold
    fn is_enabled(&self, level: Option<&Level>) -> bool {
        should_emit(level, self.min_priority())
    }

    #[inline]
    fn debug(&self, messages: &[Message]) -> Result<()> {
        self.emit(messages, Some(&Level::Known(LogLevel::DEBUG)))
    }

    #[inline]
    fn info(&self, messages: &[Message]) -> Result<()> {
        self.emit(messages, Some(&Level::Known(LogLevel::INFO)))
    }

    #[inline]
    fn warn(&self, messages: &[Message]) -> Result<()> {
        self.emit(messages, Some(&Level::Known(LogLevel::WARN)))
    }

    /// Alias of [`Sink::warn`]
    #[inline]
    fn warning(&self, messages: &[Message]) -> Result<()> {
        self.warn(messages)
    }

    #[inline]
    fn error(&self, messages: &[Message]) -> Result<()> {
        self.emit(messages, Some(&Level::Known(LogLevel::ERROR)))
    }
}

impl<S: Sink + ?Sized> Sink for Box<S> {
    fn kind(&self) -> SinkKind {
        (**self).kind()
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        (**self).emit(messages, level)
    }

    fn min_priority(&self) -> Priority {
        (**self).min_priority()
    }

    fn set_min_priority(&mut self, priority: Priority) {
        (**self).set_min_priority(priority)
    }
}
