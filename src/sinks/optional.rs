//! Pass-through wrapper around a sink that may be absent

use crate::core::{Level, Message, Priority, Result, Sink, SinkKind, DEFAULT_PRIORITY};

/// A sink that forwards to `inner` when present and does nothing otherwise
///
/// Library code can accept an optional logger and log unconditionally.
///
/// # Example
///
/// ```
/// use mloggers::prelude::*;
///
/// fn train(logger: Option<ConsoleSink>) {
///     let logger = OptionalSink::new(logger);
///     logger.info(&[Message::from("only printed when a logger was given")]).unwrap();
/// }
///
/// train(None);
/// train(Some(ConsoleSink::new()));
/// ```
pub struct OptionalSink<S: Sink = Box<dyn Sink>> {
    inner: Option<S>,
}

impl<S: Sink> OptionalSink<S> {
    pub fn new(inner: Option<S>) -> Self {
        Self { inner }
    }

    pub fn none() -> Self {
        Self { inner: None }
    }

    pub fn is_some(&self) -> bool {
        self.inner.is_some()
    }

    pub fn inner(&self) -> Option<&S> {
        self.inner.as_ref()
    }

    pub fn into_inner(self) -> Option<S> {
        self.inner
    }
}

impl<S: Sink> Default for OptionalSink<S> {
    fn default() -> Self {
        Self::none()
    }
}

impl<S: Sink> From<Option<S>> for OptionalSink<S> {
    fn from(inner: Option<S>) -> Self {
        Self::new(inner)
    }
}

impl<S: Sink> Sink for OptionalSink<S> {
    fn kind(&self) -> SinkKind {
        self.inner.as_ref().map_or(SinkKind::Optional, Sink::kind)
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        match self.inner {
            Some(ref inner) => inner.emit(messages, level),
            None => Ok(()),
        }
    }

    fn min_priority(&self) -> Priority {
        self.inner.as_ref().map_or(DEFAULT_PRIORITY, Sink::min_priority)
    }

    fn set_min_priority(&mut self, priority: Priority) {
        if let Some(ref mut inner) = self.inner {
            inner.set_min_priority(priority);
        }
    }
}
