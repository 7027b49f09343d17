//! Fan-out to several sinks

use super::console::report;
use crate::core::{
    coalesce, should_emit, DispatchMetrics, Level, LogLevel, LoggerError, Message, Priority,
    Result, Sink, SinkKind, DEFAULT_PRIORITY,
};
use std::collections::HashSet;
use std::panic::{catch_unwind, AssertUnwindSafe};

/// Dispatches every call to an ordered list of sinks
///
/// Sinks whose kind is in the effective mask (the per-call mask, or the
/// default mask when none is given) are skipped. Each sink validates and
/// filters on its own; one sink failing never stops the remaining sinks.
/// The threshold set on the dispatcher is pushed down to every sink.
pub struct MultiSink {
    sinks: Vec<Box<dyn Sink>>,
    default_mask: HashSet<SinkKind>,
    min_priority: Priority,
    metrics: DispatchMetrics,
}

impl MultiSink {
    pub fn new(sinks: Vec<Box<dyn Sink>>) -> Self {
        let mut multi = Self {
            sinks,
            default_mask: HashSet::new(),
            min_priority: DEFAULT_PRIORITY,
            metrics: DispatchMetrics::new(),
        };
        multi.set_min_priority(DEFAULT_PRIORITY);
        multi
    }

    /// Create a builder for MultiSink
    ///
    /// # Example
    /// ```
    /// use mloggers::prelude::*;
    ///
    /// let logger = MultiSink::builder()
    ///     .sink(ConsoleSink::new())
    ///     .min_priority(LogLevel::DEBUG.priority())
    ///     .build();
    /// assert_eq!(logger.len(), 1);
    /// ```
    #[must_use]
    pub fn builder() -> MultiSinkBuilder {
        MultiSinkBuilder::new()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn sinks(&self) -> &[Box<dyn Sink>] {
        &self.sinks
    }

    pub fn default_mask(&self) -> &HashSet<SinkKind> {
        &self.default_mask
    }

    pub fn metrics(&self) -> &DispatchMetrics {
        &self.metrics
    }

    /// Log to every sink not excluded by `mask`
    ///
    /// `None` uses the default mask. Returns the first error any sink raised,
    /// after all sinks have been attempted.
    pub fn emit_masked(
        &self,
        messages: &[Message],
        level: Option<&Level>,
        mask: Option<&[SinkKind]>,
    ) -> Result<()> {
        coalesce(messages)?;
        if !should_emit(level, self.min_priority) {
            self.metrics.record_filtered();
            return Ok(());
        }

        let excluded = |kind: &SinkKind| match mask {
            Some(mask) => mask.contains(kind),
            None => self.default_mask.contains(kind),
        };

        let mut first_error = None;
        for (idx, sink) in self.sinks.iter().enumerate() {
            if excluded(&sink.kind()) {
                self.metrics.record_masked();
                continue;
            }

            self.metrics.record_dispatched();
            let result = catch_unwind(AssertUnwindSafe(|| sink.emit(messages, level)));

            match result {
                Ok(Ok(())) => {}
                Ok(Err(e)) => {
                    self.metrics.record_failed();
                    first_error.get_or_insert(e);
                }
                Err(panic_info) => {
                    self.metrics.record_failed();
                    let panic_msg = if let Some(s) = panic_info.downcast_ref::<&str>() {
                        s.to_string()
                    } else if let Some(s) = panic_info.downcast_ref::<String>() {
                        s.clone()
                    } else {
                        "Unknown panic".to_string()
                    };
                    report(
                        &LogLevel::ERROR,
                        SinkKind::Multi,
                        format!(
                            "{} #{} panicked: {}. Other sinks continue to function.",
                            sink.kind(),
                            idx,
                            panic_msg
                        ),
                    );
                }
            }
        }

        match first_error {
            Some(e) => Err(e),
            None => Ok(()),
        }
    }

    pub fn debug_masked(&self, messages: &[Message], mask: &[SinkKind]) -> Result<()> {
        self.emit_masked(messages, Some(&LogLevel::DEBUG.into()), Some(mask))
    }

    pub fn info_masked(&self, messages: &[Message], mask: &[SinkKind]) -> Result<()> {
        self.emit_masked(messages, Some(&LogLevel::INFO.into()), Some(mask))
    }

    pub fn warn_masked(&self, messages: &[Message], mask: &[SinkKind]) -> Result<()> {
        self.emit_masked(messages, Some(&LogLevel::WARN.into()), Some(mask))
    }

    pub fn error_masked(&self, messages: &[Message], mask: &[SinkKind]) -> Result<()> {
        self.emit_masked(messages, Some(&LogLevel::ERROR.into()), Some(mask))
    }
}

impl Sink for MultiSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Multi
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        self.emit_masked(messages, level, None)
    }

    fn min_priority(&self) -> Priority {
        self.min_priority
    }

    fn set_min_priority(&mut self, priority: Priority) {
        self.min_priority = priority;
        for sink in self.sinks.iter_mut() {
            sink.set_min_priority(priority);
        }
    }
}

/// Builder for constructing a [`MultiSink`] with a fluent API
pub struct MultiSinkBuilder {
    sinks: Vec<Box<dyn Sink>>,
    default_mask: HashSet<SinkKind>,
    min_priority: Priority,
}

impl MultiSinkBuilder {
    pub fn new() -> Self {
        Self {
            sinks: Vec::new(),
            default_mask: HashSet::new(),
            min_priority: DEFAULT_PRIORITY,
        }
    }

    /// Add a sink; sinks are called in insertion order
    #[must_use = "builder methods return a new value"]
    pub fn sink<S: Sink + 'static>(mut self, sink: S) -> Self {
        self.sinks.push(Box::new(sink));
        self
    }

    /// Add an already boxed sink
    #[must_use = "builder methods return a new value"]
    pub fn boxed(mut self, sink: Box<dyn Sink>) -> Self {
        self.sinks.push(sink);
        self
    }

    /// Exclude a sink kind from calls that do not pass their own mask
    #[must_use = "builder methods return a new value"]
    pub fn default_mask(mut self, kinds: impl IntoIterator<Item = SinkKind>) -> Self {
        self.default_mask.extend(kinds);
        self
    }

    /// Set the threshold of the dispatcher and all of its sinks
    #[must_use = "builder methods return a new value"]
    pub fn min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = priority;
        self
    }

    /// Build the MultiSink
    pub fn build(self) -> MultiSink {
        let mut multi = MultiSink::new(self.sinks);
        multi.default_mask = self.default_mask;
        multi.set_min_priority(self.min_priority);
        multi
    }

    /// Build, refusing an empty sink list
    pub fn try_build(self) -> Result<MultiSink> {
        if self.sinks.is_empty() {
            return Err(LoggerError::config("MultiSink", "at least one sink is required"));
        }
        Ok(self.build())
    }
}

impl Default for MultiSinkBuilder {
    fn default() -> Self {
        Self::new()
    }
}
