//! # mloggers
//!
//! Leveled, optionally structured logging for machine-learning experiments.
//! One call can print to the console, append to a JSON log file and forward
//! to an experiment tracker.
//!
//! ## Features
//!
//! - **Custom levels**: ERROR, WARN, INFO and DEBUG built in; register more at runtime
//! - **Structured messages**: text, ordered records and sequences, all JSON-representable
//! - **Multiple sinks**: console, JSON array file, experiment-tracking sessions
//! - **Fan-out**: log to several sinks at once, masking some per call
//!
//! ```
//! use mloggers::prelude::*;
//! use serde_json::{json, Value};
//!
//! let logger = MultiSink::builder()
//!     .sink(ConsoleSink::new())
//!     .build();
//!
//! logger.info(&[Message::from("starting epoch"), Message::from(3)])?;
//! logger.info(&[Message::record([("Epoch 3", Value::Null), ("loss", json!(0.125))])])?;
//! # Ok::<(), LoggerError>(())
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        register_level, Level, LogLevel, LoggerError, Message, Priority, Result, Sink, SinkKind,
        ToJson, DEFAULT_PRIORITY, MAX_PRIORITY,
    };
    #[cfg(feature = "file")]
    pub use crate::sinks::FileSink;
    #[cfg(feature = "tracking")]
    pub use crate::sinks::{RunConfig, TrackingClient, TrackingSession, TrackingSink};
    pub use crate::sinks::{ConsoleSink, MultiSink, OptionalSink};
}

pub use crate::core::{
    coalesce, normalize, register_level, registry, should_emit, DispatchMetrics, Level,
    LevelProperties, LevelRegistry, LogEntry, LogLevel, LoggerError, Message, Priority, Result,
    Sink, SinkKind, TimestampFormat, ToJson, DEFAULT_PRIORITY, MAX_PRIORITY,
};
#[cfg(feature = "file")]
pub use crate::sinks::FileSink;
#[cfg(feature = "tracking")]
pub use crate::sinks::TrackingSink;
pub use crate::sinks::{ConsoleSink, MultiSink, OptionalSink};
