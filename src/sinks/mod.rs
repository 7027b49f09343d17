//! Sink implementations

pub mod console;
#[cfg(feature = "file")]
pub mod file;
pub mod multi;
pub mod optional;
#[cfg(feature = "tracking")]
pub mod tracking;

pub use console::ConsoleSink;
#[cfg(feature = "file")]
pub use file::{FileSink, JsonFile, LogStore, StoreLock};
pub use multi::{MultiSink, MultiSinkBuilder};
pub use optional::OptionalSink;
#[cfg(feature = "tracking")]
pub use tracking::{flatten_config, RunConfig, TrackingClient, TrackingSession, TrackingSink};

pub use crate::core::{Sink, SinkKind};
