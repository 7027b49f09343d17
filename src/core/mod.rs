//! Core logger types and traits

pub mod error;
pub mod filter;
pub mod log_entry;
pub mod log_level;
pub mod message;
pub mod metrics;
pub mod normalize;
pub mod sink;
pub mod timestamp;

pub use error::{LoggerError, Result};
pub use filter::should_emit;
pub use log_entry::LogEntry;
pub use log_level::{
    register_level, registry, Level, LevelProperties, LevelRegistry, LogLevel, Priority,
    ADHOC_COLOR, DEFAULT_PRIORITY, MAX_PRIORITY,
};
pub use message::{coalesce, Message, TEXT_SEPARATOR};
pub use metrics::DispatchMetrics;
pub use normalize::{display, float, is_container, normalize, ToJson};
pub use sink::{Sink, SinkKind};
pub use timestamp::TimestampFormat;
