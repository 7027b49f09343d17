//! Experiment-tracking sink
//!
//! Forwards records to an external tracking service (Weights & Biases and
//! similar). The service itself sits behind [`TrackingClient`] and
//! [`TrackingSession`]; this module only decides what gets forwarded.

use super::console::report;
use crate::core::{
    coalesce, should_emit, Level, LogLevel, LoggerError, Message, Priority, Result, Sink,
    SinkKind, DEFAULT_PRIORITY,
};
use parking_lot::Mutex;
use serde_json::{Map, Value};

/// Key used to wrap text messages that have no level
pub const MESSAGE_KEY: &str = "message";

/// Identifies a tracked run
#[derive(Debug, Clone, PartialEq)]
pub struct RunConfig {
    pub project: String,
    pub group: String,
    pub experiment: String,
    /// Flattened experiment configuration (`optimizer.lr` style keys)
    pub config: Option<Map<String, Value>>,
}

impl RunConfig {
    pub fn new(
        project: impl Into<String>,
        group: impl Into<String>,
        experiment: impl Into<String>,
    ) -> Self {
        Self {
            project: project.into(),
            group: group.into(),
            experiment: experiment.into(),
            config: None,
        }
    }

    /// Attach the experiment configuration, flattening nested objects
    #[must_use]
    pub fn with_config(mut self, config: &Map<String, Value>) -> Self {
        self.config = Some(flatten_config(config));
        self
    }
}

/// Flatten nested objects into dotted keys; arrays and scalars are kept whole
///
/// # Example
///
/// ```
/// use mloggers::sinks::flatten_config;
/// use serde_json::json;
///
/// let config = json!({"optimizer": {"name": "adam", "lr": 0.001}, "seed": 7});
/// let flat = flatten_config(config.as_object().unwrap());
/// assert_eq!(flat["optimizer.lr"], 0.001);
/// assert_eq!(flat["seed"], 7);
/// ```
pub fn flatten_config(config: &Map<String, Value>) -> Map<String, Value> {
    fn walk(prefix: &str, config: &Map<String, Value>, out: &mut Map<String, Value>) {
        for (key, value) in config {
            let key = if prefix.is_empty() {
                key.clone()
            } else {
                format!("{}.{}", prefix, key)
            };
            match value {
                Value::Object(nested) if !nested.is_empty() => walk(&key, nested, out),
                other => {
                    out.insert(key, other.clone());
                }
            }
        }
    }

    let mut out = Map::new();
    walk("", config, &mut out);
    out
}

/// An open run on the tracking service
pub trait TrackingSession: Send {
    fn log(&mut self, record: &Map<String, Value>) -> Result<()>;

    fn finish(&mut self) -> Result<()>;
}

/// Entry point of a tracking service
pub trait TrackingClient {
    type Session: TrackingSession + 'static;

    fn init(&self, run: &RunConfig) -> Result<Self::Session>;
}

/// Forwards messages to a tracking session
///
/// Records go through verbatim. Text is wrapped as `{LEVEL: text}`, or
/// `{"message": text}` when no level is given. The session is finished when
/// the sink is dropped.
pub struct TrackingSink {
    session: Mutex<Box<dyn TrackingSession>>,
    run: RunConfig,
    min_priority: Priority,
}

impl TrackingSink {
    /// Open a session for `run`
    pub fn open<C: TrackingClient>(client: &C, run: RunConfig) -> Result<Self> {
        let session = client.init(&run).map_err(|e| {
            LoggerError::tracking(format!(
                "could not start run {}/{}/{}: {}",
                run.project, run.group, run.experiment, e
            ))
        })?;

        Ok(Self::from_session(Box::new(session), run))
    }

    /// Wrap a session that is already open
    pub fn from_session(session: Box<dyn TrackingSession>, run: RunConfig) -> Self {
        Self {
            session: Mutex::new(session),
            run,
            min_priority: DEFAULT_PRIORITY,
        }
    }

    #[must_use]
    pub fn with_min_priority(mut self, priority: Priority) -> Self {
        self.min_priority = priority;
        self
    }

    pub fn run(&self) -> &RunConfig {
        &self.run
    }

    /// Record forwarded for `message`
    pub fn to_record(message: &Message, level: Option<&Level>) -> Map<String, Value> {
        match message {
            Message::Record(fields) => fields.clone(),
            other => {
                let key = level
                    .map(|level| level.name().into_owned())
                    .unwrap_or_else(|| MESSAGE_KEY.to_string());
                let value = match other {
                    Message::Text(text) => Value::String(text.clone()),
                    structured => structured.to_value(),
                };
                let mut record = Map::new();
                record.insert(key, value);
                record
            }
        }
    }
}

impl Sink for TrackingSink {
    fn kind(&self) -> SinkKind {
        SinkKind::Tracking
    }

    fn emit(&self, messages: &[Message], level: Option<&Level>) -> Result<()> {
        let batch = coalesce(messages)?;
        if !should_emit(level, self.min_priority) {
            return Ok(());
        }

        let mut session = self.session.lock();
        for message in batch.iter() {
            let record = Self::to_record(message, level);
            if let Err(e) = session.log(&record) {
                report(
                    &LogLevel::ERROR,
                    SinkKind::Tracking,
                    format!("Error while logging to the tracking service: {}", e),
                );
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

impl Drop for TrackingSink {
    fn drop(&mut self) {
        if let Err(e) = self.session.get_mut().finish() {
            report(
                &LogLevel::ERROR,
                SinkKind::Tracking,
                format!("Error while finishing the tracking run: {}", e),
            );
        }
    }
}
