//! Log entry structure

use super::log_level::Level;
use super::message::Message;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One element of the JSON array persisted by the file sink
///
/// ```json
/// {"timestamp": "08/01/2025 10:30:45", "level": "INFO", "message": {"loss": 0.25}}
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub level: Option<String>,
    pub message: Value,
}

impl LogEntry {
    pub fn new(timestamp: impl Into<String>, level: Option<&Level>, message: &Message) -> Self {
        Self {
            timestamp: timestamp.into(),
            level: level.map(|level| level.name().into_owned()),
            message: message.to_value(),
        }
    }
}
