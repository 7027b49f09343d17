//! Log message values and batch validation

use super::error::{LoggerError, Result};
use super::normalize::{self, ToJson};
use serde::Serialize;
use serde_json::{Map, Value};
use std::borrow::Cow;
use std::fmt::{self, Display};

/// Separator used when a batch of text messages is joined into one
pub const TEXT_SEPARATOR: &str = " ";

/// A single JSON-representable log message
///
/// A `Record` value of `null` marks its key as a header or title.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Message {
    Text(String),
    Record(Map<String, Value>),
    Sequence(Vec<Value>),
}

impl Message {
    /// Build a record from key/value pairs, keeping their order
    ///
    /// Values go through [`ToJson`], so a NaN or infinite metric is kept as
    /// text rather than collapsing into a `null` header.
    ///
    /// # Example
    ///
    /// ```
    /// use mloggers::Message;
    /// use serde_json::{json, Value};
    ///
    /// let message = Message::record([
    ///     ("Epoch 3", Value::Null),
    ///     ("loss", json!(0.125)),
    /// ]);
    /// assert!(message.is_record());
    ///
    /// let diverged = Message::record([("loss", f64::NAN)]);
    /// assert_eq!(diverged.to_value(), json!({"loss": "NaN"}));
    /// ```
    pub fn record<K, V, I>(fields: I) -> Self
    where
        K: Into<String>,
        V: ToJson,
        I: IntoIterator<Item = (K, V)>,
    {
        Message::Record(
            fields
                .into_iter()
                .map(|(k, v)| (k.into(), v.to_json()))
                .collect(),
        )
    }

    /// Wrap a value through its `Display` implementation
    pub fn display<T: Display + ?Sized>(value: &T) -> Self {
        Message::Text(value.to_string())
    }

    /// Use a value's canonical JSON conversion
    pub fn from_json<T: ToJson + ?Sized>(value: &T) -> Self {
        Message::from(value.to_json())
    }

    /// Normalize any serializable value into a message
    pub fn serialize<T: Serialize + ?Sized>(value: &T) -> Result<Self> {
        normalize::normalize(value).map(Message::from)
    }

    pub fn is_record(&self) -> bool {
        matches!(self, Message::Record(_))
    }

    pub fn is_text(&self) -> bool {
        matches!(self, Message::Text(_))
    }

    /// JSON form of the message as persisted or forwarded
    pub fn to_value(&self) -> Value {
        match self {
            Message::Text(text) => Value::String(text.clone()),
            Message::Record(fields) => Value::Object(fields.clone()),
            Message::Sequence(items) => Value::Array(items.clone()),
        }
    }
}

impl Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Message::Text(text) => f.write_str(text),
            other => write!(f, "{}", other.to_value()),
        }
    }
}

impl From<&str> for Message {
    fn from(text: &str) -> Self {
        Message::Text(text.to_string())
    }
}

impl From<String> for Message {
    fn from(text: String) -> Self {
        Message::Text(text)
    }
}

impl From<&String> for Message {
    fn from(text: &String) -> Self {
        Message::Text(text.clone())
    }
}

impl From<Map<String, Value>> for Message {
    fn from(fields: Map<String, Value>) -> Self {
        Message::Record(fields)
    }
}

impl From<Vec<Value>> for Message {
    fn from(items: Vec<Value>) -> Self {
        Message::Sequence(items)
    }
}

impl From<Value> for Message {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Message::Record(fields),
            Value::Array(items) => Message::Sequence(items),
            Value::String(text) => Message::Text(text),
            scalar => Message::Text(scalar.to_string()),
        }
    }
}

macro_rules! impl_from_scalar {
    ($($ty:ty),*) => {
        $(
            impl From<$ty> for Message {
                fn from(value: $ty) -> Self {
                    Message::Text(value.to_string())
                }
            }
        )*
    };
}

impl_from_scalar!(bool, i32, i64, u32, u64, usize, f32, f64);

/// Validate a batch of messages and merge it into loggable entries
///
/// A batch must be homogeneous: all records (logged as separate entries) or
/// all text-like (joined with [`TEXT_SEPARATOR`] into one text entry). A
/// single message passes through unchanged.
pub fn coalesce(messages: &[Message]) -> Result<Cow<'_, [Message]>> {
    if messages.is_empty() {
        return Err(LoggerError::validation("Expected at least one message, but got none."));
    }

    let records = messages.iter().filter(|m| m.is_record()).count();
    if records > 0 && records < messages.len() {
        return Err(LoggerError::validation(
            "Expected all messages to be either strings or dictionaries, but got a mix of both.",
        ));
    }

    if messages.len() == 1 || records == messages.len() {
        return Ok(Cow::Borrowed(messages));
    }

    let joined = messages
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(TEXT_SEPARATOR);
    Ok(Cow::Owned(vec![Message::Text(joined)]))
}
