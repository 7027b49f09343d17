//! Log level definitions and the severity registry
//!
//! Levels are not a closed enum: the process-wide [`LevelRegistry`] is seeded
//! with ERROR, WARN, INFO and DEBUG and accepts new levels at runtime through
//! [`register_level`]. A [`LogLevel`] is a handle naming a registered entry;
//! its color and priority are resolved from the registry when used, so
//! re-registering a name changes how existing handles render.

use super::error::{LoggerError, Result};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use std::borrow::Cow;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use std::sync::OnceLock;

/// Numeric importance of a level; higher is more severe
pub type Priority = i64;

/// Priority reserved for the most severe built-in level
pub const MAX_PRIORITY: Priority = Priority::MAX;

/// Priority used for levels that are not in the registry (same as INFO)
pub const DEFAULT_PRIORITY: Priority = 0;

/// Console color of levels that are not in the registry
pub const ADHOC_COLOR: &str = "green";

/// Display color and priority attached to a registered level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelProperties {
    /// Color name understood by the terminal renderer (e.g. `"red"`)
    pub color: String,
    /// Importance used by the severity filter
    pub priority: Priority,
}

impl LevelProperties {
    pub fn new(color: impl Into<String>, priority: Priority) -> Self {
        Self {
            color: color.into(),
            priority,
        }
    }
}

/// Mapping from uppercase level name to its properties
#[derive(Debug)]
pub struct LevelRegistry {
    levels: RwLock<HashMap<String, LevelProperties>>,
}

impl LevelRegistry {
    /// Create a registry seeded with the built-in levels
    pub fn new() -> Self {
        let mut levels = HashMap::new();
        levels.insert("ERROR".to_string(), LevelProperties::new("red", MAX_PRIORITY));
        levels.insert("WARN".to_string(), LevelProperties::new("yellow", 1));
        levels.insert("INFO".to_string(), LevelProperties::new("cyan", DEFAULT_PRIORITY));
        levels.insert("DEBUG".to_string(), LevelProperties::new("magenta", -1));

        Self {
            levels: RwLock::new(levels),
        }
    }

    /// Add or overwrite a level. The name is uppercased; last write wins.
    pub fn register(&self, name: &str, color: impl Into<String>, priority: Priority) {
        self.levels
            .write()
            .insert(name.to_uppercase(), LevelProperties::new(color, priority));
    }

    /// Look up a level by (case-insensitive) name
    pub fn get(&self, name: &str) -> Result<LevelProperties> {
        self.levels
            .read()
            .get(&name.to_uppercase())
            .cloned()
            .ok_or_else(|| LoggerError::unknown_level(name))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.levels.read().contains_key(&name.to_uppercase())
    }

    /// Registered names ordered from least to most severe
    pub fn names(&self) -> Vec<String> {
        let levels = self.levels.read();
        let mut entries: Vec<(&String, &LevelProperties)> = levels.iter().collect();
        entries.sort_by(|a, b| a.1.priority.cmp(&b.1.priority).then_with(|| a.0.cmp(b.0)));
        entries.into_iter().map(|(name, _)| name.clone()).collect()
    }
}

impl Default for LevelRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// The process-wide registry consulted by every sink
pub fn registry() -> &'static LevelRegistry {
    static REGISTRY: OnceLock<LevelRegistry> = OnceLock::new();
    REGISTRY.get_or_init(LevelRegistry::new)
}

/// Register a custom level in the process-wide registry
///
/// # Example
///
/// ```
/// use mloggers::{register_level, LogLevel};
///
/// let metric = register_level("metric", "blue", 2);
/// assert_eq!(metric.name(), "METRIC");
/// assert!(metric.priority() > LogLevel::WARN.priority());
/// ```
pub fn register_level(name: &str, color: impl Into<String>, priority: Priority) -> LogLevel {
    registry().register(name, color, priority);
    LogLevel {
        name: Cow::Owned(name.to_uppercase()),
    }
}

/// Handle to a level in the process-wide registry
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LogLevel {
    name: Cow<'static, str>,
}

impl LogLevel {
    pub const ERROR: LogLevel = LogLevel::builtin("ERROR");
    pub const WARN: LogLevel = LogLevel::builtin("WARN");
    pub const INFO: LogLevel = LogLevel::builtin("INFO");
    pub const DEBUG: LogLevel = LogLevel::builtin("DEBUG");

    const fn builtin(name: &'static str) -> Self {
        Self {
            name: Cow::Borrowed(name),
        }
    }

    /// Resolve a registered level by name
    pub fn lookup(name: &str) -> Result<Self> {
        registry().get(name)?;
        Ok(Self {
            name: Cow::Owned(name.to_uppercase()),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Current properties of this level
    pub fn properties(&self) -> LevelProperties {
        registry()
            .get(&self.name)
            .unwrap_or_else(|_| LevelProperties::new(ADHOC_COLOR, DEFAULT_PRIORITY))
    }

    pub fn priority(&self) -> Priority {
        self.properties().priority
    }

    pub fn color(&self) -> String {
        self.properties().color
    }
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

impl FromStr for LogLevel {
    type Err = LoggerError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_uppercase().as_str() {
            "WARNING" => Ok(LogLevel::WARN),
            _ => LogLevel::lookup(s),
        }
    }
}

/// Level argument of a logging call
///
/// Either a registered [`LogLevel`] or an ad-hoc label. Ad-hoc labels are
/// rendered uppercased in green and filtered at [`DEFAULT_PRIORITY`], even when
/// the label happens to match a registered name.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Level {
    Known(LogLevel),
    Adhoc(String),
}

impl Level {
    /// Name as rendered by sinks (always uppercase)
    pub fn name(&self) -> Cow<'_, str> {
        match self {
            Level::Known(level) => Cow::Borrowed(level.name()),
            Level::Adhoc(label) => Cow::Owned(label.to_uppercase()),
        }
    }

    pub fn priority(&self) -> Priority {
        match self {
            Level::Known(level) => level.priority(),
            Level::Adhoc(_) => DEFAULT_PRIORITY,
        }
    }

    pub fn color(&self) -> String {
        match self {
            Level::Known(level) => level.color(),
            Level::Adhoc(_) => ADHOC_COLOR.to_string(),
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name())
    }
}

impl From<LogLevel> for Level {
    fn from(level: LogLevel) -> Self {
        Level::Known(level)
    }
}

impl From<&LogLevel> for Level {
    fn from(level: &LogLevel) -> Self {
        Level::Known(level.clone())
    }
}

impl From<&str> for Level {
    fn from(label: &str) -> Self {
        Level::Adhoc(label.to_string())
    }
}

impl From<String> for Level {
    fn from(label: String) -> Self {
        Level::Adhoc(label)
    }
}
