//! Error types for the logger system

pub type Result<T> = std::result::Result<T, LoggerError>;

#[derive(Debug, thiserror::Error)]
pub enum LoggerError {
    /// A logging call was made with messages that cannot be logged together
    #[error("Invalid log message: {message}")]
    Validation { message: String },

    /// A value could not be reduced to a JSON-compatible shape
    #[error("Could not convert {value} to a JSON serializable format: {source}")]
    Serialization {
        value: String,
        #[source]
        source: serde_json::Error,
    },

    /// Lookup of a severity level that was never registered
    #[error("Unknown log level: '{name}'")]
    UnknownLevel { name: String },

    /// IO error with context
    #[error("IO error while {operation}: {message}")]
    IoOperation {
        operation: String,
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// Generic IO error
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// File sink error with path
    #[error("File sink error for '{path}': {message}")]
    FileSinkError { path: String, message: String },

    /// Experiment tracking session error
    #[error("Tracking error: {message}")]
    TrackingError { message: String },

    /// Invalid configuration with details
    #[error("Invalid configuration for {component}: {message}")]
    InvalidConfiguration { component: String, message: String },
}

impl LoggerError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        LoggerError::Validation {
            message: message.into(),
        }
    }

    /// Create a serialization error naming the offending value
    pub fn serialization(value: impl Into<String>, source: serde_json::Error) -> Self {
        LoggerError::Serialization {
            value: value.into(),
            source,
        }
    }

    /// Create an unknown level error
    pub fn unknown_level(name: impl Into<String>) -> Self {
        LoggerError::UnknownLevel { name: name.into() }
    }

    /// Create an IO operation error with context
    pub fn io_operation(
        operation: impl Into<String>,
        message: impl Into<String>,
        source: std::io::Error,
    ) -> Self {
        LoggerError::IoOperation {
            operation: operation.into(),
            message: message.into(),
            source,
        }
    }

    /// Create a file sink error
    pub fn file_sink(path: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::FileSinkError {
            path: path.into(),
            message: message.into(),
        }
    }

    /// Create a tracking error
    pub fn tracking(message: impl Into<String>) -> Self {
        LoggerError::TrackingError {
            message: message.into(),
        }
    }

    /// Create an invalid configuration error
    pub fn config(component: impl Into<String>, message: impl Into<String>) -> Self {
        LoggerError::InvalidConfiguration {
            component: component.into(),
            message: message.into(),
        }
    }

    /// Whether this error is a caller mistake rather than an environmental failure
    pub fn is_validation(&self) -> bool {
        matches!(self, LoggerError::Validation { .. })
    }
}
