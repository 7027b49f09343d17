//! Logging macros for ergonomic multi-message calls.
//!
//! Each argument after the logger is converted with `Message::from`, so
//! strings, numbers and `serde_json` values can be mixed freely in one call
//! (subject to the usual rule that text and records are not mixed).
//!
//! # Examples
//!
//! ```
//! use mloggers::prelude::*;
//! use mloggers::info;
//! use serde_json::json;
//!
//! let logger = ConsoleSink::new();
//!
//! // Text arguments are joined with a space
//! info!(logger, "epoch", 3, "done")?;
//!
//! // Records are logged one entry each
//! info!(logger, json!({"loss": 0.25}), json!({"accuracy": 0.9}))?;
//! # Ok::<(), LoggerError>(())
//! ```

/// Log messages at an explicit level.
///
/// The level may be a [`LogLevel`](crate::LogLevel) or an ad-hoc `&str` label.
///
/// # Examples
///
/// ```
/// # use mloggers::prelude::*;
/// # let logger = ConsoleSink::new();
/// use mloggers::log;
/// log!(logger, LogLevel::WARN, "learning rate is", 10.0)?;
/// log!(logger, "eval", "validation finished")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($msg:expr),+ $(,)?) => {{
        use $crate::Sink as _;
        $logger.emit(
            &[$($crate::Message::from($msg)),+],
            Some(&$crate::Level::from($level)),
        )
    }};
}

/// Log a debug-level message.
///
/// # Examples
///
/// ```
/// # use mloggers::prelude::*;
/// # let mut logger = ConsoleSink::new();
/// # logger.set_min_priority(LogLevel::DEBUG.priority());
/// use mloggers::debug;
/// debug!(logger, "batch shape", serde_json::json!([32, 3, 28, 28]))?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($msg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::DEBUG, $($msg),+)
    };
}

/// Log an info-level message.
///
/// # Examples
///
/// ```
/// # use mloggers::prelude::*;
/// # let logger = ConsoleSink::new();
/// use mloggers::info;
/// info!(logger, "Training started")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! info {
    ($logger:expr, $($msg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::INFO, $($msg),+)
    };
}

/// Log a warning-level message.
///
/// # Examples
///
/// ```
/// # use mloggers::prelude::*;
/// # let logger = ConsoleSink::new();
/// use mloggers::warn;
/// warn!(logger, "NaN encountered at step", 1200)?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($msg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::WARN, $($msg),+)
    };
}

/// Log an error-level message.
///
/// # Examples
///
/// ```
/// # use mloggers::prelude::*;
/// # let logger = ConsoleSink::new();
/// use mloggers::error;
/// error!(logger, "checkpoint could not be saved")?;
/// # Ok::<(), LoggerError>(())
/// ```
#[macro_export]
macro_rules! error {
    ($logger:expr, $($msg:expr),+ $(,)?) => {
        $crate::log!($logger, $crate::LogLevel::ERROR, $($msg),+)
    };
}

#[cfg(test)]
mod tests {
    use crate::prelude::*;
    use serde_json::json;

    #[test]
    fn test_macros_accept_mixed_scalars() {
        let logger = ConsoleSink::with_colors(false);
        assert!(crate::info!(logger, "epoch", 1, "loss", 0.5).is_ok());
        assert!(crate::warn!(logger, "warn").is_ok());
        assert!(crate::error!(&logger, "error").is_ok());
        assert!(crate::debug!(logger, "debug").is_ok());
    }

    #[test]
    fn test_macro_adhoc_level() {
        let logger = ConsoleSink::with_colors(false);
        assert!(crate::log!(logger, "metric", json!({"f1": 0.8})).is_ok());
    }

    #[test]
    fn test_macro_rejects_mix() {
        let logger = ConsoleSink::with_colors(false);
        let err = crate::info!(logger, "hello", json!({"a": 1})).unwrap_err();
        assert!(err.is_validation());
    }
}
