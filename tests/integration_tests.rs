//! Integration tests for mloggers
//!
//! These tests verify:
//! - JSON log file round-trips and timestamp format
//! - Rollback of failed file writes
//! - Fan-out masking and failure isolation
//! - Batch validation across sinks
//! - Threshold propagation from a dispatcher to its sinks

use mloggers::core::error::{LoggerError, Result};
use mloggers::core::log_level::{register_level, Level, LogLevel, DEFAULT_PRIORITY};
use mloggers::core::message::Message;
use mloggers::core::sink::{Sink, SinkKind};
use mloggers::sinks::file::{FileSink, LogStore};
use mloggers::sinks::tracking::{RunConfig, TrackingSession, TrackingSink};
use mloggers::sinks::{ConsoleSink, MultiSink, OptionalSink};
use parking_lot::Mutex;
use serde_json::{json, Map, Value};
use std::fs;
use std::io;
use std::sync::Arc;
use tempfile::TempDir;

/// `DD/MM/YYYY HH:MM:SS`
fn is_entry_timestamp(s: &str) -> bool {
    let bytes = s.as_bytes();
    bytes.len() == 19
        && bytes.iter().enumerate().all(|(i, b)| match i {
            2 | 5 => *b == b'/',
            10 => *b == b' ',
            13 | 16 => *b == b':',
            _ => b.is_ascii_digit(),
        })
}

#[derive(Clone, Default)]
struct SharedSession {
    records: Arc<Mutex<Vec<Map<String, Value>>>>,
}

impl TrackingSession for SharedSession {
    fn log(&mut self, record: &Map<String, Value>) -> Result<()> {
        self.records.lock().push(record.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        Ok(())
    }
}

#[test]
fn test_file_round_trip() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("logs").join("run.json");
    let sink = FileSink::new(&log_file).expect("Failed to create sink");

    let inputs: Vec<Message> = (0..5)
        .map(|i| Message::record([("step", json!(i)), ("loss", json!(1.0 / (i + 1) as f64))]))
        .collect();
    for input in &inputs {
        sink.info(std::slice::from_ref(input)).expect("valid message");
    }

    let content = fs::read_to_string(&log_file).expect("Failed to read log file");
    let logs: Vec<Value> = serde_json::from_str(&content).expect("log file is a JSON array");
    assert_eq!(logs.len(), inputs.len());

    for (log, input) in logs.iter().zip(&inputs) {
        assert_eq!(log["message"], input.to_value());
        assert_eq!(log["level"], "INFO");
        let timestamp = log["timestamp"].as_str().expect("timestamp is a string");
        assert!(is_entry_timestamp(timestamp), "bad timestamp {}", timestamp);
    }
}

#[test]
fn test_file_header_keys_persist_as_null() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = FileSink::new(temp_dir.path().join("run.json")).expect("Failed to create sink");

    sink.emit(&[Message::record([("Evaluation", Value::Null), ("f1", json!(0.5))])], None)
        .unwrap();

    let entries = sink.entries().unwrap();
    assert_eq!(entries[0].level, None);
    assert!(entries[0].message["Evaluation"].is_null());
}

#[test]
fn test_file_rollback_keeps_previous_contents() {
    struct BrokenDisk {
        contents: Mutex<String>,
        writes: Mutex<usize>,
    }

    impl LogStore for BrokenDisk {
        fn location(&self) -> String {
            "broken".to_string()
        }

        fn read(&self) -> io::Result<String> {
            Ok(self.contents.lock().clone())
        }

        fn write(&self, contents: &str) -> io::Result<()> {
            let mut writes = self.writes.lock();
            *writes += 1;
            if *writes == 1 {
                *self.contents.lock() = "[{\"timest".to_string();
                return Err(io::Error::new(io::ErrorKind::Other, "No space left on device"));
            }
            *self.contents.lock() = contents.to_string();
            Ok(())
        }
    }

    let before = "[]";
    let sink = FileSink::with_store(BrokenDisk {
        contents: Mutex::new(before.to_string()),
        writes: Mutex::new(0),
    });

    sink.info(&[Message::from("never persisted")]).unwrap();

    let after = sink.store().contents.lock().clone();
    assert_eq!(after, before);
}

#[test]
fn test_diverged_metric_is_not_a_header() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");
    let session = SharedSession::default();

    let logger = MultiSink::builder()
        .sink(FileSink::new(&log_file).unwrap())
        .boxed(Box::new(TrackingSink::from_session(
            Box::new(session.clone()),
            RunConfig::new("proj", "grp", "exp"),
        )))
        .build();

    let metrics = Message::record([("Epoch 7", None), ("loss", Some(f64::NAN))]);
    logger.info(std::slice::from_ref(&metrics)).unwrap();

    let console = ConsoleSink::with_colors(false).render(&metrics, None, "12:00:00");
    assert_eq!(console[1].trim_start(), "loss: NaN");

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert!(file_logs[0]["message"]["Epoch 7"].is_null());
    assert_eq!(file_logs[0]["message"]["loss"], "NaN");

    assert_eq!(session.records.lock()[0]["loss"], "NaN");
}

#[test]
fn test_multi_sink_mask_by_kind() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");
    let session = SharedSession::default();

    let logger = MultiSink::builder()
        .sink(ConsoleSink::with_colors(false))
        .sink(FileSink::new(&log_file).unwrap())
        .boxed(Box::new(TrackingSink::from_session(
            Box::new(session.clone()),
            RunConfig::new("proj", "grp", "exp"),
        )))
        .build();

    logger
        .info_masked(&[Message::from("console and tracker")], &[SinkKind::File])
        .unwrap();
    logger.info(&[Message::from("everywhere")]).unwrap();

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert_eq!(file_logs.len(), 1);
    assert_eq!(file_logs[0]["message"], "everywhere");

    let records = session.records.lock();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0]["INFO"], "console and tracker");
}

#[test]
fn test_multi_sink_default_mask() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");

    let logger = MultiSink::builder()
        .sink(ConsoleSink::with_colors(false))
        .sink(FileSink::new(&log_file).unwrap())
        .default_mask([SinkKind::File])
        .build();

    logger.info(&[Message::from("console only")]).unwrap();
    logger
        .emit_masked(&[Message::from("both")], Some(&LogLevel::INFO.into()), Some(&[]))
        .unwrap();

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert_eq!(file_logs.len(), 1);
    assert_eq!(file_logs[0]["message"], "both");
}

#[test]
fn test_failing_sink_does_not_block_others() {
    struct Rejecting;

    impl Sink for Rejecting {
        fn kind(&self) -> SinkKind {
            SinkKind::Custom("rejecting")
        }

        fn emit(&self, _messages: &[Message], _level: Option<&Level>) -> Result<()> {
            Err(LoggerError::validation("rejected"))
        }

        fn min_priority(&self) -> i64 {
            DEFAULT_PRIORITY
        }

        fn set_min_priority(&mut self, _priority: i64) {}
    }

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");
    let logger = MultiSink::builder()
        .sink(FileSink::new(&log_file).unwrap())
        .sink(Rejecting)
        .build();

    assert!(logger.info(&[Message::from("kept")]).is_err());

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert_eq!(file_logs.len(), 1);
}

#[test]
fn test_homogeneity_rules() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = FileSink::new(temp_dir.path().join("run.json")).unwrap();

    let err = sink
        .info(&[Message::from("hello"), Message::from(json!({"a": 1}))])
        .unwrap_err();
    assert!(matches!(err, LoggerError::Validation { .. }));
    assert!(sink.entries().unwrap().is_empty());

    sink.info(&[Message::from("hello"), Message::from("world")]).unwrap();
    let entries = sink.entries().unwrap();
    assert_eq!(entries.len(), 1);
    assert_eq!(entries[0].message, json!("hello world"));
}

#[test]
fn test_threshold_filtering_through_dispatcher() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");

    let mut logger = MultiSink::builder()
        .sink(FileSink::new(&log_file).unwrap())
        .min_priority(LogLevel::INFO.priority())
        .build();

    logger.debug(&[Message::from("debug hidden")]).unwrap();
    logger.warn(&[Message::from("warn shown")]).unwrap();
    logger.emit(&[Message::from("no level shown")], None).unwrap();
    logger.emit(&[Message::from("adhoc shown")], Some(&Level::from("eval"))).unwrap();

    logger.set_min_priority(LogLevel::WARN.priority());
    logger.emit(&[Message::from("adhoc hidden")], Some(&Level::from("eval"))).unwrap();
    logger.error(&[Message::from("error shown")]).unwrap();

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    let messages: Vec<&str> = file_logs.iter().map(|l| l["message"].as_str().unwrap()).collect();
    assert_eq!(
        messages,
        vec!["warn shown", "no level shown", "adhoc shown", "error shown"]
    );
}

#[test]
fn test_custom_level_end_to_end() {
    let success = register_level("success", "green", 2);
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sink = FileSink::new(temp_dir.path().join("run.json"))
        .unwrap()
        .with_min_priority(LogLevel::WARN.priority());

    sink.emit(&[Message::from("converged")], Some(&success.into())).unwrap();

    let entries = sink.entries().unwrap();
    assert_eq!(entries[0].level.as_deref(), Some("SUCCESS"));
}

#[test]
fn test_optional_wraps_dispatcher() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");

    let present = OptionalSink::new(Some(
        MultiSink::builder().sink(FileSink::new(&log_file).unwrap()).build(),
    ));
    present.info(&[Message::from("logged")]).unwrap();

    let absent: OptionalSink<MultiSink> = OptionalSink::none();
    absent.info(&[Message::from("dropped")]).unwrap();

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert_eq!(file_logs.len(), 1);
}

#[test]
fn test_macros_with_dispatcher() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("run.json");
    let logger = MultiSink::builder().sink(FileSink::new(&log_file).unwrap()).build();

    mloggers::info!(logger, "epoch", 2, "finished").unwrap();
    mloggers::warn!(logger, json!({"lr": 0.1}), json!({"lr": 0.01})).unwrap();

    let file_logs: Vec<Value> = serde_json::from_str(&fs::read_to_string(&log_file).unwrap()).unwrap();
    assert_eq!(file_logs.len(), 3);
    assert_eq!(file_logs[0]["message"], "epoch 2 finished");
    assert_eq!(file_logs[2]["message"]["lr"], 0.01);
}
