//! Stress tests for concurrent and high-volume logging
//!
//! These tests verify:
//! - Concurrent writers sharing one log file never lose entries
//! - Large volumes keep the file a valid JSON array
//! - Dispatch metrics stay consistent under concurrent fan-out

use mloggers::core::log_level::LogLevel;
use mloggers::core::message::Message;
use mloggers::core::sink::{Sink, SinkKind};
use mloggers::sinks::file::FileSink;
use mloggers::sinks::{ConsoleSink, MultiSink};
use serde_json::{json, Value};
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;
use tempfile::TempDir;

fn read_logs(path: &std::path::Path) -> Vec<Value> {
    let content = std::fs::read_to_string(path).expect("Failed to read log file");
    serde_json::from_str(&content).expect("log file is a JSON array")
}

/// Test that concurrent appends from many threads all persist
#[test]
fn test_concurrent_file_writers() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("concurrent.json");
    let sink = Arc::new(FileSink::new(&log_file).expect("Failed to create sink"));

    let num_threads = 4;
    let per_thread = 25;

    let handles: Vec<_> = (0..num_threads)
        .map(|t| {
            let sink = Arc::clone(&sink);
            thread::spawn(move || {
                for i in 0..per_thread {
                    sink.info(&[Message::record([("thread", json!(t)), ("i", json!(i))])])
                        .expect("valid record");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    let logs = read_logs(&log_file);
    assert_eq!(logs.len(), num_threads * per_thread);

    let seen: HashSet<(i64, i64)> = logs
        .iter()
        .map(|log| {
            let message = &log["message"];
            (
                message["thread"].as_i64().unwrap(),
                message["i"].as_i64().unwrap(),
            )
        })
        .collect();
    assert_eq!(seen.len(), num_threads * per_thread);
}

/// Test that two sinks opened on the same path coordinate through the file lock
#[test]
fn test_independent_sinks_same_file() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("shared.json");
    FileSink::new(&log_file).expect("Failed to create log file");

    let handles: Vec<_> = (0..3)
        .map(|t| {
            let path = log_file.clone();
            thread::spawn(move || {
                let sink = FileSink::new(path).expect("Failed to create sink");
                for i in 0..20 {
                    sink.warn(&[Message::from(format!("writer {} entry {}", t, i))])
                        .expect("valid message");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("writer thread panicked");
    }

    let logs = read_logs(&log_file);
    assert_eq!(logs.len(), 60);
    assert!(logs.iter().all(|log| log["level"] == "WARN"));
}

/// Test that a long run keeps appending in order
#[test]
fn test_many_sequential_records() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("volume.json");
    let sink = FileSink::new(&log_file).expect("Failed to create sink");

    for step in 0..200 {
        sink.info(&[Message::record([
            ("step", json!(step)),
            ("loss", json!(1.0 / (step + 1) as f64)),
        ])])
        .expect("valid record");
    }

    let logs = read_logs(&log_file);
    assert_eq!(logs.len(), 200);
    for (step, log) in logs.iter().enumerate() {
        assert_eq!(log["message"]["step"], json!(step));
    }
}

/// Test that metrics add up when many threads dispatch through one fan-out
#[test]
fn test_concurrent_dispatch_metrics() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let log_file = temp_dir.path().join("fanout.json");

    let logger = Arc::new(
        MultiSink::builder()
            .sink(ConsoleSink::with_colors(false))
            .sink(FileSink::new(&log_file).expect("Failed to create sink"))
            .default_mask([SinkKind::Console])
            .min_priority(LogLevel::INFO.priority())
            .build(),
    );

    let handles: Vec<_> = (0..4)
        .map(|t| {
            let logger = Arc::clone(&logger);
            thread::spawn(move || {
                for i in 0..10 {
                    logger
                        .info(&[Message::from("thread"), Message::from(t), Message::from(i)])
                        .expect("valid message");
                    logger.debug(&[Message::from("filtered")]).expect("valid message");
                }
            })
        })
        .collect();

    for handle in handles {
        handle.join().expect("dispatch thread panicked");
    }

    let metrics = logger.metrics();
    assert_eq!(metrics.dispatched_count(), 40);
    assert_eq!(metrics.masked_count(), 40);
    assert_eq!(metrics.filtered_count(), 40);
    assert_eq!(metrics.failed_count(), 0);

    let logs = read_logs(&log_file);
    assert_eq!(logs.len(), 40);
}
