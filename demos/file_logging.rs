//! File logging example
//!
//! Demonstrates logging to the console and a JSON log file at the same time.
//!
//! Run with: cargo run --example file_logging --features file

use mloggers::prelude::*;
use serde_json::{json, Value};

fn main() -> Result<()> {
    println!("=== mloggers - File Logging Example ===\n");

    let log_path = std::env::temp_dir().join("mloggers_demo").join("training.json");

    let logger = MultiSink::builder()
        .sink(ConsoleSink::new())
        .sink(FileSink::new(&log_path)?)
        .build();

    println!("1. Logging to both console and file:");
    logger.info(&[Message::from("Training started")])?;
    logger.debug(&[Message::from("Hidden: below the INFO threshold")])?;

    println!("\n2. Logging metrics per epoch:");
    for epoch in 1..=3 {
        let loss = 1.0 / epoch as f64;
        logger.info(&[Message::record([
            (format!("Epoch {}", epoch), Value::Null),
            ("loss".to_string(), json!(loss)),
        ])])?;
        if epoch == 2 {
            logger.warn_masked(&[Message::from("Epoch 2 was slow")], &[SinkKind::File])?;
        }
    }

    logger.info(&[Message::from("Training finished")])?;

    println!("\n=== Example completed successfully! ===");
    println!("Check '{}' for the JSON log", log_path.display());

    Ok(())
}
