//! Basic logger usage example
//!
//! Demonstrates console logging with built-in, custom and ad-hoc levels.
//!
//! Run with: cargo run --example basic_usage

use mloggers::prelude::*;
use mloggers::{info, warn};
use serde_json::{json, Value};

fn main() -> Result<()> {
    println!("=== mloggers - Basic Usage Example ===\n");

    let mut logger = ConsoleSink::new();

    println!("1. Logging at different levels:");
    logger.debug(&[Message::from("This debug message is hidden by default")])?;
    logger.info(&[Message::from("This is an info message")])?;
    logger.warn(&[Message::from("This is a warning message")])?;
    logger.error(&[Message::from("This is an error message")])?;

    println!("\n2. Lowering the threshold to DEBUG:");
    logger.set_min_priority(LogLevel::DEBUG.priority());
    logger.debug(&[Message::from("Now debug messages are shown")])?;

    println!("\n3. Several text arguments are joined:");
    info!(logger, "Epoch", 3, "finished in", 12.5, "seconds")?;
    warn!(logger, "Gradient norm", json!([1.5, 2.25, 40.0]))?;

    println!("\n4. Structured records:");
    logger.info(&[Message::record([
        ("Epoch 3", Value::Null),
        ("loss", json!(0.123456789)),
        ("accuracy", json!(0.91)),
        ("per_class", json!({"cat": 0.9, "dog": 0.92})),
    ])])?;

    println!("\n5. Custom and ad-hoc levels:");
    let success = register_level("success", "green", 2);
    logger.emit(&[Message::from("Model checkpoint saved")], Some(&success.into()))?;
    logger.emit(&[Message::from("Evaluation started")], Some(&Level::from("eval")))?;

    println!("\n6. Mixing text and records is rejected:");
    let err = logger
        .info(&[Message::from("loss"), Message::from(json!({"loss": 0.1}))])
        .unwrap_err();
    println!("   {}", err);

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
