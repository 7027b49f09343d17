//! Multi-sink logging example
//!
//! Demonstrates fanning out to console, file and an experiment tracker, with
//! a default mask and an optional logger handed to library code.
//!
//! Run with: cargo run --example multi_logging --features file,tracking

use mloggers::prelude::*;
use serde_json::{json, Map, Value};

/// Tracker that prints what it would upload
struct PrintingClient;

struct PrintingSession {
    experiment: String,
    uploaded: usize,
}

impl TrackingSession for PrintingSession {
    fn log(&mut self, record: &Map<String, Value>) -> Result<()> {
        self.uploaded += 1;
        println!("   (tracker:{}) {}", self.experiment, Value::Object(record.clone()));
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        println!("   (tracker:{}) finished after {} records", self.experiment, self.uploaded);
        Ok(())
    }
}

impl TrackingClient for PrintingClient {
    type Session = PrintingSession;

    fn init(&self, run: &RunConfig) -> Result<PrintingSession> {
        println!("   (tracker) starting {}/{}/{}", run.project, run.group, run.experiment);
        if let Some(ref config) = run.config {
            println!("   (tracker) config {}", Value::Object(config.clone()));
        }
        Ok(PrintingSession {
            experiment: run.experiment.clone(),
            uploaded: 0,
        })
    }
}

fn evaluate(logger: &OptionalSink) -> Result<()> {
    logger.emit(
        &[Message::record([("Evaluation", Value::Null), ("f1", json!(0.87))])],
        Some(&Level::from("eval")),
    )
}

fn main() -> Result<()> {
    println!("=== mloggers - Multi-Sink Example ===\n");

    let mut config = Map::new();
    config.insert("optimizer".into(), json!({"name": "adam", "lr": 0.001}));
    config.insert("epochs".into(), json!(3));
    let run = RunConfig::new("demo", "baselines", "run-1").with_config(&config);

    let log_path = std::env::temp_dir().join("mloggers_demo").join("multi.json");
    let logger = MultiSink::builder()
        .sink(ConsoleSink::new())
        .sink(FileSink::new(&log_path)?)
        .sink(TrackingSink::open(&PrintingClient, run)?)
        .default_mask([SinkKind::Tracking])
        .build();

    println!("\n1. Default mask keeps chatter out of the tracker:");
    logger.info(&[Message::from("Loading dataset")])?;

    println!("\n2. Metrics go everywhere when the mask is overridden:");
    for epoch in 1..=3 {
        logger.info_masked(
            &[Message::record([("epoch", json!(epoch)), ("loss", json!(1.0 / epoch as f64))])],
            &[],
        )?;
    }

    println!("\n3. Library code with an optional logger:");
    evaluate(&OptionalSink::new(Some(Box::new(logger) as Box<dyn Sink>)))?;
    evaluate(&OptionalSink::none())?;

    println!("\n=== Example completed successfully! ===");

    Ok(())
}
