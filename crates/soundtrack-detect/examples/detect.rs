//! Run with: cargo run -p soundtrack-detect --example detect
//!
//! Runs every probe for this platform and prints what each one saw.

use std::time::Duration;

use soundtrack_detect::{Coordinator, ProbeOutcome};

#[tokio::main(flavor = "current_thread")]
async fn main() {
    let coordinator = Coordinator::for_current_platform();
    let report = coordinator.diagnose(Duration::from_secs(5)).await;

    for attempt in &report.attempts {
        match &attempt.outcome {
            ProbeOutcome::Found(record) => {
                println!("{}: {}", attempt.probe, record.title());
                if record.has_artist() {
                    println!("  Artist: {}", record.artist());
                }
                println!("  Source: {}", record.source());
                println!("  Kind:   {}", record.kind());
            }
            other => println!("{}: {other:?}", attempt.probe),
        }
    }

    if report.nothing_detected() {
        println!("Nothing playing.");
    }
}
