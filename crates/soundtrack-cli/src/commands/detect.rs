use std::time::Duration;

use soundtrack_core::{Formatter, SoundtrackError};
use soundtrack_detect::{MediaRecord, ProbeOutcome};

use super::{config_or_default, coordinator, CommandResult};

pub async fn run(json: bool, timeout_ms: Option<u64>) -> CommandResult {
    let config = config_or_default();
    let timeout = timeout_ms
        .map(|ms| Duration::from_millis(ms.max(1)))
        .unwrap_or_else(|| config.timeout());
    let coordinator = coordinator(&config);

    if json {
        let record = coordinator.detect(timeout).await;
        let out = serde_json::to_string_pretty(&record)
            .map_err(|e| SoundtrackError::Output(e.to_string()))?;
        println!("{out}");
        return Ok(());
    }

    println!("🎵 Detecting currently playing audio...");
    let available = coordinator.list_available();
    println!("📡 Available detectors: {}", available.len());
    for name in coordinator.probe_names() {
        let mark = if available.contains(&name) { "✅" } else { "❌" };
        println!("  {mark} {name}");
    }
    if available.is_empty() {
        println!("❌ No audio detectors available on this platform");
        return Ok(());
    }

    let report = coordinator.diagnose(timeout).await;
    println!();
    for attempt in &report.attempts {
        println!("  {}: {}", attempt.probe, describe(&attempt.outcome));
    }

    match report.record() {
        Some(record) => print_record(record, &Formatter::from_config(&config.format)),
        None => println!("\n🔇 No audio currently playing"),
    }
    Ok(())
}

fn describe(outcome: &ProbeOutcome) -> String {
    match outcome {
        ProbeOutcome::Unavailable => "unavailable".into(),
        ProbeOutcome::Found(record) => format!("found \"{}\"", record.title()),
        ProbeOutcome::Nothing => "nothing playing".into(),
        ProbeOutcome::Failed(reason) => format!("failed ({reason})"),
        ProbeOutcome::TimedOut => "timed out".into(),
    }
}

fn print_record(record: &MediaRecord, formatter: &Formatter) {
    println!("\n🎵 Currently playing:");
    println!("   Title:  {}", record.title());
    println!("   Artist: {}", record.artist());
    println!("   Album:  {}", record.album());
    println!("   Source: {}", record.source());
    println!("   Type:   {}", record.kind());
    println!("\n💬 Commit message addition:\n{}", formatter.commit_line(record));
}
