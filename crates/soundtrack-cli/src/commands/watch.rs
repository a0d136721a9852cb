use std::time::Duration;

use soundtrack_core::Formatter;
use soundtrack_detect::Coordinator;
use tokio::time::{interval, Interval, MissedTickBehavior};
use tracing::debug;

use super::{config_or_default, coordinator, CommandResult};

const NOTHING_PLAYING: &str = "🔇 Nothing playing";

/// Print a status line whenever the current track changes, until Ctrl-C.
pub async fn run(interval_secs: Option<u64>) -> CommandResult {
    let config = config_or_default();
    let period = interval_secs
        .map(|secs| Duration::from_secs(secs.max(1)))
        .unwrap_or_else(|| config.poll_interval());
    let coordinator = coordinator(&config);
    let formatter = Formatter::from_config(&config.format);

    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    let mut last: Option<String> = None;
    loop {
        tokio::select! {
            _ = &mut ctrl_c => break,
            line = next_line(&mut ticker, &coordinator, &formatter, config.timeout()) => {
                if last.as_deref() != Some(line.as_str()) {
                    println!("{line}");
                    last = Some(line);
                }
            }
        }
    }

    debug!("Watch stopped");
    Ok(())
}

async fn next_line(
    ticker: &mut Interval,
    coordinator: &Coordinator,
    formatter: &Formatter,
    timeout: Duration,
) -> String {
    ticker.tick().await;
    match coordinator.detect(timeout).await {
        Some(record) => formatter.status_line(&record),
        None => NOTHING_PLAYING.to_string(),
    }
}
