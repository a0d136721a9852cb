pub mod config;
pub mod detect;
pub mod hook;
pub mod install;
pub mod watch;

use soundtrack_core::{AppConfig, SoundtrackError};
use soundtrack_detect::Coordinator;
use tracing::warn;

/// Config for commands that should keep working with a broken config file.
fn config_or_default() -> AppConfig {
    AppConfig::load().unwrap_or_else(|e| {
        warn!(error = %e, "Ignoring unreadable config, using defaults");
        AppConfig::default()
    })
}

fn coordinator(config: &AppConfig) -> Coordinator {
    Coordinator::for_current_platform().with_sources(config.detect.sources.as_slice())
}

type CommandResult = Result<(), SoundtrackError>;
