mod cli;
mod commands;

use std::process::ExitCode;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Command};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match cli.command {
        Command::Detect { json, timeout_ms } => commands::detect::run(json, timeout_ms).await,
        Command::Hook { message_file, .. } => commands::hook::run(&message_file).await,
        Command::Install { global, force } => commands::install::run(global, force),
        Command::Watch { interval } => commands::watch::run(interval).await,
        Command::Config { action } => commands::config::run(action),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("error: {e}");
            ExitCode::FAILURE
        }
    }
}

/// Logs go to stderr so they never mix with command output. Quiet by
/// default, since the hook runs inside `git commit`.
fn init_logging(verbose: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if verbose { "soundtrack=debug" } else { "warn" })
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
