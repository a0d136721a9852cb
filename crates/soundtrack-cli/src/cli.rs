use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Soundtrack - put what you're listening to in your commit messages
#[derive(Parser)]
#[command(name = "soundtrack")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Print debug logs to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Show what is playing and what each detector found
    Detect {
        /// Print the detected record as JSON
        #[arg(long)]
        json: bool,

        /// Per-detector timeout in milliseconds (default: from config)
        #[arg(long)]
        timeout_ms: Option<u64>,
    },

    /// Git prepare-commit-msg handler
    #[command(hide = true)]
    Hook {
        /// Path to the commit message file
        message_file: PathBuf,

        /// Source of the commit message (message, template, merge, ...)
        source: Option<String>,

        /// Commit SHA for amends
        sha: Option<String>,
    },

    /// Install the prepare-commit-msg hook
    Install {
        /// Install into the global hooks directory for all repositories
        #[arg(long)]
        global: bool,

        /// Overwrite an existing hook that was not installed by soundtrack
        #[arg(long)]
        force: bool,
    },

    /// Keep printing a status line for the current track
    Watch {
        /// Seconds between checks (default: from config)
        #[arg(long)]
        interval: Option<u64>,
    },

    /// Inspect or create the config file
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand, Clone, Copy)]
pub enum ConfigAction {
    /// Print the config file location
    Path,
    /// Print the effective configuration
    Show,
    /// Write the default config file
    Init,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_hook_accepts_git_arguments() {
        let cli = Cli::try_parse_from(["soundtrack", "hook", ".git/COMMIT_EDITMSG", "message"])
            .unwrap();
        match cli.command {
            Command::Hook {
                message_file,
                source,
                sha,
            } => {
                assert_eq!(message_file, PathBuf::from(".git/COMMIT_EDITMSG"));
                assert_eq!(source.as_deref(), Some("message"));
                assert!(sha.is_none());
            }
            _ => panic!("expected hook"),
        }
    }

    #[test]
    fn test_global_verbose_flag() {
        let cli = Cli::try_parse_from(["soundtrack", "detect", "--json", "-v"]).unwrap();
        assert!(cli.verbose);
        assert!(matches!(cli.command, Command::Detect { json: true, timeout_ms: None }));
    }
}
